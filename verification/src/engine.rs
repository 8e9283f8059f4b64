//! Distance-threshold matching.

use faceid_types::{Embedding, DEFAULT_MATCH_THRESHOLD};

use crate::VerificationError;

/// Euclidean distance between two embeddings.
///
/// Components are widened to `f64` before accumulation, so the result is exactly
/// symmetric and exactly zero for identical inputs.
pub fn distance(a: &Embedding, b: &Embedding) -> Result<f64, VerificationError> {
    if a.dim() != b.dim() {
        return Err(VerificationError::DimensionMismatch {
            left: a.dim(),
            right: b.dim(),
        });
    }
    let sum: f64 = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum();
    Ok(sum.sqrt())
}

/// `distance(a, b) < threshold`. A distance equal to the threshold is not a match.
pub fn is_match(a: &Embedding, b: &Embedding, threshold: f64) -> Result<bool, VerificationError> {
    Ok(distance(a, b)? < threshold)
}

/// Result of comparing a fresh capture against a committed embedding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchOutcome {
    pub distance: f64,
    pub threshold: f64,
    pub is_match: bool,
}

/// Matcher bound to a fixed threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerificationEngine {
    threshold: f64,
}

impl VerificationEngine {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Compare `current` against `stored` and report the distance alongside the decision.
    pub fn evaluate(
        &self,
        current: &Embedding,
        stored: &Embedding,
    ) -> Result<MatchOutcome, VerificationError> {
        let distance = distance(current, stored)?;
        Ok(MatchOutcome {
            distance,
            threshold: self.threshold,
            is_match: distance < self.threshold,
        })
    }

    pub fn is_match(&self, current: &Embedding, stored: &Embedding) -> Result<bool, VerificationError> {
        is_match(current, stored, self.threshold)
    }
}

impl Default for VerificationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emb(values: &[f32]) -> Embedding {
        Embedding::from(values)
    }

    #[test]
    fn distance_of_3_4_triangle() {
        let d = distance(&emb(&[0.0, 0.0]), &emb(&[3.0, 4.0])).unwrap();
        assert_eq!(d, 5.0);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = emb(&[0.1, -0.7, 0.33]);
        assert_eq!(distance(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn dimension_mismatch_is_reported() {
        let err = distance(&emb(&[0.0; 128]), &emb(&[0.0; 64])).unwrap_err();
        assert_eq!(
            err,
            VerificationError::DimensionMismatch {
                left: 128,
                right: 64
            }
        );
        assert!(is_match(&emb(&[0.0]), &emb(&[]), 1.0).is_err());
    }

    #[test]
    fn distance_equal_to_threshold_is_not_a_match() {
        let a = emb(&[0.0]);
        let b = emb(&[0.5]);
        assert_eq!(distance(&a, &b).unwrap(), 0.5);
        assert!(!is_match(&a, &b, 0.5).unwrap());
        assert!(is_match(&a, &b, 0.500_001).unwrap());
    }

    #[test]
    fn zero_threshold_never_matches() {
        let a = emb(&[0.2, 0.2]);
        assert!(!is_match(&a, &a, 0.0).unwrap());
    }

    #[test]
    fn nan_component_never_matches() {
        let a = emb(&[f32::NAN]);
        let b = emb(&[0.0]);
        assert!(!is_match(&a, &b, f64::INFINITY).unwrap());
    }

    #[test]
    fn engine_reports_distance_and_decision() {
        let engine = VerificationEngine::default();
        assert_eq!(engine.threshold(), 0.5);
        let outcome = engine.evaluate(&emb(&[0.0, 0.0]), &emb(&[0.3, 0.4])).unwrap();
        assert!((outcome.distance - 0.5).abs() < 1e-6);
        assert_eq!(outcome.threshold, 0.5);

        let far = engine.evaluate(&emb(&[0.0]), &emb(&[0.6])).unwrap();
        assert!(!far.is_match);
        let near = engine.evaluate(&emb(&[0.0]), &emb(&[0.4])).unwrap();
        assert!(near.is_match);
    }
}
