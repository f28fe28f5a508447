//! Distance/similarity policy: selects the scoring function and sort
//! direction a forest uses to rank candidates.
use crate::data::Numeric;
use crate::error::{Error, Result};
use ndarray::prelude::*;

/// L2 norm of a single vector.
pub fn l2_norm<N: Numeric>(x: &[N]) -> N {
    let x = aview1(x);
    x.dot(&x).sqrt()
}

/// Dot product between two vectors.
///
/// # Panics
/// Panics if `a.len() != b.len()`.
pub fn inner_prod<N: Numeric>(a: &[N], b: &[N]) -> N {
    aview1(a).dot(&aview1(b))
}

/// Cosine similarity between two vectors.
///
/// # Panics
/// Panics if `a.len() != b.len()`.
pub fn cosine_sim<N: Numeric>(a: &[N], b: &[N]) -> N {
    inner_prod(a, b) / (l2_norm(a) * l2_norm(b))
}

/// Euclidean distance between two vectors.
///
/// # Panics
/// Panics if `a.len() != b.len()`.
pub fn euclidean_dist<N: Numeric>(a: &[N], b: &[N]) -> N {
    let diff: Vec<N> = a.iter().zip(b).map(|(x, y)| *x - *y).collect();
    l2_norm(&diff)
}

/// Distance/similarity mode selected at forest construction. Carries both
/// the scoring function and the direction candidates are sorted in, since
/// the two always travel together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Cosine,
    Euclidean,
}

impl Metric {
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "cosine" => Ok(Metric::Cosine),
            "euclidean" => Ok(Metric::Euclidean),
            other => Err(Error::UnknownMetric(other.to_string())),
        }
    }

    pub fn score<N: Numeric>(&self, a: &[N], b: &[N]) -> N {
        match self {
            Metric::Cosine => cosine_sim(a, b),
            Metric::Euclidean => euclidean_dist(a, b),
        }
    }

    /// Cosine: highest score pops first. Euclidean: lowest distance pops first.
    pub fn higher_is_better(&self) -> bool {
        matches!(self, Metric::Cosine)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cosine_orthogonal_is_zero() {
        let a = [1.0f32, 0.0];
        let b = [0.0f32, 1.0];
        assert!(cosine_sim(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_identical_is_one() {
        let a = [3.0f32, 4.0];
        assert!((cosine_sim(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_euclidean_dist() {
        let a = [0.0f32, 0.0];
        let b = [3.0f32, 4.0];
        assert!((euclidean_dist(&a, &b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_metric_parse_unknown() {
        assert!(matches!(Metric::parse("manhattan"), Err(Error::UnknownMetric(_))));
    }

    #[test]
    fn test_metric_direction() {
        assert!(Metric::Cosine.higher_is_better());
        assert!(!Metric::Euclidean.higher_is_better());
    }
}
