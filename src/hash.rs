//! Locality-sensitive hash functions.
use crate::data::Numeric;
use crate::signature::Signature;
use crate::utils::create_rng;
use ndarray::prelude::*;
use ndarray_rand::rand_distr::StandardNormal;
use ndarray_rand::RandomExt;

/// Maps a data point to its bit-string signature. Implement this to plug in a
/// new hash family; only `hash_query` is required (`hash_put` defaults to it,
/// for the symmetric case — only asymmetric families like MIPS need to
/// override `hash_put`).
pub trait VecHash<N: Numeric>: Send + Sync {
    /// Hash a data point that is being queried.
    fn hash_query(&self, v: &[N]) -> Signature;

    /// Hash a data point that is being stored. Defaults to `hash_query`.
    fn hash_put(&self, v: &[N]) -> Signature {
        self.hash_query(v)
    }

    /// Length, in bits, of the signatures this hasher produces.
    fn nbits(&self) -> usize;
}

/// SimHash: cosine-LSH via random hyperplane projections.
///
/// At construction, draws `nbits * dim` plane-normal coefficients from a
/// standard normal distribution. Bit `i` of the signature is `1` iff the
/// vector falls on the positive side of hyperplane `i`. Collision
/// probability for two vectors `u, v` is `1 - theta(u, v) / pi`.
#[derive(Clone)]
pub struct RandomProjectionHasher<N: Numeric> {
    /// Random unit-normal plane normals, shape `(nbits, dim)`.
    hyperplanes: Array2<N>,
    nbits: usize,
}

impl<N: Numeric> RandomProjectionHasher<N> {
    /// # Arguments
    /// * `nbits` - number of hyperplanes; also the signature length.
    /// * `dim` - dimensionality of the vectors to be hashed.
    /// * `seed` - RNG seed (0 draws entropy from the OS).
    pub fn new(nbits: usize, dim: usize, seed: u64) -> Self {
        let mut rng = create_rng(seed);
        let hp: Array2<f32> = Array::random_using((nbits, dim), StandardNormal, &mut rng);
        let hyperplanes = hp.mapv(|v| N::from_f32(v).unwrap());
        RandomProjectionHasher { hyperplanes, nbits }
    }
}

#[cfg(test)]
impl<N: Numeric> RandomProjectionHasher<N> {
    /// Build a hasher from explicit hyperplane rows instead of drawing them
    /// from an RNG, so a test can hand-verify the resulting signatures.
    pub(crate) fn from_rows(rows: Vec<Vec<N>>) -> Self {
        let nbits = rows.len();
        let dim = rows[0].len();
        let flat: Vec<N> = rows.into_iter().flatten().collect();
        let hyperplanes = Array2::from_shape_vec((nbits, dim), flat).unwrap();
        RandomProjectionHasher { hyperplanes, nbits }
    }
}

impl<N: Numeric> VecHash<N> for RandomProjectionHasher<N> {
    fn hash_query(&self, v: &[N]) -> Signature {
        let v = aview1(v);
        let projected = self.hyperplanes.dot(&v);
        Signature::from_bits(projected.iter().map(|&x| x > N::zero()))
    }

    fn nbits(&self) -> usize {
        self.nbits
    }
}
