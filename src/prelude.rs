//! Re-export of the public API of this crate.
pub use crate::data::Numeric;
pub use crate::dist::{cosine_sim, euclidean_dist, inner_prod, l2_norm, Metric};
pub use crate::error::{Error, Result};
pub use crate::forest::LSHForest;
pub use crate::hash::{RandomProjectionHasher, VecHash};
pub use crate::query::QueryIter;
pub use crate::signature::Signature;
pub use crate::table::{Bucket, HashTable};
pub use crate::trie::PatriciaTrie;
