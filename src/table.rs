//! One LSH table: a hasher plus a PATRICIA trie over its signatures,
//! plus the bucket storage the trie leaves point into.
use crate::data::Numeric;
use crate::hash::VecHash;
use crate::signature::Signature;
use crate::trie::{PatriciaTrie, PrefixIter};
use fnv::{FnvHashMap, FnvHashSet};
use std::marker::PhantomData;

pub type BucketId = u32;
/// Set of vector IDs sharing one signature in one table.
pub type Bucket = FnvHashSet<u32>;

/// Owns a hasher and a trie; maps `signature -> Bucket` and exposes a
/// prefix-bucket iterator for a query vector.
///
/// Buckets live in `buckets`, owned and indexed by `BucketId`, and are
/// referenced identically by `by_signature` and by the trie leaf payload —
/// by index, not by pointer, so there's no aliasing between the two views
/// of a bucket.
pub struct HashTable<N: Numeric, H: VecHash<N>> {
    hasher: H,
    trie: PatriciaTrie<BucketId>,
    by_signature: FnvHashMap<Signature, BucketId>,
    buckets: Vec<Bucket>,
    _marker: PhantomData<N>,
}

impl<N: Numeric, H: VecHash<N>> HashTable<N, H> {
    pub fn new(hasher: H) -> Self {
        HashTable {
            hasher,
            trie: PatriciaTrie::new(),
            by_signature: FnvHashMap::default(),
            buckets: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Hash `v`, ensure a bucket exists for its signature, and add `vec_id`.
    pub fn insert(&mut self, v: &[N], vec_id: u32) {
        let sig = self.hasher.hash_put(v);
        let bucket_id = match self.by_signature.get(&sig) {
            Some(&id) => id,
            None => {
                let id = self.buckets.len() as BucketId;
                self.buckets.push(Bucket::default());
                self.trie.insert(&sig, id);
                self.by_signature.insert(sig, id);
                id
            }
        };
        self.buckets[bucket_id as usize].insert(vec_id);
    }

    /// Leaves of the trie in prefix-outward order for `v`'s signature,
    /// projected to their bucket payloads.
    pub fn prefix_bucket_iter<'a>(&'a self, v: &[N]) -> BucketIter<'a, N, H> {
        let sig = self.hasher.hash_query(v);
        BucketIter {
            table: self,
            inner: self.trie.get_prefix_iter(&sig),
        }
    }

    /// Bucket sizes, for occupancy statistics.
    pub fn bucket_lens(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.iter().map(|b| b.len())
    }

    /// Drop the trie and bucket map, keeping the hasher's random state.
    pub fn clear(&mut self) {
        self.trie = PatriciaTrie::new();
        self.by_signature.clear();
        self.buckets.clear();
    }
}

pub struct BucketIter<'a, N: Numeric, H: VecHash<N>> {
    table: &'a HashTable<N, H>,
    inner: PrefixIter<'a, BucketId>,
}

impl<'a, N: Numeric, H: VecHash<N>> Iterator for BucketIter<'a, N, H> {
    type Item = &'a Bucket;

    fn next(&mut self) -> Option<&'a Bucket> {
        self.inner.next().map(|id| &self.table.buckets[id as usize])
    }
}
