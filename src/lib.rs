//! Approximate nearest-neighbor search over dense vectors via a
//! PATRICIA-trie-backed LSH forest: hash, store, and stream candidates in
//! approximate distance order without ever scanning the whole corpus.
#![allow(dead_code)]
extern crate ndarray;

pub mod data;
pub mod dist;
pub mod error;
pub mod forest;
pub mod hash;
pub mod query;
pub mod prelude;
pub mod signature;
pub mod table;
pub mod trie;
mod utils;

pub use error::{Error, Result};
pub use forest::LSHForest;
