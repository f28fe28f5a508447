//! Owns the corpus reference, the distance policy, and the `L` hash tables;
//! drives `index_data` and produces `QueryIter`s.
use crate::data::Numeric;
use crate::dist::Metric;
use crate::error::{Error, Result};
use crate::hash::RandomProjectionHasher;
use crate::query::QueryIter;
use crate::table::HashTable;
use crate::utils::create_rng;
use rand::Rng;
use rayon::prelude::*;

/// A PATRICIA-trie-backed LSH forest over a borrowed corpus of vectors.
///
/// `new(...)` validates configuration and returns a `Result`, `.seed(...)`
/// is a chainable setter, and `index_data()` performs the (possibly
/// expensive) build step explicitly rather than as a side effect of
/// construction.
pub struct LSHForest<'a, N: Numeric> {
    nbits: usize,
    dim: usize,
    num_tables: usize,
    metric: Metric,
    corpus: &'a [Vec<N>],
    tables: Vec<HashTable<N, RandomProjectionHasher<N>>>,
    seed: u64,
}

impl<'a, N: Numeric> LSHForest<'a, N> {
    /// `nbits`, `dim`, and `num_tables` must all be positive; `metric` must
    /// be one of `"cosine"` or `"euclidean"`.
    pub fn new(nbits: usize, dim: usize, num_tables: usize, metric: &str, corpus: &'a [Vec<N>]) -> Result<Self> {
        if nbits == 0 {
            return Err(Error::InvalidConfiguration("nbits must be positive".to_string()));
        }
        if dim == 0 {
            return Err(Error::InvalidConfiguration("dim must be positive".to_string()));
        }
        if num_tables == 0 {
            return Err(Error::InvalidConfiguration("num_tables must be positive".to_string()));
        }
        let metric = Metric::parse(metric)?;
        Ok(LSHForest {
            nbits,
            dim,
            num_tables,
            metric,
            corpus,
            tables: Vec::new(),
            seed: 0,
        })
    }

    /// Seed for the per-table hashers' independent random state. `0` draws
    /// entropy from the OS.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = seed;
        self
    }

    /// Clears and rebuilds all `L` tables from `corpus`. Idempotent: safe to
    /// call again after the corpus contents change, though the per-table
    /// hashers (built once, on first call) keep their random state across
    /// repeated calls, matching `HashTable`'s "fresh hasher, rebuilt trie"
    /// lifecycle.
    pub fn index_data(&mut self) -> Result<()> {
        if self.tables.is_empty() {
            let mut rng = create_rng(self.seed);
            self.tables = (0..self.num_tables)
                .map(|_| {
                    let table_seed: u64 = rng.gen();
                    HashTable::new(RandomProjectionHasher::new(self.nbits, self.dim, table_seed))
                })
                .collect();
        }

        self.tables.par_iter_mut().for_each(|table| {
            table.clear();
            for (vec_id, v) in self.corpus.iter().enumerate() {
                table.insert(v, vec_id as u32);
            }
        });
        Ok(())
    }

    /// A lazy, approximately distance-ordered candidate stream for `v`.
    pub fn query_iter(&self, v: &[N]) -> Result<QueryIter<'_, N, RandomProjectionHasher<N>>> {
        if self.tables.is_empty() {
            return Err(Error::NotIndexed);
        }
        if v.len() != self.dim {
            return Err(Error::DimensionMismatch {
                expected: self.dim,
                got: v.len(),
            });
        }
        Ok(QueryIter::new(&self.tables, self.corpus, v.to_vec(), self.metric))
    }

    /// Bucket-occupancy statistics across all tables: average, min, max, and
    /// standard deviation of bucket size.
    pub fn describe(&self) -> String {
        let lens: Vec<usize> = self.tables.iter().flat_map(|t| t.bucket_lens()).collect();
        if lens.is_empty() {
            return format!("No. of tables: {}\nindex_data() has not been called yet\n", self.num_tables);
        }
        let avg = lens.iter().sum::<usize>() as f64 / lens.len() as f64;
        let var = lens.iter().map(|&v| (avg - v as f64).powi(2)).sum::<f64>() / lens.len() as f64;
        let std_dev = var.sqrt();
        let max_len = *lens.iter().max().unwrap();
        let min_len = *lens.iter().min().unwrap();

        let mut out = format!("No. of tables: {}\n", self.num_tables);
        out.push_str("\nBucket occupancy:\n");
        out.push_str(&format!("avg:\t{:.3}\n", avg));
        out.push_str(&format!("std-dev:\t{:.3}\n", std_dev));
        out.push_str(&format!("min:\t{}\n", min_len));
        out.push_str(&format!("max:\t{}\n", max_len));
        out
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new_rejects_bad_configuration() {
        let corpus: Vec<Vec<f32>> = vec![vec![1.0, 0.0]];
        assert!(matches!(
            LSHForest::new(0, 2, 1, "cosine", &corpus),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            LSHForest::new(4, 0, 1, "cosine", &corpus),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            LSHForest::new(4, 2, 0, "cosine", &corpus),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            LSHForest::new(4, 2, 1, "manhattan", &corpus),
            Err(Error::UnknownMetric(_))
        ));
    }

    #[test]
    fn test_query_iter_rejects_before_index_data() {
        let corpus: Vec<Vec<f32>> = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let forest = LSHForest::new(6, 2, 2, "cosine", &corpus).unwrap();
        assert!(matches!(forest.query_iter(&[1.0, 0.0]), Err(Error::NotIndexed)));
    }

    #[test]
    fn test_query_iter_rejects_dimension_mismatch() {
        let corpus: Vec<Vec<f32>> = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let mut forest = LSHForest::new(6, 2, 2, "cosine", &corpus).unwrap();
        forest.index_data().unwrap();
        let err = forest.query_iter(&[1.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { expected: 2, got: 3 }));
    }

    #[test]
    fn test_index_data_then_query_is_complete() {
        let corpus: Vec<Vec<f32>> = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![1.0, 1.0, 0.0],
            vec![1.0, 0.0, 1.0],
        ];
        let mut forest = LSHForest::new(8, 3, 3, "cosine", &corpus).unwrap();
        forest.seed(7);
        forest.index_data().unwrap();
        let ids: std::collections::HashSet<u32> = forest
            .query_iter(&[1.0, 0.0, 0.0])
            .unwrap()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids.len(), corpus.len());
    }

    #[test]
    fn test_ranking_bias_for_cosine_forest() {
        // A forest's top-K candidates should, on average, beat a random-K
        // baseline in mean cosine similarity to the query.
        let mut rng = create_rng(123);
        let dim = 64;
        let n = 1000;
        let corpus: Vec<Vec<f32>> = (0..n)
            .map(|_| {
                let v: Vec<f32> = (0..dim).map(|_| rng.gen::<f32>() - 0.5).collect();
                let norm = (v.iter().map(|x| x * x).sum::<f32>()).sqrt();
                v.into_iter().map(|x| x / norm).collect()
            })
            .collect();
        let mut forest = LSHForest::new(12, dim, 3, "cosine", &corpus).unwrap();
        forest.seed(99);
        forest.index_data().unwrap();

        let k = 10;
        let num_queries = 30;
        let mut top_k_sum = 0f32;
        let mut random_k_sum = 0f32;
        for qi in 0..num_queries {
            let query = &corpus[qi * (n / num_queries)];
            let top_k: Vec<f32> = forest
                .query_iter(query)
                .unwrap()
                .take(k)
                .map(|(_, score)| score)
                .collect();
            top_k_sum += top_k.iter().sum::<f32>() / top_k.len() as f32;

            let random_k: f32 = (0..k)
                .map(|j| crate::dist::cosine_sim(query, &corpus[(qi * 37 + j * 91) % n]))
                .sum::<f32>()
                / k as f32;
            random_k_sum += random_k;
        }
        assert!(top_k_sum / num_queries as f32 > random_k_sum / num_queries as f32);
    }
}
