//! Merges per-table prefix-bucket streams into one distance-ordered
//! candidate stream via adaptive frontier expansion.
use crate::data::Numeric;
use crate::dist::Metric;
use crate::hash::VecHash;
use crate::table::{BucketIter, HashTable};
use fnv::FnvHashSet;
use std::cmp::Ordering;

/// Per-query transient state: one prefix-bucket iterator and one
/// accumulating frontier set per table, plus a sorted batch of candidates
/// ready to emit. Not shared across threads, not restartable.
pub struct QueryIter<'a, N: Numeric, H: VecHash<N>> {
    corpus: &'a [Vec<N>],
    query: Vec<N>,
    metric: Metric,
    iters: Vec<BucketIter<'a, N, H>>,
    frontier: Vec<FnvHashSet<u32>>,
    pending: Vec<(u32, N)>,
}

impl<'a, N: Numeric, H: VecHash<N>> QueryIter<'a, N, H> {
    pub(crate) fn new(
        tables: &'a [HashTable<N, H>],
        corpus: &'a [Vec<N>],
        query: Vec<N>,
        metric: Metric,
    ) -> Self {
        let mut iters: Vec<BucketIter<'a, N, H>> =
            tables.iter().map(|t| t.prefix_bucket_iter(&query)).collect();
        let frontier: Vec<FnvHashSet<u32>> = iters
            .iter_mut()
            .map(|it| it.next().cloned().unwrap_or_default())
            .collect();
        QueryIter {
            corpus,
            query,
            metric,
            iters,
            frontier,
            pending: Vec::new(),
        }
    }

    fn intersection(&self) -> FnvHashSet<u32> {
        let mut tables = self.frontier.iter();
        match tables.next() {
            None => FnvHashSet::default(),
            Some(first) => tables.fold(first.clone(), |acc, s| acc.intersection(s).copied().collect()),
        }
    }

    /// Index of the frontier with the fewest elements; ties favor the
    /// lowest index. `None` only when there are no tables to expand.
    fn smallest_frontier(&self) -> Option<usize> {
        self.frontier
            .iter()
            .enumerate()
            .min_by_key(|(_, s)| s.len())
            .map(|(i, _)| i)
    }

    /// Sort so `pop()` returns the best-ranked element per the metric.
    /// Scores that can't be compared (e.g. a NaN from a zero-norm vector
    /// under cosine similarity) sort as equal rather than panicking.
    fn sort_pending(&mut self) {
        if self.metric.higher_is_better() {
            self.pending
                .sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        } else {
            self.pending
                .sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        }
    }
}

impl<'a, N: Numeric, H: VecHash<N>> Iterator for QueryIter<'a, N, H> {
    type Item = (u32, N);

    fn next(&mut self) -> Option<(u32, N)> {
        loop {
            if !self.pending.is_empty() {
                return self.pending.pop();
            }

            let candidates = self.intersection();
            if !candidates.is_empty() {
                for frontier in self.frontier.iter_mut() {
                    for id in &candidates {
                        frontier.remove(id);
                    }
                }
                for &vec_id in &candidates {
                    let score = self.metric.score(&self.corpus[vec_id as usize], &self.query);
                    self.pending.push((vec_id, score));
                }
                self.sort_pending();
                return self.pending.pop();
            }

            let t = self.smallest_frontier()?;
            match self.iters[t].next() {
                Some(bucket) => self.frontier[t].extend(bucket.iter().copied()),
                None => return None,
            }
        }
    }
}
