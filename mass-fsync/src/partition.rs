//! Strided static partitioning of work items across a fixed number of workers.
//!
//! Worker `i` of `degree` owns indices `i, i + degree, i + 2 * degree, ...`.
//! Assignments depend only on `(worker, degree, len)`, so the per-worker set
//! sizes differ by at most one and workers never need to coordinate.

use std::num::NonZeroUsize;

/// The indices owned by `worker`, ascending. Empty if `worker >= len`.
pub fn stride_indices(
    worker: usize,
    degree: NonZeroUsize,
    len: usize,
) -> impl Iterator<Item = usize> + Clone {
    (worker..len).step_by(degree.get())
}

/// The full assignment, one entry per worker (including idle ones).
pub fn stride_partition(degree: NonZeroUsize, len: usize) -> Vec<Vec<usize>> {
    (0..degree.get())
        .map(|worker| stride_indices(worker, degree, len).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn covers_every_index_exactly_once() {
        for degree in [1, 3, 32, 64, 128, 256] {
            for len in [0, 1, 31, 32, 33, 50, 500, 5000] {
                let partition = stride_partition(nz(degree), len);
                assert_eq!(partition.len(), degree);
                let mut seen = vec![0u32; len];
                for indices in &partition {
                    for &i in indices {
                        seen[i] += 1;
                    }
                }
                assert!(seen.iter().all(|&n| n == 1), "degree={degree} len={len}");
            }
        }
    }

    #[test]
    fn each_worker_gets_its_own_stride() {
        let degree = nz(7);
        for (worker, indices) in stride_partition(degree, 100).iter().enumerate() {
            assert_eq!(indices.first().copied(), Some(worker));
            for pair in indices.windows(2) {
                assert_eq!(pair[1] - pair[0], 7);
            }
            assert!(indices.last().unwrap() + 7 >= 100);
        }
    }

    #[test]
    fn sizes_differ_by_at_most_one() {
        for len in [1, 49, 50, 51, 1000, 50000] {
            let partition = stride_partition(nz(128), len);
            let max = partition.iter().map(Vec::len).max().unwrap();
            let min = partition.iter().map(Vec::len).min().unwrap();
            assert!(max - min <= 1, "len={len}");
        }
    }

    #[test]
    fn fifty_files_over_thirty_two_workers() {
        let partition = stride_partition(nz(32), 50);
        for (worker, indices) in partition.iter().enumerate() {
            if worker < 18 {
                assert_eq!(indices, &vec![worker, worker + 32]);
            } else {
                assert_eq!(indices, &vec![worker]);
            }
        }
        assert_eq!(partition.iter().map(Vec::len).sum::<usize>(), 50);
    }

    #[test]
    fn idle_workers_when_fewer_items_than_workers() {
        let partition = stride_partition(nz(256), 10);
        assert!(partition[10..].iter().all(Vec::is_empty));
        assert!(stride_indices(300, nz(256), 10).next().is_none());
    }

    #[test]
    fn deterministic() {
        assert_eq!(stride_partition(nz(64), 5000), stride_partition(nz(64), 5000));
    }
}
