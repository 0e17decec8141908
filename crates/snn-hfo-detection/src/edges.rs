// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Edge-triggered scan of a binary occupancy signal
//!
//! ```text
//! index:   0 1 2 3 4 5 6 7
//! signal:  1 1 0 0 1 0 1 1
//! rises:   0       4   6
//! falls:     1     4     6   (6 = second-to-last, still active at scan end)
//! ```
//! The main loop covers `0..=n-2`. A run touching the first sample rises at 0;
//! a run still active at `n-2` falls there. A single-sample run rises and falls
//! on the same index. Every rise therefore has exactly one fall.

/// Rising and falling edge indices, paired in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Edges {
    pub rising: Vec<usize>,
    pub falling: Vec<usize>,
}

impl Edges {
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rising.iter().copied().zip(self.falling.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.rising.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rising.is_empty()
    }
}

pub fn scan_edges(signal: &[u8]) -> Edges {
    let mut edges = Edges::default();
    let n = signal.len();
    if n < 2 {
        return edges;
    }
    let active = |i: usize| signal[i] != 0;

    if active(0) {
        edges.rising.push(0);
    }

    for i in 0..n - 1 {
        if i > 0 && active(i) && !active(i - 1) {
            edges.rising.push(i);
        }
        if active(i) && !active(i + 1) {
            edges.falling.push(i);
        }
    }

    let last = n - 2;
    if active(last) && edges.falling.last() != Some(&last) {
        edges.falling.push(last);
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_example() {
        let edges = scan_edges(&[1, 1, 0, 0, 1, 0, 1, 1]);
        assert_eq!(edges.rising, vec![0, 4, 6]);
        assert_eq!(edges.falling, vec![1, 4, 6]);
    }

    #[test]
    fn test_all_zero_has_no_edges() {
        assert!(scan_edges(&[0; 10]).is_empty());
    }

    #[test]
    fn test_all_one_spans_to_second_to_last() {
        let edges = scan_edges(&[1; 5]);
        assert_eq!(edges.pairs().collect::<Vec<_>>(), vec![(0, 3)]);
    }

    #[test]
    fn test_run_ending_exactly_at_second_to_last_is_not_duplicated() {
        let edges = scan_edges(&[0, 1, 1, 0]);
        assert_eq!(edges.rising, vec![1]);
        assert_eq!(edges.falling, vec![2]);
    }

    #[test]
    fn test_activity_only_on_last_sample_is_ignored() {
        assert!(scan_edges(&[0, 0, 0, 1]).is_empty());
    }

    #[test]
    fn test_short_signals() {
        assert!(scan_edges(&[]).is_empty());
        assert!(scan_edges(&[1]).is_empty());
        assert_eq!(scan_edges(&[1, 0]).pairs().collect::<Vec<_>>(), vec![(0, 0)]);
        assert_eq!(scan_edges(&[1, 1]).pairs().collect::<Vec<_>>(), vec![(0, 0)]);
    }
}
