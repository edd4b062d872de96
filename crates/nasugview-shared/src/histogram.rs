//! Star-count histogram for one business.
//!
//! The backend computes the counts; the client only turns them into bar
//! widths. Counts are trusted as-is and never cross-checked against the
//! review list.

use serde::{Deserialize, Serialize};

use crate::constants::{HISTOGRAM_BUCKETS, MAX_RATING, MIN_RATING};

/// Five review counts, index 0 holding 5★ and index 4 holding 1★.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingHistogram {
    counts: [u32; HISTOGRAM_BUCKETS],
}

/// One rendered row of the breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBar {
    pub stars: u8,
    pub count: u32,
    /// Bar width, 0.0..=100.0
    pub percent: f64,
}

impl RatingHistogram {
    pub fn new(counts: [u32; HISTOGRAM_BUCKETS]) -> Self {
        Self { counts }
    }

    /// Build from the wire array. Missing trailing buckets count as zero and
    /// extra entries are ignored.
    pub fn from_counts(counts: &[u32]) -> Self {
        let mut buckets = [0u32; HISTOGRAM_BUCKETS];
        for (slot, value) in buckets.iter_mut().zip(counts) {
            *slot = *value;
        }
        Self { counts: buckets }
    }

    pub fn counts(&self) -> &[u32; HISTOGRAM_BUCKETS] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Count for a star value in 1..=5; anything else is zero.
    pub fn count_for(&self, stars: u8) -> u32 {
        if !(MIN_RATING..=MAX_RATING).contains(&stars) {
            return 0;
        }
        self.counts[usize::from(MAX_RATING - stars)]
    }

    /// `count / total * 100`, or 0 when there are no reviews at all.
    pub fn percent_for(&self, stars: u8) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.count_for(stars)) / total as f64 * 100.0
    }

    /// Rows from 5★ down to 1★.
    pub fn bars(&self) -> Vec<HistogramBar> {
        (MIN_RATING..=MAX_RATING)
            .rev()
            .map(|stars| HistogramBar {
                stars,
                count: self.count_for(stars),
                percent: self.percent_for(stars),
            })
            .collect()
    }
}
