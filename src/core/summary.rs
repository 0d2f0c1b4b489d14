//! Batch summary
//!
//! Aggregates resolution records as they are written so the driver can
//! report found/not-found counts, the success rate and the largest accounts
//! once the batch ends.

use crate::types::ResolutionRecord;

/// Number of top accounts kept for the final report
pub const TOP_ACCOUNTS: usize = 20;

/// Running totals for one batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    /// Unique names resolved
    pub processed: usize,
    /// Names with a qualifying account
    pub found: usize,
    /// Found names whose account is verified
    pub verified: usize,
    /// Names without a qualifying account
    pub not_found: usize,
    /// Repeated names skipped by the driver
    pub duplicates_skipped: usize,
    /// Largest found accounts, descending by follower count
    top: Vec<ResolutionRecord>,
}

impl BatchSummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the totals
    pub fn record(&mut self, record: &ResolutionRecord) {
        self.processed += 1;
        if !record.found {
            self.not_found += 1;
            return;
        }
        self.found += 1;
        if record.is_verified() {
            self.verified += 1;
        }

        let count = record.follower_count.unwrap_or(0);
        let position = self
            .top
            .iter()
            .position(|r| r.follower_count.unwrap_or(0) < count)
            .unwrap_or(self.top.len());
        if position < TOP_ACCOUNTS {
            self.top.insert(position, record.clone());
            self.top.truncate(TOP_ACCOUNTS);
        }
    }

    /// Count a skipped duplicate name
    pub fn skip_duplicate(&mut self) {
        self.duplicates_skipped += 1;
    }

    /// Found names that are not verified
    pub fn unverified(&self) -> usize {
        self.found - self.verified
    }

    /// Percentage of processed names that were found (0 when nothing was processed)
    pub fn success_rate(&self) -> f64 {
        if self.processed == 0 {
            0.0
        } else {
            self.found as f64 / self.processed as f64 * 100.0
        }
    }

    /// Largest found accounts, descending by follower count; ties keep arrival order
    pub fn top_accounts(&self) -> &[ResolutionRecord] {
        &self.top
    }

    /// Write the summary to the log
    pub fn log(&self) {
        tracing::info!(
            "Resolved {} names: {} found ({} verified, {} unverified), {} not found, {} duplicates skipped. Success rate: {:.1}%",
            self.processed,
            self.found,
            self.verified,
            self.unverified(),
            self.not_found,
            self.duplicates_skipped,
            self.success_rate()
        );
        for (rank, record) in self.top.iter().enumerate() {
            tracing::info!(
                "{:2}. {:30} {:25} {:>12} {}",
                rank + 1,
                record.name,
                record.handle.as_deref().unwrap_or(""),
                record.follower_count.unwrap_or(0),
                if record.is_verified() { "verified" } else { "unverified" }
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn found(name: &str, count: u64, verified: bool) -> ResolutionRecord {
        ResolutionRecord::found(name, &name.to_lowercase(), count, Some(verified))
    }

    #[test]
    fn test_counts() {
        let mut summary = BatchSummary::new();
        summary.record(&found("A", 10_000, true));
        summary.record(&found("B", 20_000, false));
        summary.record(&ResolutionRecord::not_found("C"));
        summary.skip_duplicate();

        assert_eq!(summary.processed, 3);
        assert_eq!(summary.found, 2);
        assert_eq!(summary.verified, 1);
        assert_eq!(summary.unverified(), 1);
        assert_eq!(summary.not_found, 1);
        assert_eq!(summary.duplicates_skipped, 1);
    }

    #[rstest]
    #[case::empty(0, 0, 0.0)]
    #[case::half(2, 1, 50.0)]
    #[case::all(3, 3, 100.0)]
    fn test_success_rate(#[case] processed: usize, #[case] found_count: usize, #[case] expected: f64) {
        let mut summary = BatchSummary::new();
        for i in 0..processed {
            if i < found_count {
                summary.record(&found(&format!("N{}", i), 10_000, false));
            } else {
                summary.record(&ResolutionRecord::not_found(&format!("N{}", i)));
            }
        }
        assert!((summary.success_rate() - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn test_top_accounts_sorted_and_bounded() {
        let mut summary = BatchSummary::new();
        for i in 0..(TOP_ACCOUNTS as u64 + 5) {
            summary.record(&found(&format!("N{}", i), 1_000 * (i + 1), false));
        }
        let top = summary.top_accounts();
        assert_eq!(top.len(), TOP_ACCOUNTS);
        assert_eq!(top[0].follower_count, Some(1_000 * (TOP_ACCOUNTS as u64 + 5)));
        assert!(top
            .windows(2)
            .all(|w| w[0].follower_count >= w[1].follower_count));
    }

    #[test]
    fn test_top_accounts_ties_keep_arrival_order() {
        let mut summary = BatchSummary::new();
        summary.record(&found("First", 5_000, false));
        summary.record(&found("Second", 5_000, true));
        let names: Vec<&str> = summary.top_accounts().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["First", "Second"]);
    }
}
