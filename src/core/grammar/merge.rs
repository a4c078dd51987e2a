//! Candidate merger.
//!
//! Combines the per-source candidate lists for one request into a single
//! ordered, non-overlapping error list using a greedy priority policy:
//! a lower-priority candidate is dropped as soon as it overlaps anything
//! already accepted from a higher tier (first-match-wins, not an optimal
//! interval packing).

use tracing::debug;

use super::candidate::{Candidate, SourceResult};

/// Merge source results into the final error list.
///
/// Candidates from the same tier pass through in emission order; the result
/// is sorted ascending by span start, ties broken by tier priority. Empty
/// input (no sources ran, or all failed) merges to an empty list.
pub fn merge(mut results: Vec<SourceResult>) -> Vec<Candidate> {
    results.sort_by_key(|r| r.tier);

    let mut accepted: Vec<Candidate> = Vec::new();
    for result in results {
        let prior = accepted.len();
        let mut dropped = 0;
        for candidate in result.candidates {
            let overlaps = accepted[..prior]
                .iter()
                .any(|kept| kept.span.overlaps(&candidate.span));
            if overlaps {
                dropped += 1;
            } else {
                accepted.push(candidate);
            }
        }
        if dropped > 0 {
            debug!(
                tier = result.tier.name(),
                dropped, "Dropped overlapping candidates from lower-priority source"
            );
        }
    }

    // Stable sort: equal starts keep tier-priority insertion order.
    accepted.sort_by_key(|c| c.span.start);
    accepted
}
