//! Property tests for the candidate merger.

use proptest::prelude::*;

use crate::core::grammar::merge::merge;
use crate::core::grammar::{Candidate, Category, SourceResult, SourceTier, Span};

fn arb_candidate(tier: SourceTier) -> impl Strategy<Value = Candidate> {
    (0usize..60, 0usize..8).prop_map(move |(start, width)| {
        Candidate::new(
            if width == 0 { Category::Grammar } else { Category::Spelling },
            Span::new(start, start + width),
            "fix".to_string(),
            format!("{} candidate", tier.name()),
        )
    })
}

fn arb_results() -> impl Strategy<Value = Vec<SourceResult>> {
    (
        prop::collection::vec(arb_candidate(SourceTier::Rewrite), 0..6),
        prop::collection::vec(arb_candidate(SourceTier::Rules), 0..6),
        prop::collection::vec(arb_candidate(SourceTier::Statistical), 0..6),
    )
        .prop_map(|(rewrite, rules, statistical)| {
            vec![
                SourceResult::ok(SourceTier::Statistical, statistical),
                SourceResult::ok(SourceTier::Rewrite, rewrite),
                SourceResult::ok(SourceTier::Rules, rules),
            ]
        })
}

/// Recover the emitting tier from the message written by `arb_candidate`.
fn tier_of(candidate: &Candidate) -> &str {
    candidate.message.split(' ').next().unwrap_or("")
}

proptest! {
    #[test]
    fn prop_sorted_by_span_start(results in arb_results()) {
        let merged = merge(results);
        for pair in merged.windows(2) {
            prop_assert!(pair[0].span.start <= pair[1].span.start);
        }
    }

    #[test]
    fn prop_no_cross_tier_overlap(results in arb_results()) {
        let merged = merge(results);
        for (i, a) in merged.iter().enumerate() {
            for b in merged.iter().skip(i + 1) {
                if tier_of(a) != tier_of(b) {
                    prop_assert!(
                        !a.span.overlaps(&b.span),
                        "cross-tier overlap: {:?} vs {:?}",
                        a.span,
                        b.span
                    );
                }
            }
        }
    }

    #[test]
    fn prop_idempotent(results in arb_results()) {
        let once = merge(results.clone());
        let twice = merge(results);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_highest_tier_passes_through_unfiltered(results in arb_results()) {
        let rewrite_count = results
            .iter()
            .find(|r| r.tier == SourceTier::Rewrite)
            .map(|r| r.candidates.len())
            .unwrap_or(0);
        let merged = merge(results);
        let kept_rewrite = merged.iter().filter(|c| tier_of(c) == "rewrite").count();
        prop_assert_eq!(kept_rewrite, rewrite_count);
    }

    #[test]
    fn prop_output_subset_of_input(results in arb_results()) {
        let all_inputs: Vec<Candidate> = results
            .iter()
            .flat_map(|r| r.candidates.clone())
            .collect();
        let merged = merge(results);
        for candidate in &merged {
            prop_assert!(all_inputs.contains(candidate));
        }
    }
}
