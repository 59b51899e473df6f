use crate::catalog;
use crate::domain::selection::{Bias, MarketState, Selection, Volatility};
use crate::domain::structure::{Catalog, StrategyRecord};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Recommendation<'a> {
    pub selection: Selection,
    /// False when no record matched and the catalog's first record was used.
    pub matched: bool,
    pub structure: &'a StrategyRecord,
}

impl Catalog {
    /// First record in catalog order that applies to all three filters.
    pub fn find_match(&self, selection: &Selection) -> Option<&StrategyRecord> {
        self.records().iter().find(|r| r.applies_to(selection))
    }

    pub fn recommend(&self, selection: Selection) -> Recommendation<'_> {
        match self.find_match(&selection) {
            Some(structure) => Recommendation {
                selection,
                matched: true,
                structure,
            },
            None => {
                tracing::debug!(
                    selection = %selection.label(),
                    fallback = %self.first().id,
                    "no structure matches selection; using fallback"
                );
                Recommendation {
                    selection,
                    matched: false,
                    structure: self.first(),
                }
            }
        }
    }
}

/// Recommended structure for the given filters from the built-in catalog.
pub fn recommend(
    bias: Bias,
    volatility: Volatility,
    market_state: MarketState,
) -> &'static StrategyRecord {
    catalog::builtin()
        .recommend(Selection::new(bias, volatility, market_state))
        .structure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::structure::PlaybookSection;
    use proptest::prelude::*;

    #[test]
    fn default_selection_is_opening_drive() {
        let r = recommend(Bias::Bullish, Volatility::Medium, MarketState::Trend);
        assert_eq!(r.name, "Opening Drive Continuation");
        assert!(catalog::builtin().recommend(Selection::default()).matched);
    }

    #[test]
    fn neutral_low_choppy_matches_liquidity_sweep() {
        let rec = catalog::builtin().recommend(Selection::new(
            Bias::Neutral,
            Volatility::Low,
            MarketState::Choppy,
        ));
        assert!(rec.matched);
        assert_eq!(rec.structure.name, "Liquidity Sweep Reversal");
    }

    #[test]
    fn bullish_high_range_is_closing_auction() {
        let r = recommend(Bias::Bullish, Volatility::High, MarketState::Range);
        assert_eq!(r.name, "Closing Auction Fade");
    }

    #[test]
    fn earlier_record_wins_ties() {
        // Both liquidity-sweep and midday-expansion apply; liquidity-sweep is declared first.
        let r = recommend(Bias::Bearish, Volatility::Low, MarketState::Range);
        assert_eq!(r.id, "liquidity-sweep");
    }

    #[test]
    fn neutral_high_falls_back_to_first_record() {
        let catalog = catalog::builtin();
        let unmatched: Vec<_> = Selection::all()
            .filter(|s| catalog.find_match(s).is_none())
            .collect();
        assert_eq!(unmatched.len(), 3);

        for selection in unmatched {
            assert_eq!(selection.bias, Bias::Neutral);
            assert_eq!(selection.volatility, Volatility::High);
            let rec = catalog.recommend(selection);
            assert!(!rec.matched);
            assert_eq!(rec.structure.id, "opening-drive");
        }
    }

    #[test]
    fn every_selection_gets_a_catalog_record() {
        let catalog = catalog::builtin();
        for selection in Selection::all() {
            let rec = catalog.recommend(selection);
            assert!(catalog
                .records()
                .iter()
                .any(|r| std::ptr::eq(r, rec.structure)));
        }
    }

    fn subset<T: Copy + std::fmt::Debug + 'static>(
        all: &'static [T],
    ) -> impl Strategy<Value = Vec<T>> {
        prop::sample::subsequence(all, 1..=all.len())
    }

    fn arb_record() -> impl Strategy<Value = StrategyRecord> {
        (
            subset(Bias::ALL),
            subset(Volatility::ALL),
            subset(MarketState::ALL),
        )
            .prop_map(|(bias, volatility, market_state)| StrategyRecord {
                id: String::new(),
                name: "generated".to_string(),
                summary: String::new(),
                bias,
                volatility,
                market_state,
                playbook: vec![PlaybookSection {
                    label: "Execution".to_string(),
                    steps: vec!["step".to_string()],
                }],
            })
    }

    fn arb_catalog() -> impl Strategy<Value = Catalog> {
        prop::collection::vec(arb_record(), 1..6).prop_map(|records| {
            let records = records
                .into_iter()
                .enumerate()
                .map(|(i, mut r)| {
                    r.id = format!("s{i}");
                    r
                })
                .collect();
            Catalog::new(records).unwrap()
        })
    }

    fn arb_selection() -> impl Strategy<Value = Selection> {
        (
            prop::sample::select(Bias::ALL),
            prop::sample::select(Volatility::ALL),
            prop::sample::select(MarketState::ALL),
        )
            .prop_map(|(b, v, m)| Selection::new(b, v, m))
    }

    proptest! {
        #[test]
        fn returns_earliest_match_or_first(catalog in arb_catalog(), selection in arb_selection()) {
            let rec = catalog.recommend(selection);
            let earliest = catalog.records().iter().position(|r| r.applies_to(&selection));
            match earliest {
                Some(i) => {
                    prop_assert!(rec.matched);
                    prop_assert_eq!(&rec.structure.id, &catalog.records()[i].id);
                }
                None => {
                    prop_assert!(!rec.matched);
                    prop_assert_eq!(&rec.structure.id, &catalog.first().id);
                }
            }
        }

        #[test]
        fn recommend_is_deterministic(catalog in arb_catalog(), selection in arb_selection()) {
            let a = catalog.recommend(selection);
            let b = catalog.recommend(selection);
            prop_assert!(std::ptr::eq(a.structure, b.structure));
            prop_assert_eq!(a.matched, b.matched);
        }
    }
}
