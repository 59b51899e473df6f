use crate::domain::selection::{Bias, MarketState, Volatility};
use crate::domain::structure::{Catalog, PlaybookSection, StrategyRecord};
use std::sync::OnceLock;

static BUILTIN: OnceLock<Catalog> = OnceLock::new();

/// The catalog compiled into the binary. Built on first use, never mutated.
pub fn builtin() -> &'static Catalog {
    BUILTIN.get_or_init(|| Catalog::new_unchecked(structures()))
}

fn section(label: &str, steps: &[&str]) -> PlaybookSection {
    PlaybookSection {
        label: label.to_string(),
        steps: steps.iter().map(|s| s.to_string()).collect(),
    }
}

fn structures() -> Vec<StrategyRecord> {
    vec![
        StrategyRecord {
            id: "opening-drive".to_string(),
            name: "Opening Drive Continuation".to_string(),
            summary: "Capitalize on strong directional flows during the first 45 minutes when \
                      higher-timeframe bias aligns with session imbalance."
                .to_string(),
            bias: vec![Bias::Bullish, Bias::Bearish],
            volatility: vec![Volatility::Medium, Volatility::High],
            market_state: vec![MarketState::Trend],
            playbook: vec![
                section(
                    "Pre-Market Map",
                    &[
                        "Anchor VWAP to 08:30 ET economic release and project value area",
                        "Mark overnight high/low and 4h supply-demand pivots",
                        "Track delta imbalance from futures open (09:30 ET) for confirmation",
                    ],
                ),
                section(
                    "Execution",
                    &[
                        "Enter on first pullback to anchored VWAP or session POC",
                        "Require 5m structure hold above developing value (bull) / below (bear)",
                        "Target prior session range extension with 1.5R trailing stop",
                    ],
                ),
                section(
                    "Risk Controls",
                    &[
                        "Invalidate on 5m close back inside opening range",
                        "Cut size by 50% when cumulative delta diverges by >20%",
                    ],
                ),
            ],
        },
        StrategyRecord {
            id: "liquidity-sweep".to_string(),
            name: "Liquidity Sweep Reversal".to_string(),
            summary: "Fade algorithmic stop hunts at session extremes when higher timeframe \
                      auctions are exhausted."
                .to_string(),
            bias: vec![Bias::Bullish, Bias::Bearish, Bias::Neutral],
            volatility: vec![Volatility::Low, Volatility::Medium],
            market_state: vec![MarketState::Range, MarketState::Choppy],
            playbook: vec![
                section(
                    "Structure Map",
                    &[
                        "Define accumulation + distribution zones on 15m anchored profile",
                        "Wait for liquidity grab ≥0.25% outside key range reference",
                        "Confirm with divergence on cumulative delta or TICK/TICKQ",
                    ],
                ),
                section(
                    "Execution",
                    &[
                        "Enter on engulfing candle back inside range (2m/5m)",
                        "Stop below/above liquidity wick; partial at mid-point, final at opposite range extreme",
                        "Trail stop behind structure pivots as volume tapers",
                    ],
                ),
                section(
                    "Risk Controls",
                    &[
                        "Avoid during major economic releases or opening 15 minutes",
                        "Exit if reclaimed level fails to hold for two consecutive closes",
                    ],
                ),
            ],
        },
        StrategyRecord {
            id: "midday-expansion".to_string(),
            name: "Midday Compression Expansion".to_string(),
            summary: "Exploit volatility contraction after lunch lull when order flow resets \
                      into the closing session."
                .to_string(),
            bias: vec![Bias::Bullish, Bias::Bearish, Bias::Neutral],
            volatility: vec![Volatility::Low, Volatility::Medium],
            market_state: vec![MarketState::Range, MarketState::Trend],
            playbook: vec![
                section(
                    "Setup Build",
                    &[
                        "Identify 30m compression pattern (inside bars or value overlap)",
                        "Overlay session VWAP bands and 20 EMA for slope confirmation",
                        "Use DOM or footprint to verify absorption at range edges",
                    ],
                ),
                section(
                    "Execution",
                    &[
                        "Enter on break and retest of compression boundary",
                        "Scale into second position on retest of micro-balance area",
                        "First target at 1.0x measured move; final into closing imbalance",
                    ],
                ),
                section(
                    "Risk Controls",
                    &[
                        "Reduce risk if average true range < 60% of 20-day ATR",
                        "Hard stop outside compression +/- liquidity sweep threshold",
                    ],
                ),
            ],
        },
        StrategyRecord {
            id: "closing-auction".to_string(),
            name: "Closing Auction Fade".to_string(),
            summary: "Trade end-of-day imbalances when market makers unwind during the final \
                      30 minutes."
                .to_string(),
            bias: vec![Bias::Bullish, Bias::Bearish],
            volatility: vec![Volatility::Medium, Volatility::High],
            market_state: vec![MarketState::Range, MarketState::Choppy],
            playbook: vec![
                section(
                    "Context",
                    &[
                        "Use Market Internals (ADD, VOLD) to confirm exhaustion",
                        "Plot 1m cumulative delta to detect absorption",
                        "Track imbalance from NYSE Closing Auction indications",
                    ],
                ),
                section(
                    "Execution",
                    &[
                        "Enter fade after final liquidity sweep (15:40-15:50 ET)",
                        "Stop beyond auction extreme; target VWAP or 50% retrace",
                        "Flatten by 15:58 ET to avoid auction repricing",
                    ],
                ),
                section(
                    "Risk Controls",
                    &[
                        "Skip on index rebalance dates or earnings clusters",
                        "Require session ATR > 0.8x 20-day average",
                    ],
                ),
            ],
        },
    ]
}
