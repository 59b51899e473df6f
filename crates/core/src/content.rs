use crate::time::session::SessionWindow;
use serde::Serialize;

pub const TRADINGVIEW_URL: &str = "https://www.tradingview.com/";
pub const JOURNAL_TEMPLATE_URL: &str = "https://www.tradingview.com/chart/?solution=43000653767";

#[derive(Debug, Clone, Serialize)]
pub struct SessionPhase {
    pub label: &'static str,
    pub window: SessionWindow,
    pub objective: &'static str,
    pub focus: &'static [&'static str],
    pub tools: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct StructureLayer {
    pub title: &'static str,
    pub description: &'static str,
    pub bullets: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct JournalEntry {
    pub setup: &'static str,
    pub primary: &'static str,
    pub metrics: &'static [&'static str],
    pub notes: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageContent {
    pub session_phases: Vec<SessionPhase>,
    pub structure_layers: Vec<StructureLayer>,
    pub trade_journal: Vec<JournalEntry>,
}

impl PageContent {
    pub fn builtin() -> Self {
        Self {
            session_phases: session_phases(),
            structure_layers: structure_layers(),
            trade_journal: trade_journal(),
        }
    }
}

pub fn session_phases() -> Vec<SessionPhase> {
    vec![
        SessionPhase {
            label: "Pre-Market",
            window: SessionWindow::new(7, 0, 9, 20),
            objective: "Build higher timeframe narrative",
            focus: &[
                "Anchor VWAP to 04:00 ET futures open",
                "Plot overnight high/low and Asia range extremes",
                "Mark economic events with expected volatility",
            ],
            tools: &["Volume Profile HD", "Session Volume", "Economic Calendar"],
        },
        SessionPhase {
            label: "Opening Rotation",
            window: SessionWindow::new(9, 30, 10, 45),
            objective: "Define opening auction structure",
            focus: &[
                "Opening range first 15m + developing value",
                "Delta divergence & tick index confirmation",
                "Liquidity pools above/below session structure",
            ],
            tools: &["Opening Range Indicator", "CVD/Delta", "Liquidity Heatmap"],
        },
        SessionPhase {
            label: "Midday Balance",
            window: SessionWindow::new(11, 0, 13, 30),
            objective: "Monitor compression + absorption",
            focus: &[
                "Identify micro composite value areas",
                "Track regression channels for compression",
                "Record cumulative volume delta slow-down",
            ],
            tools: &["Anchored VWAP", "Regression Trend", "Volume Delta"],
        },
        SessionPhase {
            label: "Closing Auction",
            window: SessionWindow::new(14, 30, 16, 0),
            objective: "Exploit imbalance release",
            focus: &[
                "Map imbalance rate vs. VWAP bands",
                "Look for liquidity sweeps of session extremes",
                "Fade/Follow based on internals confirmation",
            ],
            tools: &["Imbalance Meter", "Breadth Indicators", "VWAP Bands"],
        },
    ]
}

pub fn structure_layers() -> Vec<StructureLayer> {
    vec![
        StructureLayer {
            title: "Bias Layer",
            description:
                "Frame price discovery by aligning daily/weekly auction with session narrative.",
            bullets: &[
                "Top-down HTF bias: Weekly → Daily → 4H order blocks",
                "Assess sessions in control: Asia, London, New York",
                "Synchronize with macro catalysts and liquidity map",
            ],
        },
        StructureLayer {
            title: "Execution Layer",
            description:
                "Translate directional thesis into repeatable execution via objective triggers.",
            bullets: &[
                "Trigger: ORB retest, VWAP reclaim, or liquidity sweep",
                "Confirm: Delta, TICK/TICKQ, book imbalance",
                "Manage: Partial on first structure break, trail behind pivots",
            ],
        },
        StructureLayer {
            title: "Risk Layer",
            description:
                "Define invalidation, risk splits, and trade management prior to execution.",
            bullets: &[
                "Hard stop: 1.2x structure width or opposite liquidity pool",
                "Risk splits: 60/40 core vs. runner allocation",
                "Session max loss: 1.5R with volatility-adjusted sizing",
            ],
        },
    ]
}

pub fn trade_journal() -> Vec<JournalEntry> {
    vec![
        JournalEntry {
            setup: "Opening Drive Continuation",
            primary: "Trend",
            metrics: &["RR ≥ 1.7", "Win% 58", "Avg Hold 32m"],
            notes: "Ideal on CPI/FOMC drift days with strong internals alignment.",
        },
        JournalEntry {
            setup: "Liquidity Sweep Reversal",
            primary: "Range",
            metrics: &["RR ≥ 2.4", "Win% 46", "Avg Hold 18m"],
            notes: "Tag impulses only when sweep >0.3% and tick divergence fires.",
        },
        JournalEntry {
            setup: "Midday Compression Expansion",
            primary: "Compression",
            metrics: &["RR ≥ 1.9", "Win% 52", "Avg Hold 41m"],
            notes: "Works best when NYSE advance/decline stabilizes near zero.",
        },
        JournalEntry {
            setup: "Closing Auction Fade",
            primary: "Auction",
            metrics: &["RR ≥ 1.6", "Win% 55", "Avg Hold 21m"],
            notes: "Avoid on triple witching or rebalance days; volatility erratic.",
        },
    ]
}
