use crate::domain::selection::{Bias, MarketState, Selection, Volatility};
use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybookSection {
    pub label: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyRecord {
    pub id: String,
    pub name: String,
    pub summary: String,
    pub bias: Vec<Bias>,
    pub volatility: Vec<Volatility>,
    pub market_state: Vec<MarketState>,
    pub playbook: Vec<PlaybookSection>,
}

impl StrategyRecord {
    pub fn applies_to(&self, selection: &Selection) -> bool {
        self.bias.contains(&selection.bias)
            && self.volatility.contains(&selection.volatility)
            && self.market_state.contains(&selection.market_state)
    }

    /// Plain-text checklist for a TradingView note.
    pub fn to_note(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.name);
        let _ = writeln!(out, "{}", self.summary);
        let _ = writeln!(
            out,
            "Conditions: {} | {} | {}",
            join(&self.bias),
            join(&self.volatility),
            join(&self.market_state)
        );
        for section in &self.playbook {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", section.label);
            for (i, step) in section.steps.iter().enumerate() {
                let _ = writeln!(out, "{}. {}", i + 1, step);
            }
        }
        out
    }
}

fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("/")
}

/// Ordered, non-empty set of strategy records. The first record is the fallback.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<StrategyRecord>,
}

impl Catalog {
    pub fn new(records: Vec<StrategyRecord>) -> anyhow::Result<Self> {
        ensure!(!records.is_empty(), "catalog must contain at least one record");

        let mut seen_ids = BTreeSet::<&str>::new();
        for record in &records {
            validate_record(record)
                .with_context(|| format!("invalid catalog record {:?}", record.id))?;
            ensure!(
                seen_ids.insert(record.id.as_str()),
                "duplicate catalog id: {}",
                record.id
            );
        }

        Ok(Self { records })
    }

    // Callers guarantee a non-empty, validated record list.
    pub(crate) fn new_unchecked(records: Vec<StrategyRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[StrategyRecord] {
        &self.records
    }

    pub fn first(&self) -> &StrategyRecord {
        &self.records[0]
    }

    pub fn get(&self, id: &str) -> Option<&StrategyRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

fn validate_record(record: &StrategyRecord) -> anyhow::Result<()> {
    ensure!(!record.id.trim().is_empty(), "id must be non-empty");
    ensure!(!record.name.trim().is_empty(), "name must be non-empty");
    ensure!(!record.bias.is_empty(), "bias set must be non-empty");
    ensure!(!record.volatility.is_empty(), "volatility set must be non-empty");
    ensure!(
        !record.market_state.is_empty(),
        "market_state set must be non-empty"
    );
    Ok(())
}
