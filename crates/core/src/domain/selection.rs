use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Volatility {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketState {
    Trend,
    Range,
    Choppy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSelectionError {
    pub field: &'static str,
    pub value: String,
}

impl fmt::Display for ParseSelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} value: {:?}", self.field, self.value)
    }
}

impl std::error::Error for ParseSelectionError {}

// Shared plumbing for the three closed filter enums: display order, names and
// case-insensitive parsing.
macro_rules! filter_enum {
    ($ty:ident, $field:literal, [$($variant:ident),+ $(,)?]) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => stringify!($variant)),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseSelectionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| ParseSelectionError {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }
    };
}

filter_enum!(Bias, "bias", [Bullish, Bearish, Neutral]);
filter_enum!(Volatility, "volatility", [Low, Medium, High]);
filter_enum!(MarketState, "market_state", [Trend, Range, Choppy]);

/// The three current filter values of one page view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub bias: Bias,
    pub volatility: Volatility,
    pub market_state: MarketState,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            bias: Bias::Bullish,
            volatility: Volatility::Medium,
            market_state: MarketState::Trend,
        }
    }
}

impl Selection {
    pub fn new(bias: Bias, volatility: Volatility, market_state: MarketState) -> Self {
        Self {
            bias,
            volatility,
            market_state,
        }
    }

    pub fn with_bias(self, bias: Bias) -> Self {
        Self { bias, ..self }
    }

    pub fn with_volatility(self, volatility: Volatility) -> Self {
        Self { volatility, ..self }
    }

    pub fn with_market_state(self, market_state: MarketState) -> Self {
        Self {
            market_state,
            ..self
        }
    }

    /// Every combination, bias-major.
    pub fn all() -> impl Iterator<Item = Selection> {
        Bias::ALL.iter().flat_map(|&bias| {
            Volatility::ALL.iter().flat_map(move |&volatility| {
                MarketState::ALL
                    .iter()
                    .map(move |&market_state| Selection::new(bias, volatility, market_state))
            })
        })
    }

    pub fn label(&self) -> String {
        format!(
            "{} · {} · {}",
            self.bias, self.volatility, self.market_state
        )
    }
}
