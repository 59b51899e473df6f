pub mod catalog;
pub mod content;
pub mod domain;
pub mod page;
pub mod selector;
pub mod time;
pub mod widget;

pub use domain::selection::{Bias, MarketState, Selection, Volatility};
pub use domain::structure::{Catalog, PlaybookSection, StrategyRecord};
pub use selector::{recommend, Recommendation};

pub mod config {
    use anyhow::Context;

    use crate::widget::{ChartTheme, ChartWidget, DEFAULT_SYMBOL};

    const DEFAULT_PORT: u16 = 3000;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sentry_dsn: Option<String>,
        pub port: Option<String>,
        pub chart_symbol: Option<String>,
        pub chart_theme: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
                port: std::env::var("PORT").ok(),
                chart_symbol: std::env::var("CHART_SYMBOL").ok(),
                chart_theme: std::env::var("CHART_THEME").ok(),
            })
        }

        /// Listen port for the HTTP service. Only the api reads it.
        pub fn port(&self) -> anyhow::Result<u16> {
            match self.port.as_deref() {
                Some(v) => v
                    .trim()
                    .parse()
                    .with_context(|| format!("PORT must be a port number (got {v:?})")),
                None => Ok(DEFAULT_PORT),
            }
        }

        pub fn chart_widget(&self) -> anyhow::Result<ChartWidget> {
            let theme = match self.chart_theme.as_deref() {
                Some(s) => s.parse::<ChartTheme>().context("invalid CHART_THEME")?,
                None => ChartTheme::default(),
            };
            let symbol = self.chart_symbol.as_deref().unwrap_or(DEFAULT_SYMBOL);
            ChartWidget::new(symbol, theme).context("invalid CHART_SYMBOL")
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn settings(symbol: Option<&str>, theme: Option<&str>) -> Settings {
            Settings {
                sentry_dsn: None,
                port: None,
                chart_symbol: symbol.map(str::to_string),
                chart_theme: theme.map(str::to_string),
            }
        }

        #[test]
        fn port_defaults_and_parses() {
            assert_eq!(settings(None, None).port().unwrap(), 3000);

            let mut s = settings(None, None);
            s.port = Some(" 8080 ".to_string());
            assert_eq!(s.port().unwrap(), 8080);
        }

        #[test]
        fn bad_port_only_fails_when_read() {
            let mut s = settings(None, None);
            s.port = Some("abc".to_string());
            assert!(s.chart_widget().is_ok());
            let err = s.port().unwrap_err();
            assert!(err.to_string().contains("PORT must be a port number"));
        }

        #[test]
        fn chart_widget_defaults() {
            let w = settings(None, None).chart_widget().unwrap();
            assert_eq!(w, ChartWidget::default());
        }

        #[test]
        fn chart_widget_from_overrides() {
            let w = settings(Some("AMEX:SPY"), Some("light")).chart_widget().unwrap();
            assert_eq!(w.symbol(), "AMEX:SPY");
            assert_eq!(w.theme(), ChartTheme::Light);
        }

        #[test]
        fn chart_widget_rejects_bad_theme() {
            let err = settings(None, Some("neon")).chart_widget().unwrap_err();
            assert!(format!("{err:#}").contains("CHART_THEME"));
        }
    }
}
