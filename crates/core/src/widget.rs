use anyhow::ensure;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

use crate::page::escape_html;

pub const DEFAULT_SYMBOL: &str = "NASDAQ:QQQ";
pub const LOADER_SRC: &str =
    "https://s3.tradingview.com/external-embedding/embed-widget-advanced-chart.js";
pub const WIDGET_ID: &str = "intraday-structures-widget";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartTheme {
    #[default]
    Dark,
    Light,
}

impl ChartTheme {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartTheme::Dark => "dark",
            ChartTheme::Light => "light",
        }
    }
}

impl fmt::Display for ChartTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartTheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(ChartTheme::Dark),
            "light" => Ok(ChartTheme::Light),
            other => anyhow::bail!("unknown chart theme: {other:?} (expected dark or light)"),
        }
    }
}

/// Third-party advanced chart embed. Rendering is fire-and-forget: the page
/// injects the vendor loader and never reads anything back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartWidget {
    symbol: String,
    theme: ChartTheme,
}

impl Default for ChartWidget {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            theme: ChartTheme::Dark,
        }
    }
}

impl ChartWidget {
    pub fn new(symbol: &str, theme: ChartTheme) -> anyhow::Result<Self> {
        let symbol = symbol.trim();
        ensure!(!symbol.is_empty(), "chart symbol must be non-empty");
        Ok(Self {
            symbol: symbol.to_string(),
            theme,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn theme(&self) -> ChartTheme {
        self.theme
    }

    pub fn embed_config(&self) -> Value {
        json!({
            "autosize": true,
            "symbol": self.symbol,
            "interval": "15",
            "timezone": "Etc/UTC",
            "theme": self.theme.as_str(),
            "style": "2",
            "locale": "en",
            "enable_publishing": false,
            "allow_symbol_change": true,
            "withdateranges": true,
            "range": "1D",
            "calendar": true,
            "hide_volume": false,
            "hide_top_toolbar": false,
            "hide_legend": false,
            "unique_id": WIDGET_ID,
            "studies": ["STD;Bollinger Bands", "STD;Relative Strength Index", "STD;MACD"],
        })
    }

    /// Container markup plus a mount script. The script empties the container
    /// before appending the loader, so a remount replaces the previous widget.
    pub fn render(&self) -> String {
        // Any `<` could open `</script` or `<!--` inside the inline script.
        let config = self.embed_config().to_string().replace('<', "\\u003c");
        let container_id = format!("{WIDGET_ID}-container");
        format!(
            r#"<div class="tradingview-widget-container">
  <div class="tradingview-widget-container__widget" id="{container_id}" data-symbol="{symbol}" data-theme="{theme}"></div>
  <script>
  (function () {{
    var container = document.getElementById("{container_id}");
    if (!container) return;
    container.innerHTML = "";
    var script = document.createElement("script");
    script.src = "{LOADER_SRC}";
    script.type = "text/javascript";
    script.async = true;
    script.innerHTML = JSON.stringify({config});
    container.appendChild(script);
  }})();
  </script>
</div>"#,
            symbol = escape_html(&self.symbol),
            theme = self.theme,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_qqq_dark() {
        let w = ChartWidget::default();
        assert_eq!(w.symbol(), "NASDAQ:QQQ");
        assert_eq!(w.theme(), ChartTheme::Dark);
    }

    #[test]
    fn rejects_empty_symbol() {
        assert!(ChartWidget::new("  ", ChartTheme::Light).is_err());
    }

    #[test]
    fn parses_theme() {
        assert_eq!("Light".parse::<ChartTheme>().unwrap(), ChartTheme::Light);
        assert!("sepia".parse::<ChartTheme>().is_err());
    }

    #[test]
    fn embed_config_carries_symbol_and_theme() {
        let w = ChartWidget::new("NYSE:SPY", ChartTheme::Light).unwrap();
        let cfg = w.embed_config();
        assert_eq!(cfg["symbol"], "NYSE:SPY");
        assert_eq!(cfg["theme"], "light");
        assert_eq!(cfg["interval"], "15");
        assert_eq!(cfg["unique_id"], WIDGET_ID);
        assert_eq!(cfg["studies"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn render_clears_container_before_injecting() {
        let html = ChartWidget::default().render();
        let clear = html.find(r#"container.innerHTML = """#).unwrap();
        let append = html.find("container.appendChild(script)").unwrap();
        assert!(clear < append);
        assert!(html.contains(LOADER_SRC));
    }

    #[test]
    fn render_escapes_comment_openers_in_config() {
        let w = ChartWidget::new("<!--<script>", ChartTheme::Dark).unwrap();
        let html = w.render();
        assert!(!html.contains("<!--"));
        assert!(html.contains(r#""symbol":"\u003c!--\u003cscript>""#));
        assert_eq!(html.matches("</script>").count(), 1);
    }

    #[test]
    fn render_escapes_script_terminators() {
        let w = ChartWidget::new("</script><b>", ChartTheme::Dark).unwrap();
        let html = w.render();
        assert!(!html.contains("</script><b>"));
        assert!(html.contains("data-symbol=\"&lt;/script&gt;&lt;b&gt;\""));
    }
}
