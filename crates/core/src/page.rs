use std::fmt::Write as _;

use crate::content::{PageContent, JOURNAL_TEMPLATE_URL, TRADINGVIEW_URL};
use crate::domain::selection::{Bias, MarketState, Selection, Volatility};
use crate::domain::structure::Catalog;
use crate::selector::Recommendation;
use crate::widget::ChartWidget;

pub const STYLES: &str = r#"
:root {
  --bg: #020617;
  --panel: rgba(2, 6, 23, 0.7);
  --panel-2: rgba(15, 23, 42, 0.6);
  --border: rgba(30, 41, 59, 0.8);
  --text: #f8fafc;
  --text-dim: #cbd5e1;
  --text-muted: #94a3b8;
  --cyan: #67e8f9;
  --emerald: #6ee7b7;
  --indigo: #a5b4fc;
  --radius: 24px;
  --font-body: "Inter", system-ui, -apple-system, sans-serif;
}
* { box-sizing: border-box; }
body { margin: 0; background: var(--bg); color: var(--text); font-family: var(--font-body); }
main { max-width: 80rem; margin: 0 auto; padding: 48px 24px 96px; display: flex; flex-direction: column; gap: 64px; }
a { color: inherit; text-decoration: none; }
.eyebrow { font-size: 12px; text-transform: uppercase; letter-spacing: 0.35em; color: var(--cyan); margin: 0; }
.eyebrow.emerald { color: var(--emerald); }
.eyebrow.indigo { color: var(--indigo); }
.panel { border: 1px solid var(--border); background: var(--panel); border-radius: var(--radius); padding: 32px; }
.card { border: 1px solid var(--border); background: var(--panel-2); border-radius: 16px; padding: 20px; }
.grid-2 { display: grid; gap: 20px; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); }
.grid-3 { display: grid; gap: 20px; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); }
.pill { display: inline-block; border: 1px solid var(--border); border-radius: 999px; padding: 4px 12px; font-size: 12px; color: var(--text-dim); margin: 0 6px 6px 0; }
.pill.cta { border-color: rgba(103, 232, 249, 0.4); color: var(--cyan); }
.option { display: inline-block; border-radius: 999px; padding: 8px 16px; font-size: 14px; border: 1px solid var(--border); color: var(--text-dim); margin: 0 6px 6px 0; }
.option.active.bias { background: rgba(6, 182, 212, 0.9); color: var(--bg); }
.option.active.volatility { background: rgba(16, 185, 129, 0.9); color: var(--bg); }
.option.active.market-state { background: rgba(99, 102, 241, 0.9); color: var(--bg); }
ul.steps { list-style: none; padding: 0; margin: 12px 0 0; display: flex; flex-direction: column; gap: 8px; font-size: 14px; color: var(--text-dim); }
ul.steps li { border: 1px solid var(--border); border-radius: 12px; padding: 8px 12px; }
p.dim { color: var(--text-dim); font-size: 14px; }
.journal { width: 100%; border-collapse: collapse; font-size: 14px; }
.journal th { text-align: left; font-size: 12px; text-transform: uppercase; letter-spacing: 0.3em; color: var(--text-dim); padding: 12px 24px; }
.journal td { padding: 16px 24px; border-top: 1px solid var(--border); vertical-align: top; }
.journal code { border: 1px solid var(--border); border-radius: 999px; padding: 2px 8px; font-size: 12px; color: var(--cyan); margin-right: 6px; }
.tradingview-widget-container__widget { height: 420px; }
"#;

/// Everything one page view renders: the current selection, its
/// recommendation and the static content around it.
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    pub recommendation: Recommendation<'a>,
    pub widget: &'a ChartWidget,
    pub content: &'a PageContent,
}

impl<'a> PageView<'a> {
    pub fn new(
        catalog: &'a Catalog,
        selection: Selection,
        widget: &'a ChartWidget,
        content: &'a PageContent,
    ) -> Self {
        Self {
            recommendation: catalog.recommend(selection),
            widget,
            content,
        }
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Query string that reproduces `selection` on the page route.
pub fn selection_query(selection: &Selection) -> String {
    format!(
        "?bias={}&volatility={}&market_state={}",
        selection.bias, selection.volatility, selection.market_state
    )
}

pub fn render_page(view: &PageView<'_>) -> String {
    let mut out = String::with_capacity(32 * 1024);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str("<title>Intraday Structures</title>\n");
    let _ = write!(out, "<style>{STYLES}</style>\n</head>\n<body>\n<main>\n");

    render_hero(&mut out, view.widget);
    render_session_blueprint(&mut out, view.content);
    out.push_str("<section class=\"grid-2\">\n");
    render_planner(&mut out, &view.recommendation);
    out.push_str("<div>\n");
    render_execution_stack(&mut out, view.content);
    render_playbook_export(&mut out);
    out.push_str("</div>\n</section>\n");
    render_journal(&mut out, view.content);

    out.push_str("</main>\n</body>\n</html>\n");
    out
}

fn render_hero(out: &mut String, widget: &ChartWidget) {
    let _ = write!(
        out,
        r#"<section class="grid-2">
<div>
<p class="eyebrow">Intraday Structures</p>
<h1>A precision framework for TradingView based intraday execution.</h1>
<p class="dim">Align directional bias, order flow, and liquidity to map your trading day. Built for traders who demand clarity before the bell and disciplined execution after it.</p>
<div><span class="pill">Session Layouts</span><span class="pill">Liquidity Mapping</span><span class="pill">Execution Playbooks</span></div>
</div>
<div class="panel">{}</div>
</section>
"#,
        widget.render()
    );
}

fn render_session_blueprint(out: &mut String, content: &PageContent) {
    let _ = write!(
        out,
        r#"<section class="panel">
<p class="eyebrow emerald">Session Blueprint</p>
<h2>Structure each session before the bell rings.</h2>
<p class="dim">Map the auction, liquidity, and order flow context at a glance. Each block links to TradingView tools so you can replicate the view instantly.</p>
<a class="pill cta" href="{TRADINGVIEW_URL}" target="_blank" rel="noreferrer">Launch TradingView</a>
<div class="grid-2">
"#
    );
    for phase in &content.session_phases {
        let _ = write!(
            out,
            "<div class=\"card\">\n<p class=\"eyebrow\">{}</p><span class=\"pill\">{}</span>\n<h3>{}</h3>\n",
            escape_html(phase.label),
            escape_html(&phase.window.to_string()),
            escape_html(phase.objective)
        );
        render_steps(out, phase.focus.iter().copied());
        out.push_str("<div>");
        for tool in phase.tools {
            let _ = write!(out, "<span class=\"pill\">{}</span>", escape_html(tool));
        }
        out.push_str("</div>\n</div>\n");
    }
    out.push_str("</div>\n</section>\n");
}

fn render_planner(out: &mut String, rec: &Recommendation<'_>) {
    let selection = rec.selection;
    out.push_str(
        r#"<section class="panel" id="structure-planner">
<p class="eyebrow">Playbook Builder</p>
<h2>Structure Planner</h2>
<p class="dim">Align bias, volatility, and market state to receive an execution playbook you can paste directly into your TradingView notes.</p>
<div class="grid-3">
"#,
    );

    render_options(
        out,
        "Bias",
        "bias",
        Bias::ALL
            .iter()
            .map(|&b| (b.as_str(), b == selection.bias, selection.with_bias(b))),
    );
    render_options(
        out,
        "Volatility",
        "volatility",
        Volatility::ALL.iter().map(|&v| {
            (
                v.as_str(),
                v == selection.volatility,
                selection.with_volatility(v),
            )
        }),
    );
    render_options(
        out,
        "Market State",
        "market-state",
        MarketState::ALL.iter().map(|&m| {
            (
                m.as_str(),
                m == selection.market_state,
                selection.with_market_state(m),
            )
        }),
    );
    out.push_str("</div>\n");

    let structure = rec.structure;
    let _ = write!(
        out,
        r#"<article class="card" data-structure-id="{id}" data-matched="{matched}">
<p class="eyebrow">Recommended Structure</p>
<h3>{name}</h3>
<span class="pill cta">{label}</span>
<p class="dim">{summary}</p>
<div class="grid-3">
"#,
        id = escape_html(&structure.id),
        matched = rec.matched,
        name = escape_html(&structure.name),
        label = escape_html(&selection.label()),
        summary = escape_html(&structure.summary),
    );
    for section in &structure.playbook {
        let _ = write!(out, "<div class=\"card\">\n<h4>{}</h4>\n", escape_html(&section.label));
        render_steps(out, section.steps.iter().map(String::as_str));
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n</article>\n</section>\n");
}

fn render_options<'s>(
    out: &mut String,
    heading: &str,
    class: &str,
    options: impl Iterator<Item = (&'s str, bool, Selection)>,
) {
    let _ = write!(out, "<div>\n<h3 class=\"eyebrow\">{heading}</h3>\n<div>");
    for (name, active, target) in options {
        let state = if active { " active" } else { "" };
        let _ = write!(
            out,
            "<a class=\"option {class}{state}\" href=\"/{}#structure-planner\">{name}</a>",
            escape_html(&selection_query(&target)),
        );
    }
    out.push_str("</div>\n</div>\n");
}

fn render_steps<'s>(out: &mut String, steps: impl Iterator<Item = &'s str>) {
    out.push_str("<ul class=\"steps\">\n");
    for step in steps {
        let _ = writeln!(out, "<li>{}</li>", escape_html(step));
    }
    out.push_str("</ul>\n");
}

fn render_execution_stack(out: &mut String, content: &PageContent) {
    out.push_str(
        r#"<section class="panel">
<p class="eyebrow indigo">Execution Stack</p>
<h2>Layer your decision making.</h2>
<p class="dim">Each card defines foundational components to prepare before the session starts. Treat them as building blocks for your TradingView templates.</p>
"#,
    );
    for layer in &content.structure_layers {
        let _ = write!(
            out,
            "<div class=\"card\">\n<h3>{}</h3>\n<p class=\"dim\">{}</p>\n",
            escape_html(layer.title),
            escape_html(layer.description)
        );
        render_steps(out, layer.bullets.iter().copied());
        out.push_str("</div>\n");
    }
    out.push_str("</section>\n");
}

fn render_playbook_export(out: &mut String) {
    out.push_str(
        r#"<section class="panel">
<p class="eyebrow">Playbook Export</p>
<h3>Copy to TradingView Notes</h3>
<p class="dim">Paste the checklist into a TradingView note on your symbol to keep the structure visible beside the live chart.</p>
<ol>
<li>Open TradingView &gt; Right sidebar &gt; Notes</li>
<li>Create a new note with the structure output</li>
<li>Pair with Chart Layouts: Premarket, Opening, Midday, Closing</li>
</ol>
</section>
"#,
    );
}

fn render_journal(out: &mut String, content: &PageContent) {
    let _ = write!(
        out,
        r#"<section class="panel">
<p class="eyebrow">Performance Tracker</p>
<h2>Maintain your structured playbooks.</h2>
<p class="dim">Log each execution and review weekly to retire underperforming structures and scale the ones with edge.</p>
<a class="pill cta" href="{JOURNAL_TEMPLATE_URL}" target="_blank" rel="noreferrer">Load Execution Journal Template</a>
<table class="journal">
<thead><tr><th>Setup</th><th>Structure</th><th>Metrics</th><th>Notes</th></tr></thead>
<tbody>
"#
    );
    for entry in &content.trade_journal {
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}</td><td>",
            escape_html(entry.setup),
            escape_html(entry.primary)
        );
        for metric in entry.metrics {
            let _ = write!(out, "<code>{}</code>", escape_html(metric));
        }
        let _ = writeln!(out, "</td><td>{}</td></tr>", escape_html(entry.notes));
    }
    out.push_str("</tbody>\n</table>\n</section>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn render(selection: Selection) -> String {
        let widget = ChartWidget::default();
        let content = PageContent::builtin();
        let view = PageView::new(catalog::builtin(), selection, &widget, &content);
        render_page(&view)
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn renders_default_recommendation() {
        let html = render(Selection::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h3>Opening Drive Continuation</h3>"));
        assert!(html.contains("data-matched=\"true\""));
        assert!(html.contains("Bullish · Medium · Trend"));
    }

    #[test]
    fn renders_fallback_flag() {
        let html = render(Selection::new(Bias::Neutral, Volatility::High, MarketState::Trend));
        assert!(html.contains("data-structure-id=\"opening-drive\" data-matched=\"false\""));
    }

    #[test]
    fn option_links_change_one_field_only() {
        let html = render(Selection::new(Bias::Bearish, Volatility::Low, MarketState::Range));
        // Changing bias keeps volatility and market state.
        assert!(html.contains("href=\"/?bias=Neutral&amp;volatility=Low&amp;market_state=Range#structure-planner\""));
        // Changing market state keeps bias and volatility.
        assert!(html.contains("href=\"/?bias=Bearish&amp;volatility=Low&amp;market_state=Choppy#structure-planner\""));
        assert!(html.contains("class=\"option bias active\" href=\"/?bias=Bearish&amp;volatility=Low&amp;market_state=Range"));
    }

    #[test]
    fn renders_all_static_sections() {
        let html = render(Selection::default());
        for needle in [
            "Session Blueprint",
            "07:00 – 09:20 ET",
            "Execution Stack",
            "Playbook Export",
            "Performance Tracker",
            "RR ≥ 2.4",
            JOURNAL_TEMPLATE_URL,
        ] {
            assert!(html.contains(needle), "missing {needle}");
        }
        assert_eq!(html.matches("tradingview-widget-container__widget").count(), 2);
    }
}
