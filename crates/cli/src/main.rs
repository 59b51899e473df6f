use anyhow::Context;
use chrono::NaiveTime;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intraday_core::content::{session_phases, PageContent};
use intraday_core::page::{render_page, PageView};
use intraday_core::time::session::phase_at;
use intraday_core::widget::{ChartTheme, ChartWidget};
use intraday_core::{Bias, MarketState, Selection, Volatility};

#[derive(Debug, Parser)]
#[command(name = "intraday_cli")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend a structure for the given filters.
    Recommend {
        #[arg(long, default_value = "Bullish")]
        bias: Bias,

        #[arg(long, default_value = "Medium")]
        volatility: Volatility,

        #[arg(long, default_value = "Trend")]
        market_state: MarketState,

        /// Print the recommendation as JSON.
        #[arg(long, conflicts_with = "note")]
        json: bool,

        /// Print the playbook as a TradingView note.
        #[arg(long)]
        note: bool,
    },

    /// List catalog structures in priority order.
    Structures,

    /// Show the session phase at an Eastern time (HH:MM).
    Phase {
        #[arg(long, value_parser = parse_time)]
        at: NaiveTime,
    },

    /// Write the page with the default selection to a static HTML file.
    Export {
        #[arg(long)]
        out: PathBuf,

        /// Chart symbol. Defaults to CHART_SYMBOL or NASDAQ:QQQ.
        #[arg(long)]
        symbol: Option<String>,

        /// Chart theme (dark|light). Defaults to CHART_THEME or dark.
        #[arg(long)]
        theme: Option<ChartTheme>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = intraday_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let result = run(args.command, &settings);
    if let Err(err) = &result {
        sentry_anyhow::capture_anyhow(err);
    }
    result
}

fn run(command: Command, settings: &intraday_core::config::Settings) -> anyhow::Result<()> {
    let catalog = intraday_core::catalog::builtin();

    match command {
        Command::Recommend {
            bias,
            volatility,
            market_state,
            json,
            note,
        } => {
            let rec = catalog.recommend(Selection::new(bias, volatility, market_state));
            if json {
                println!("{}", serde_json::to_string_pretty(&rec)?);
            } else if note {
                print!("{}", rec.structure.to_note());
            } else {
                let marker = if rec.matched { "" } else { " (fallback)" };
                println!("{}: {}{}", rec.selection.label(), rec.structure.name, marker);
                println!("{}", rec.structure.summary);
            }
        }
        Command::Structures => {
            for (i, record) in catalog.records().iter().enumerate() {
                println!("{}. {} ({})", i + 1, record.name, record.id);
            }
        }
        Command::Phase { at } => match phase_at(&session_phases(), at) {
            Some(phase) => println!("{} [{}]: {}", phase.label, phase.window, phase.objective),
            None => println!("{} ET is outside every session phase", at.format("%H:%M")),
        },
        Command::Export { out, symbol, theme } => {
            let widget = export_widget(settings, symbol, theme)?;
            let content = PageContent::builtin();
            let view = PageView::new(catalog, Selection::default(), &widget, &content);
            std::fs::write(&out, render_page(&view))
                .with_context(|| format!("write {} failed", out.display()))?;
            tracing::info!(out = %out.display(), symbol = widget.symbol(), "exported page");
        }
    }

    Ok(())
}

fn export_widget(
    settings: &intraday_core::config::Settings,
    symbol: Option<String>,
    theme: Option<ChartTheme>,
) -> anyhow::Result<ChartWidget> {
    let base = settings.chart_widget()?;
    let symbol = symbol.unwrap_or_else(|| base.symbol().to_string());
    ChartWidget::new(&symbol, theme.unwrap_or(base.theme()))
}

fn parse_time(s: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").with_context(|| format!("expected HH:MM, got {s:?}"))
}

fn init_sentry(settings: &intraday_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> intraday_core::config::Settings {
        intraday_core::config::Settings {
            sentry_dsn: None,
            port: None,
            chart_symbol: None,
            chart_theme: None,
        }
    }

    #[test]
    fn recommend_defaults_match_page_defaults() {
        let args = Args::try_parse_from(["intraday_cli", "recommend"]).unwrap();
        let Command::Recommend {
            bias,
            volatility,
            market_state,
            ..
        } = args.command
        else {
            panic!("expected recommend");
        };
        assert_eq!(Selection::new(bias, volatility, market_state), Selection::default());
    }

    #[test]
    fn recommend_parses_filters_case_insensitively() {
        let args = Args::try_parse_from([
            "intraday_cli",
            "recommend",
            "--bias",
            "neutral",
            "--volatility",
            "low",
            "--market-state",
            "choppy",
        ])
        .unwrap();
        let Command::Recommend { bias, market_state, .. } = args.command else {
            panic!("expected recommend");
        };
        assert_eq!(bias, Bias::Neutral);
        assert_eq!(market_state, MarketState::Choppy);
    }

    #[test]
    fn rejects_unknown_filter() {
        assert!(Args::try_parse_from(["intraday_cli", "recommend", "--bias", "up"]).is_err());
    }

    #[test]
    fn json_and_note_conflict() {
        assert!(Args::try_parse_from(["intraday_cli", "recommend", "--json", "--note"]).is_err());
    }

    #[test]
    fn phase_parses_time() {
        let args = Args::try_parse_from(["intraday_cli", "phase", "--at", "09:45"]).unwrap();
        let Command::Phase { at } = args.command else {
            panic!("expected phase");
        };
        assert_eq!(at, NaiveTime::from_hms_opt(9, 45, 0).unwrap());
        assert!(Args::try_parse_from(["intraday_cli", "phase", "--at", "9am"]).is_err());
    }

    #[test]
    fn export_flags_override_settings() {
        let w = export_widget(&settings(), Some("NYSE:SPY".into()), Some(ChartTheme::Light)).unwrap();
        assert_eq!(w.symbol(), "NYSE:SPY");
        assert_eq!(w.theme(), ChartTheme::Light);

        let w = export_widget(&settings(), None, None).unwrap();
        assert_eq!(w, ChartWidget::default());
    }

    #[test]
    fn server_port_does_not_affect_commands() {
        let mut s = settings();
        s.port = Some("abc".to_string());
        assert!(run(Command::Structures, &s).is_ok());
        assert!(run(Command::Phase { at: NaiveTime::from_hms_opt(10, 0, 0).unwrap() }, &s).is_ok());
    }

    #[test]
    fn export_writes_html_file() {
        let out = std::env::temp_dir().join(format!("intraday_export_{}.html", std::process::id()));
        run(
            Command::Export {
                out: out.clone(),
                symbol: None,
                theme: None,
            },
            &settings(),
        )
        .unwrap();
        let html = std::fs::read_to_string(&out).unwrap();
        let _ = std::fs::remove_file(&out);
        assert!(html.contains("Opening Drive Continuation"));
    }
}
