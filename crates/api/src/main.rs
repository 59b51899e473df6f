use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intraday_core::content::PageContent;
use intraday_core::page::{render_page, PageView};
use intraday_core::widget::ChartWidget;
use intraday_core::{Bias, Catalog, MarketState, Selection, StrategyRecord, Volatility};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = intraday_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let state = AppState::from_settings(&settings).map_err(|e| {
        sentry_anyhow::capture_anyhow(&e);
        e
    })?;
    let port = settings.port().map_err(|e| {
        sentry_anyhow::capture_anyhow(&e);
        e
    })?;
    let app = router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_page))
        .route("/healthz", get(healthz))
        .route("/structures", get(list_structures))
        .route("/structures/:id", get(get_structure))
        .route("/recommendation", get(get_recommendation))
        .route("/recommendation/note", get(get_recommendation_note))
        .route("/content", get(get_content))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Clone)]
struct AppState {
    catalog: &'static Catalog,
    widget: Arc<ChartWidget>,
    content: Arc<PageContent>,
}

impl AppState {
    fn new(catalog: &'static Catalog, widget: ChartWidget) -> Self {
        Self {
            catalog,
            widget: Arc::new(widget),
            content: Arc::new(PageContent::builtin()),
        }
    }

    fn from_settings(settings: &intraday_core::config::Settings) -> anyhow::Result<Self> {
        let widget = settings.chart_widget()?;
        Ok(Self::new(intraday_core::catalog::builtin(), widget))
    }
}

/// Raw query params. Missing fields fall back to the default selection.
#[derive(Debug, Default, Deserialize)]
struct SelectionQuery {
    bias: Option<String>,
    volatility: Option<String>,
    market_state: Option<String>,
}

impl SelectionQuery {
    fn into_selection(self) -> Result<Selection, StatusCode> {
        let mut selection = Selection::default();
        if let Some(v) = self.bias {
            selection = selection.with_bias(parse_param::<Bias>(&v)?);
        }
        if let Some(v) = self.volatility {
            selection = selection.with_volatility(parse_param::<Volatility>(&v)?);
        }
        if let Some(v) = self.market_state {
            selection = selection.with_market_state(parse_param::<MarketState>(&v)?);
        }
        Ok(selection)
    }
}

fn parse_param<T>(value: &str) -> Result<T, StatusCode>
where
    T: std::str::FromStr<Err = intraday_core::domain::selection::ParseSelectionError>,
{
    value.parse::<T>().map_err(|e| {
        tracing::debug!(error = %e, "rejecting selection query");
        StatusCode::BAD_REQUEST
    })
}

async fn get_page(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Html<String>, StatusCode> {
    let selection = query.into_selection()?;
    let view = PageView::new(state.catalog, selection, &state.widget, &state.content);
    Ok(Html(render_page(&view)))
}

async fn list_structures(State(state): State<AppState>) -> Json<Vec<StrategyRecord>> {
    Json(state.catalog.records().to_vec())
}

async fn get_structure(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StrategyRecord>, StatusCode> {
    state
        .catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[derive(Debug, Serialize)]
struct ApiRecommendation {
    selection: Selection,
    label: String,
    matched: bool,
    structure: StrategyRecord,
}

async fn get_recommendation(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<ApiRecommendation>, StatusCode> {
    let selection = query.into_selection()?;
    let rec = state.catalog.recommend(selection);

    Ok(Json(ApiRecommendation {
        selection,
        label: selection.label(),
        matched: rec.matched,
        structure: rec.structure.clone(),
    }))
}

async fn get_recommendation_note(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let selection = query.into_selection()?;
    let note = state.catalog.recommend(selection).structure.to_note();
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], note))
}

async fn get_content(State(state): State<AppState>) -> Json<PageContent> {
    Json(state.content.as_ref().clone())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
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
