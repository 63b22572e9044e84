use actix_web::{get, http::StatusCode, web, HttpResponse, ResponseError};
use bolsa_series::{self as series, catalog, DateRange, Error};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::AppState;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Adapter from the series-layer taxonomy to HTTP statuses. The front end
/// shows the `error` string as the failed chart's state instead of leaving
/// a stale trace.
#[derive(Debug)]
pub struct ApiError(Error);

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            Error::UnknownMetric(_) | Error::UnknownTicker(_) | Error::EmptyResult(_) => {
                StatusCode::NOT_FOUND
            }
            Error::InvalidRange { .. } => StatusCode::BAD_REQUEST,
            Error::Pool(_) | Error::CreatePool(_) | Error::Store(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Ticker universe of the session
///
/// ```json
/// [ "MGLU3", "PETR3", "VALE3" ]
/// ```
#[utoipa::path(
    get,
    path = "/tickers",
    responses(
        (
            status = 200, description = "Uppercased ticker symbols enumerated from the store at startup",
            body = [String], content_type = "application/json",
            example = json!(["MGLU3", "PETR3", "VALE3"])
        )
    )
)]
#[get("/tickers")]
pub async fn tickers(state: web::Data<AppState>) -> web::Json<Vec<String>> {
    web::Json(state.universe.display_names())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// One plottable metric option for the dropdown.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct MetricOption {
    key: String,
    label: String,
    derived: bool,
}

#[utoipa::path(
    get,
    path = "/metrics",
    responses(
        (
            status = 200, description = "The metric catalog: stable key, display label, raw/derived kind",
            body = [MetricOption], content_type = "application/json",
            example = json!([
                { "key": "close", "label": "Fechamento", "derived": false },
                { "key": "daily_return", "label": "Retorno Diário", "derived": true }
            ])
        )
    )
)]
#[get("/metrics")]
pub async fn metrics() -> web::Json<Vec<MetricOption>> {
    let options = catalog::CATALOG
        .iter()
        .map(|metric| MetricOption {
            key: metric.key.to_string(),
            label: metric.label.to_string(),
            derived: metric.is_derived(),
        })
        .collect();
    web::Json(options)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// One chart trace: dates and values positionally aligned.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SeriesDto {
    name: String,
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
    render_mode: String,
}

impl From<series::Series> for SeriesDto {
    fn from(series: series::Series) -> Self {
        Self {
            name: series.name,
            dates: series.dates,
            values: series.values,
            render_mode: series.render_mode.as_str().to_string(),
        }
    }
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct HistoricalParams {
    /// Comma-separated tickers, in selection order.
    tickers: String,
    /// Window start, inclusive.
    start: NaiveDate,
    /// Window end, inclusive.
    end: NaiveDate,
    /// Metric key from the catalog, e.g. `close` or `daily_return`.
    metric: String,
}

#[utoipa::path(
    get,
    path = "/series/historical",
    params(HistoricalParams),
    responses(
        (
            status = 200, description = "One trace per selected ticker; empty sequences when a ticker has no rows in range",
            body = [SeriesDto], content_type = "application/json",
            example = json!([
                {
                    "name": "PETR3",
                    "dates": ["2021-01-04", "2021-01-05"],
                    "values": [28.44, 28.90],
                    "render_mode": "line"
                }
            ])
        ),
        (status = 400, description = "Inverted date range"),
        (status = 404, description = "Unknown ticker or metric key"),
        (status = 502, description = "Store unreachable or query failed")
    )
)]
#[get("/series/historical")]
pub async fn historical(
    params: web::Query<HistoricalParams>,
    state: web::Data<AppState>,
) -> Result<web::Json<Vec<SeriesDto>>, ApiError> {
    let range = DateRange::new(params.start, params.end)?;
    let selection: Vec<String> = params
        .tickers
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    let traces =
        series::build_historical(&state.store, &state.universe, &selection, range, &params.metric)
            .await?;
    Ok(web::Json(traces.into_iter().map(SeriesDto::from).collect()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Drawing primitive for the OHLC endpoint; the underlying query is
/// identical for both.
#[derive(Deserialize, Clone, Copy, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    Candlestick,
    Ohlc,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct OhlcDto {
    name: String,
    dates: Vec<NaiveDate>,
    low: Vec<f64>,
    open: Vec<f64>,
    close: Vec<f64>,
    high: Vec<f64>,
    render_mode: String,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct OhlcParams {
    /// Window start, inclusive.
    start: NaiveDate,
    /// Window end, inclusive.
    end: NaiveDate,
    /// Drawing primitive; defaults to candlestick.
    mode: Option<ChartMode>,
}

#[utoipa::path(
    get,
    path = "/series/ohlc/{ticker}",
    params(
        ("ticker", description = "Stock ticker symbol, case-insensitive"),
        OhlcParams
    ),
    responses(
        (
            status = 200, description = "Low/open/close/high sequences aligned by date; a single-point window is valid",
            body = OhlcDto, content_type = "application/json"
        ),
        (status = 400, description = "Inverted date range"),
        (status = 404, description = "Unknown ticker, or no rows in range"),
        (status = 502, description = "Store unreachable or query failed")
    )
)]
#[get("/series/ohlc/{ticker}")]
pub async fn ohlc(
    path: web::Path<String>,
    params: web::Query<OhlcParams>,
    state: web::Data<AppState>,
) -> Result<web::Json<OhlcDto>, ApiError> {
    let range = DateRange::new(params.start, params.end)?;
    let ticker = path.into_inner();
    let ohlc = series::build_ohlc(&state.store, &state.universe, &ticker, range).await?;

    let render_mode = match params.mode.unwrap_or(ChartMode::Candlestick) {
        ChartMode::Candlestick => series::RenderMode::Candlestick,
        ChartMode::Ohlc => series::RenderMode::Ohlc,
    };
    Ok(web::Json(OhlcDto {
        name: ohlc.name,
        dates: ohlc.dates,
        low: ohlc.low,
        open: ohlc.open,
        close: ohlc.close,
        high: ohlc.high,
        render_mode: render_mode.as_str().to_string(),
    }))
}
