mod payload;
pub mod report;

use axum::{
    Router,
    extract::{Json, Query},
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::cli::{CompoundArgs, InvestmentArgs, LoanArgs, TradingArgs};
use crate::core::InputError;
use payload::{CompoundPayload, InvestmentPayload, LoanPayload, TradingPayload};
use report::{compound_report, investment_report, loan_report, trading_report};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/compound",
            get(compound_get_handler).post(compound_post_handler),
        )
        .route(
            "/api/investment",
            get(investment_get_handler).post(investment_post_handler),
        )
        .route("/api/loan", get(loan_get_handler).post(loan_post_handler))
        .route(
            "/api/trading",
            get(trading_get_handler).post(trading_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "calculator HTTP API listening");
    info!("local access: http://127.0.0.1:{}/", addr.port());

    axum::serve(listener, router()).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn compound_get_handler(Query(payload): Query<CompoundPayload>) -> Response {
    compound_response(payload)
}

async fn compound_post_handler(Json(payload): Json<CompoundPayload>) -> Response {
    compound_response(payload)
}

async fn investment_get_handler(Query(payload): Query<InvestmentPayload>) -> Response {
    investment_response(payload)
}

async fn investment_post_handler(Json(payload): Json<InvestmentPayload>) -> Response {
    investment_response(payload)
}

async fn loan_get_handler(Query(payload): Query<LoanPayload>) -> Response {
    loan_response(payload)
}

async fn loan_post_handler(Json(payload): Json<LoanPayload>) -> Response {
    loan_response(payload)
}

async fn trading_get_handler(Query(payload): Query<TradingPayload>) -> Response {
    trading_response(payload)
}

async fn trading_post_handler(Json(payload): Json<TradingPayload>) -> Response {
    trading_response(payload)
}

fn compound_response(payload: CompoundPayload) -> Response {
    let outcome = CompoundArgs::try_from(payload).and_then(|args| compound_report(&args));
    projection_response("compound", outcome)
}

fn investment_response(payload: InvestmentPayload) -> Response {
    let outcome = InvestmentArgs::try_from(payload).and_then(|args| investment_report(&args));
    projection_response("investment", outcome)
}

fn loan_response(payload: LoanPayload) -> Response {
    let outcome = LoanArgs::try_from(payload).and_then(|args| loan_report(&args));
    projection_response("loan", outcome)
}

fn trading_response(payload: TradingPayload) -> Response {
    let outcome = TradingArgs::try_from(payload).and_then(|args| trading_report(&args));
    projection_response("trading", outcome)
}

/// A declined projection is reported to the page, which keeps its previous output.
fn projection_response<T: Serialize>(scenario: &str, outcome: Result<T, InputError>) -> Response {
    match outcome {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(err) => {
            warn!(scenario, error = %err, "projection declined");
            error_response(StatusCode::UNPROCESSABLE_ENTITY, &err.to_string())
        }
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declined_projection_is_unprocessable_and_not_cached() {
        let args = TradingArgs {
            capital: 0.0,
            ..TradingArgs::default()
        };
        let response = projection_response("trading", trading_report(&args));
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL),
            Some(&HeaderValue::from_static("no-store"))
        );
    }

    #[test]
    fn empty_request_body_is_declined() {
        let response = compound_response(CompoundPayload::default());
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = trading_response(TradingPayload::default());
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn successful_projection_is_ok_json() {
        let response = projection_response("loan", loan_report(&LoanArgs::default()));
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("application/json"));
    }

    #[test]
    fn trading_report_serialization_contains_expected_fields() {
        let report = trading_report(&TradingArgs::default()).expect("defaults are valid");
        let json = serde_json::to_string(&report).expect("report should serialize");
        assert!(json.contains("\"totalAccounts\""));
        assert!(json.contains("\"breakevenDay\":null"));
        assert!(json.contains("\"series\""));
        assert!(json.contains("\"kind\":\"accounts-opened\""));
        assert!(json.contains("\"message\""));
    }

    #[test]
    fn loan_report_serialization_flattens_rows() {
        let report = loan_report(&LoanArgs::default()).expect("defaults are valid");
        let json = serde_json::to_value(&report).expect("report should serialize");
        let first = &json["rows"][0];
        assert_eq!(first["month"], 1);
        assert!(first["openingBalance"].is_number());
        assert!(first["text"]["installment"].is_string());
        assert!(json["formula"]["formula"].is_string());
    }

    #[test]
    fn growth_report_serialization_uses_camel_case() {
        let report = compound_report(&CompoundArgs::default()).expect("defaults are valid");
        let json = serde_json::to_value(&report).expect("report should serialize");
        assert!(json["finalBalance"].is_number());
        assert_eq!(json["series"][0]["label"], "Năm 0");
        assert!(json["summary"]["totalInterest"].is_string());
    }
}
