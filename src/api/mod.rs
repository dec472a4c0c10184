use axum::{
    Router,
    extract::{Json, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::Read;
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{CalcError, Calculation, CalculationKind, CalculationResult, SummaryLine};

#[derive(Parser, Debug)]
#[command(
    name = "fincalc",
    about = "Personal-finance calculators: mortgages, loans, tax, savings growth, BMI and pay"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "Serve the calculators as a JSON HTTP API")]
    Serve(ServeConfig),
    #[command(about = "Evaluate one calculation request and print the result")]
    Calc {
        #[arg(help = "Request JSON, e.g. '{\"kind\":\"bmi\",\"input\":{}}', or - to read stdin")]
        request: String,
        #[arg(long, help = "Print formatted headline figures instead of JSON")]
        summary: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    #[arg(long, default_value = "0.0.0.0", help = "Address to bind")]
    pub host: IpAddr,
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub calculation: CalculationResult,
    pub summary: Vec<SummaryLine>,
}

#[derive(Debug, Serialize)]
struct CalculatorsResponse {
    calculators: Vec<CalculatorInfo>,
}

#[derive(Debug, Serialize)]
struct CalculatorInfo {
    kind: CalculationKind,
    currency: Option<crate::core::Currency>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn calculation_from_json(json: &str) -> Result<Calculation, String> {
    serde_json::from_str::<Calculation>(json)
        .map_err(|e| format!("Invalid calculation JSON payload: {e}"))
}

pub fn run_calculation(calculation: &Calculation) -> Result<CalculateResponse, CalcError> {
    let kind = calculation.kind();
    debug!(kind = kind.as_str(), "evaluating calculation");

    match calculation.evaluate() {
        Ok(result) => Ok(CalculateResponse {
            summary: result.summary(),
            calculation: result,
        }),
        Err(err) => {
            warn!(kind = kind.as_str(), error = %err, "calculation rejected");
            Err(err)
        }
    }
}

pub fn run_calc_command(request: &str, summary: bool) -> Result<String, String> {
    let json = if request == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Failed to read request from stdin: {e}"))?;
        buf
    } else {
        request.to_string()
    };

    let calculation = calculation_from_json(&json)?;
    let response = run_calculation(&calculation).map_err(|e| e.to_string())?;

    if summary {
        return Ok(response
            .summary
            .iter()
            .map(|line| format!("{}: {}", line.label, line.value))
            .collect::<Vec<_>>()
            .join("\n"));
    }
    serde_json::to_string_pretty(&response).map_err(|e| format!("Failed to encode result: {e}"))
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/calculators", get(calculators_handler))
        .route("/api/calculate", post(calculate_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(config: &ServeConfig) -> std::io::Result<()> {
    let addr = SocketAddr::new(config.host, config.port);
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "fincalc HTTP API listening");

    axum::serve(listener, router()).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn calculators_handler() -> Response {
    let calculators = CalculationKind::ALL
        .iter()
        .map(|kind| CalculatorInfo {
            kind: *kind,
            currency: kind.currency(),
        })
        .collect();
    json_response(StatusCode::OK, CalculatorsResponse { calculators })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn calculate_handler(payload: Result<Json<Calculation>, JsonRejection>) -> Response {
    let calculation = match payload {
        Ok(Json(calculation)) => calculation,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "malformed calculation request");
            return error_response(StatusCode::BAD_REQUEST, &rejection.body_text());
        }
    };

    match run_calculation(&calculation) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(err) => error_response(StatusCode::BAD_REQUEST, &err.to_string()),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
