//! AWS Lambda handler for single-borrower projections
//!
//! Accepts the borrower and economic inputs as JSON and returns the yearly
//! trajectory with its summary. One projection per request; nothing is
//! shared between invocations.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use std::time::Instant;

use aws_lambda_events::event::lambda_function_urls::{LambdaFunctionUrlRequest, LambdaFunctionUrlResponse};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use loan_projection::assumptions::{Assumptions, CareerTrack, Plan};
use loan_projection::projection::{MonthRow, ProjectionConfig, ProjectionSummary, YearSnapshot};
use loan_projection::{BorrowerProfile, ProjectionEngine};

/// Input for one projection; rates are fractions (0.035 = 3.5%)
#[derive(Debug, Deserialize)]
pub struct SimulationRequest {
    #[serde(default = "default_balance")]
    pub balance: f64,

    #[serde(default = "default_salary")]
    pub salary: f64,

    #[serde(default = "default_career")]
    pub career: CareerTrack,

    /// Only used by the custom career track
    #[serde(default)]
    pub custom_growth_rate: Option<f64>,

    /// RPI
    #[serde(default = "default_base_rate")]
    pub base_rate: f64,

    #[serde(default)]
    pub monthly_overpayment: f64,

    #[serde(default = "default_plan")]
    pub plan: Plan,

    /// Include one row per simulated month
    #[serde(default)]
    pub include_monthly: bool,
}

fn default_balance() -> f64 { 45_000.0 }
fn default_salary() -> f64 { 30_000.0 }
fn default_career() -> CareerTrack { CareerTrack::Steady }
fn default_base_rate() -> f64 { 0.035 }
fn default_plan() -> Plan { Plan::Plan2 }

#[derive(Debug, Serialize)]
pub struct SimulationResponse {
    pub summary: ProjectionSummary,
    pub snapshots: Vec<YearSnapshot>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub monthly: Vec<MonthRow>,
    pub execution_time_ms: u64,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn respond(status_code: i64, body: String) -> LambdaFunctionUrlResponse {
    LambdaFunctionUrlResponse {
        status_code,
        headers: Default::default(),
        body: Some(body),
        is_base64_encoded: false,
        cookies: Vec::new(),
    }
}

fn error_response(status_code: i64, message: String) -> Result<LambdaFunctionUrlResponse, Error> {
    warn!("rejecting request: {}", message);
    Ok(respond(status_code, serde_json::to_string(&ErrorBody { error: message })?))
}

/// Lambda handler function
async fn handler(event: LambdaEvent<LambdaFunctionUrlRequest>) -> Result<LambdaFunctionUrlResponse, Error> {
    let start = Instant::now();
    let payload = event.payload;

    if payload.is_base64_encoded {
        return error_response(415, "send the request body as JSON text".to_string());
    }

    let body = payload.body.unwrap_or_default();
    let body = if body.trim().is_empty() { "{}" } else { body.as_str() };

    let request: SimulationRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return error_response(400, format!("Invalid JSON: {}", e)),
    };

    let profile = BorrowerProfile::new(request.balance, request.salary)
        .with_overpayment(request.monthly_overpayment);
    let assumptions = Assumptions::for_plan(
        request.plan,
        request.base_rate,
        request.career,
        request.custom_growth_rate,
    );
    let engine = ProjectionEngine::new(
        assumptions,
        ProjectionConfig { detailed_output: request.include_monthly },
    );

    let result = match engine.project(&profile) {
        Ok(r) => r,
        Err(e) => return error_response(422, e.to_string()),
    };

    let response = SimulationResponse {
        summary: result.summary(),
        snapshots: result.snapshots,
        monthly: result.monthly,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "projected {} plan for {:.0} balance in {} ms",
        request.plan, request.balance, response.execution_time_ms
    );

    Ok(respond(200, serde_json::to_string(&response)?))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
