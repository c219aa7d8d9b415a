//! AWS Lambda handler running one calculator per request
//!
//! Accepts a JSON parameter record tagged with the calculator name and
//! returns the serialized result, or `{"error": ...}` with status 400 when
//! the record fails validation.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use chrono::Datelike;
use finance_projections::{
    assess_ltv, CompoundGrowthSimulator, GrowthParams, IndexedAmortizationSimulator,
    LeverageComparator, LeverageParams, LoanParams, LtvParams, RefinanceComparator,
    RefinanceParams, SimulationConfig, ValidationError,
};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::{Deserialize, Serialize};

/// Request body: `{"calculator": "loan", "total_principal": 900000, ...}`
#[derive(Debug, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
enum CalculatorRequest {
    Growth(GrowthParams),
    Loan(LoanParams),
    Refinance(RefinanceParams),
    Leverage(LeverageParams),
    Ltv(LtvParams),
}

#[derive(Debug, Serialize)]
struct CalculatorResponse {
    calculator: &'static str,
    result: serde_json::Value,
    execution_time_ms: u64,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn run_calculator(
    request: CalculatorRequest,
    config: &SimulationConfig,
) -> Result<(&'static str, serde_json::Value), CalculatorFailure> {
    let this_year = chrono::Utc::now().year();

    let outcome = match request {
        CalculatorRequest::Growth(mut params) => {
            if params.start_year == 0 {
                params.start_year = this_year;
            }
            ("growth", serde_json::to_value(CompoundGrowthSimulator::new().run(&params)?)?)
        }
        CalculatorRequest::Loan(params) => {
            let result = IndexedAmortizationSimulator::new(config.clone()).run(&params)?;
            ("loan", serde_json::to_value(result)?)
        }
        CalculatorRequest::Refinance(params) => {
            let result = RefinanceComparator::new(config.clone()).run_params(&params)?;
            ("refinance", serde_json::to_value(result)?)
        }
        CalculatorRequest::Leverage(mut params) => {
            if params.start_year == 0 {
                params.start_year = this_year;
            }
            let result = LeverageComparator::new(config.clone()).run(&params)?;
            ("leverage", serde_json::to_value(result)?)
        }
        CalculatorRequest::Ltv(params) => {
            ("ltv", serde_json::to_value(assess_ltv(&params, &config.ltv_bands)?)?)
        }
    };

    Ok(outcome)
}

/// Why a request produced no result
enum CalculatorFailure {
    Invalid(ValidationError),
    Encoding(serde_json::Error),
}

impl From<ValidationError> for CalculatorFailure {
    fn from(e: ValidationError) -> Self {
        CalculatorFailure::Invalid(e)
    }
}

impl From<serde_json::Error> for CalculatorFailure {
    fn from(e: serde_json::Error) -> Self {
        CalculatorFailure::Encoding(e)
    }
}

fn json_response<T: Serialize>(status: u16, body: &T) -> Result<Response<Body>, Error> {
    let response = Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body)?))?;
    Ok(response)
}

fn error_response(status: u16, message: String) -> Result<Response<Body>, Error> {
    json_response(status, &ErrorBody { error: message })
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        let response = Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)?;
        return Ok(response);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: CalculatorRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, format!("Invalid request: {}", e)),
    };

    let config = SimulationConfig::default();
    match run_calculator(request, &config) {
        Ok((calculator, result)) => json_response(
            200,
            &CalculatorResponse {
                calculator,
                result,
                execution_time_ms: start.elapsed().as_millis() as u64,
            },
        ),
        Err(CalculatorFailure::Invalid(e)) => {
            log::warn!("Rejected request: {}", e);
            error_response(400, e.to_string())
        }
        Err(CalculatorFailure::Encoding(e)) => {
            log::error!("Failed to encode result: {}", e);
            error_response(500, "failed to encode result".to_string())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
