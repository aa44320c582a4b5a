//! AWS Lambda HTTP handler for the savings simulator
//!
//! POST a JSON `SimulationForm` (all fields as strings). Responds with the
//! projection, or with a field -> message map when validation fails.

use lambda_http::http::{Method, StatusCode};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{info, warn};
use savings_simulator::{ProjectionEngine, SimulationForm, SimulationLimits};
use serde_json::{json, Value};
use std::env::VarError;

/// Env var naming an optional JSON limits file
const LIMITS_ENV: &str = "SIMULATOR_LIMITS_FILE";

fn respond(engine: &ProjectionEngine, method: &Method, body: &[u8]) -> (StatusCode, Value) {
    if *method != Method::POST {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            json!({ "error": "use POST with a JSON simulation form" }),
        );
    }

    let form: SimulationForm = match serde_json::from_slice(body) {
        Ok(form) => form,
        Err(e) => {
            warn!("Rejected unparseable request body: {}", e);
            return (StatusCode::BAD_REQUEST, json!({ "error": format!("invalid JSON body: {}", e) }));
        }
    };

    let outcome = form
        .parse(engine.limits())
        .and_then(|input| engine.simulate(&input));

    match outcome {
        Ok(result) => match serde_json::to_value(&result) {
            Ok(value) => (StatusCode::OK, value),
            Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": e.to_string() })),
        },
        Err(errors) => {
            info!("Validation failed for {} field(s)", errors.len());
            (StatusCode::UNPROCESSABLE_ENTITY, json!({ "errors": errors.to_map() }))
        }
    }
}

/// Defaults only when the variable is unset; an unreadable value is an error
fn limits_from_env(var: Result<String, VarError>) -> Result<SimulationLimits, Error> {
    match var {
        Ok(path) => Ok(SimulationLimits::from_json_file(&path)?),
        Err(VarError::NotPresent) => Ok(SimulationLimits::default()),
        Err(e) => Err(format!("{}: {}", LIMITS_ENV, e).into()),
    }
}

async fn function_handler(engine: &ProjectionEngine, event: Request) -> Result<Response<Body>, Error> {
    let (status, payload) = respond(engine, event.method(), event.body());

    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))?;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let limits = limits_from_env(std::env::var(LIMITS_ENV))?;
    let engine = ProjectionEngine::new(limits);
    let engine = &engine;

    run(service_fn(move |event: Request| async move {
        function_handler(engine, event).await
    }))
    .await
}
