// Stroke prediction route handler

use std::convert::Infallible;

use hyper::{Body, Request, Response, StatusCode};

use crate::web::models::{PatientRecord, PredictionResponse, SharedPipeline};
use crate::web::request_parsing::parse_json_body;
use crate::web::response_helpers::{json_error, json_response};
use crate::{log_error, log_info};

/// POST /predict/stroke
///
/// Every failure, malformed body or inference error, becomes a 400 with an
/// `{"error": …}` body; nothing here can take the process down.
pub async fn handle(
    req: Request<Body>,
    pipeline: SharedPipeline,
) -> Result<Response<Body>, Infallible> {
    let record: PatientRecord = match parse_json_body(req.into_body()).await {
        Ok(record) => record,
        Err(error_response) => return Ok(error_response),
    };

    let probability = match pipeline.predict_proba(&record.to_row()) {
        Ok(p) => p,
        Err(e) => {
            log_error!("[PREDICT] Inference failed: {}", e);
            return Ok(json_error(StatusCode::BAD_REQUEST, &e.to_string()));
        }
    };

    let response = PredictionResponse::from_probability(probability);
    log_info!(
        "[PREDICT] p={:.4} prediction={} risk={:?}",
        response.probability,
        response.prediction,
        response.risk
    );

    Ok(json_response(StatusCode::OK, &response))
}
