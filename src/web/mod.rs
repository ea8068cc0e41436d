// Web server modules for Stroke Guardian

pub mod config;
pub mod logger;
pub mod models;
pub mod request_parsing;
pub mod response_helpers;
pub mod router;
pub mod routes;

// Re-export commonly used types
pub use models::{PatientRecord, PredictionResponse, RiskTier, SharedPipeline};
pub use router::handle_request;
