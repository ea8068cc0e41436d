// Deployment-fixed paths and addresses for the web server

use std::net::SocketAddr;
use std::path::PathBuf;

/// Model artifact location, relative to the executable's directory.
pub const MODEL_FILE: &str = "models/stroke_best.json";

/// Address the server listens on.
pub fn bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}

/// Resolve the artifact path next to the running executable, falling back
/// to the working directory when the executable path is unavailable.
pub fn model_path() -> PathBuf {
    match std::env::current_exe() {
        Ok(exe) => exe
            .parent()
            .map(|dir| dir.join(MODEL_FILE))
            .unwrap_or_else(|| PathBuf::from(MODEL_FILE)),
        Err(_) => PathBuf::from(MODEL_FILE),
    }
}
