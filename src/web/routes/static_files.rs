// Static file serving route handlers

use std::convert::Infallible;

use hyper::{Body, Response, StatusCode};
use tokio::fs;

use crate::web::response_helpers::cors_preflight;

pub async fn handle_index() -> Result<Response<Body>, Infallible> {
    match fs::read_to_string("./static/index.html").await {
        Ok(content) => Ok(Response::builder()
            .status(StatusCode::OK)
            .header("content-type", "text/html")
            .body(Body::from(content))
            .unwrap()),
        Err(_) => {
            // Fallback HTML if static files aren't deployed next to the binary
            let html = r#"<!DOCTYPE html>
<html>
<head><title>Stroke Guardian</title></head>
<body>
<h1>Stroke Guardian</h1>
<p>Prediction service is running.</p>
<p>Static page not found. API endpoints:</p>
<ul>
<li>GET /health - Health check</li>
<li>POST /predict/stroke - Stroke risk prediction</li>
</ul>
</body>
</html>"#;
            Ok(Response::builder()
                .status(StatusCode::OK)
                .header("content-type", "text/html")
                .body(Body::from(html))
                .unwrap())
        }
    }
}

pub async fn handle_static_asset(path: &str) -> Result<Response<Body>, Infallible> {
    // Only plain paths under ./static are served; any dot-dot component
    // could escape the static directory, so those get a 404.
    if path.split('/').any(|component| component == "..") {
        return Ok(Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("Asset not found"))
            .unwrap());
    }

    // Serve static assets (JS, CSS, etc.)
    let file_path = format!("./{}", path.trim_start_matches('/'));
    match fs::read(&file_path).await {
        Ok(content) => {
            let content_type = if path.ends_with(".js") {
                "application/javascript"
            } else if path.ends_with(".css") {
                "text/css"
            } else if path.ends_with(".png") {
                "image/png"
            } else if path.ends_with(".svg") {
                "image/svg+xml"
            } else if path.ends_with(".html") || path.ends_with(".htm") {
                "text/html"
            } else {
                "application/octet-stream"
            };

            Ok(Response::builder()
                .status(StatusCode::OK)
                .header("content-type", content_type)
                .body(Body::from(content))
                .unwrap())
        }
        Err(_) => Ok(Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("Asset not found"))
            .unwrap()),
    }
}

pub async fn handle_options() -> Result<Response<Body>, Infallible> {
    Ok(cors_preflight())
}
