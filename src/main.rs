// Stroke Guardian web server

use std::convert::Infallible;
use std::sync::Arc;

use anyhow::Context;
use hyper::service::{make_service_fn, service_fn};
use hyper::Server;

use stroke_guardian::pipeline::StrokePipeline;
use stroke_guardian::web::{config, handle_request, SharedPipeline};
use stroke_guardian::{log_error, log_info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load the trained pipeline once; a missing or corrupt artifact is a
    // deployment error, so the process refuses to serve.
    let model_path = config::model_path();
    let pipeline: SharedPipeline = match StrokePipeline::load(&model_path) {
        Ok(pipeline) => Arc::new(pipeline),
        Err(e) => {
            log_error!("[STARTUP] Failed to load model from {:?}: {}", model_path, e);
            return Err(e).with_context(|| format!("loading model artifact {model_path:?}"));
        }
    };
    log_info!(
        "[STARTUP] Loaded pipeline from {:?} (positive class: {})",
        model_path,
        pipeline.positive_class()
    );

    // Create HTTP service
    let make_svc = make_service_fn({
        let pipeline = pipeline.clone();
        move |_conn| {
            let pipeline = pipeline.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |req| {
                    handle_request(req, pipeline.clone())
                }))
            }
        }
    });

    // Start server
    let addr = config::bind_addr();
    let server = Server::bind(&addr).serve(make_svc);

    println!("Stroke Guardian server starting on http://{addr}");
    println!("Available endpoints:");
    println!("  GET  /health          - Health check");
    println!("  POST /predict/stroke  - Stroke risk prediction");
    println!("  GET  /                - Web interface");
    log_info!("[STARTUP] Listening on {}", addr);

    server.await.context("server error")?;

    Ok(())
}
