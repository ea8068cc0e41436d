// Request dispatch: one match over (method, path)

use std::convert::Infallible;

use hyper::{Body, Method, Request, Response, StatusCode};

use crate::web::models::SharedPipeline;
use crate::web::routes;

pub async fn handle_request(
    req: Request<Body>,
    pipeline: SharedPipeline,
) -> Result<Response<Body>, Infallible> {
    match (req.method(), req.uri().path()) {
        (&Method::GET, "/") => routes::static_files::handle_index().await,

        (&Method::GET, "/health") => routes::health::handle().await,

        (&Method::POST, "/predict/stroke") => routes::predict::handle(req, pipeline).await,

        (&Method::GET, path) if path.starts_with("/static/") => {
            routes::static_files::handle_static_asset(path).await
        }

        (&Method::OPTIONS, _) => routes::static_files::handle_options().await,

        _ => Ok(Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("Not Found"))
            .unwrap()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::pipeline::artifact::{
        ClassifierParams, FeatureSpec, PipelineArtifact, ScalerParams,
    };
    use crate::pipeline::StrokePipeline;

    fn single_feature_pipeline() -> SharedPipeline {
        let artifact = PipelineArtifact {
            format_version: 1,
            positive_class: "stroke".to_string(),
            features: vec![FeatureSpec::Numeric {
                name: "age".to_string(),
            }],
            scaler: ScalerParams {
                mean: vec![0.0],
                std: vec![1.0],
            },
            classifier: ClassifierParams {
                coefficients: vec![0.1],
                intercept: -1.0,
            },
        };
        Arc::new(StrokePipeline::from_artifact(artifact).unwrap())
    }

    fn request(method: &str, path: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let response = handle_request(request("GET", "/nope"), single_feature_pipeline())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_route_dispatches() {
        let response = handle_request(request("GET", "/health"), single_feature_pipeline())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_on_predict_is_404() {
        let response = handle_request(
            request("GET", "/predict/stroke"),
            single_feature_pipeline(),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_options_preflight_dispatches() {
        let response = handle_request(
            request("OPTIONS", "/predict/stroke"),
            single_feature_pipeline(),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_static_route_rejects_traversal() {
        let response = handle_request(
            request("GET", "/static/../Cargo.toml"),
            single_feature_pipeline(),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_empty_post_body_is_400() {
        let response = handle_request(
            request("POST", "/predict/stroke"),
            single_feature_pipeline(),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
