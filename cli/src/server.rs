#[cfg(feature = "server")]
pub mod http {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::{IntoResponse, Json},
        routing::{get, post},
        Router,
    };
    use keylog::{
        Engine, EquationRequest, GeometryRequest, KeylogError, PolynomialRequest,
    };
    use serde::Serialize;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tower_http::cors::CorsLayer;
    use tracing::info;

    type SharedEngine = Arc<Engine>;

    #[derive(Debug, Serialize)]
    struct ErrorResponse {
        error: String,
    }

    type ApiError = (StatusCode, Json<ErrorResponse>);

    fn api_error(err: KeylogError) -> ApiError {
        let status = match err {
            KeylogError::Validation(_)
            | KeylogError::InsufficientEquations { .. }
            | KeylogError::UnsupportedDegree(_)
            | KeylogError::Eval(_) => StatusCode::BAD_REQUEST,
            KeylogError::Compute(_) | KeylogError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
    }

    pub async fn start_server(engine: Engine, host: &str, port: u16) -> anyhow::Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "keylog=info,tower_http=info".into()),
            )
            .init();

        let shared_engine = Arc::new(engine);

        let app = Router::new()
            .route("/health", get(health_check))
            .route("/api/geometry/shapes", get(list_shapes))
            .route("/api/geometry/operations", get(list_operations))
            .route(
                "/api/geometry/operations/:operation/shapes",
                get(shapes_for_operation),
            )
            .route("/api/geometry/templates", get(shape_templates))
            .route("/api/geometry/process", post(process_geometry))
            .route("/api/geometry/validate", post(validate_geometry))
            .route("/api/geometry/batch", post(process_geometry_batch))
            .route("/api/equation/templates", get(equation_templates))
            .route("/api/equation/process", post(process_equation))
            .route("/api/equation/batch", post(process_equation_batch))
            .route("/api/polynomial/process", post(process_polynomial))
            .layer(CorsLayer::permissive())
            .with_state(shared_engine);

        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
        info!("keylog server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    async fn health_check() -> impl IntoResponse {
        Json(serde_json::json!({
            "status": "ok",
            "service": "keylog",
            "version": env!("CARGO_PKG_VERSION")
        }))
    }

    async fn list_shapes(State(engine): State<SharedEngine>) -> impl IntoResponse {
        Json(engine.shapes())
    }

    async fn list_operations(State(engine): State<SharedEngine>) -> impl IntoResponse {
        Json(engine.operations())
    }

    async fn shapes_for_operation(
        State(engine): State<SharedEngine>,
        Path(operation): Path<String>,
    ) -> Result<impl IntoResponse, ApiError> {
        if engine.catalog().operation(&operation).is_none() {
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Operation '{}' not found", operation),
                }),
            ));
        }
        Ok(Json(engine.shapes_for_operation(&operation)))
    }

    async fn shape_templates(State(engine): State<SharedEngine>) -> impl IntoResponse {
        Json(engine.shape_templates())
    }

    async fn equation_templates(State(engine): State<SharedEngine>) -> impl IntoResponse {
        Json(engine.equation_templates())
    }

    async fn process_geometry(
        State(engine): State<SharedEngine>,
        Json(request): Json<GeometryRequest>,
    ) -> Result<impl IntoResponse, ApiError> {
        let result = engine.process_geometry(&request).map_err(api_error)?;
        info!(operation = %request.operation, shape = %request.shape_a, "geometry request processed");
        Ok(Json(result))
    }

    async fn validate_geometry(
        State(engine): State<SharedEngine>,
        Json(request): Json<GeometryRequest>,
    ) -> impl IntoResponse {
        Json(engine.validate_geometry(&request))
    }

    async fn process_geometry_batch(
        State(engine): State<SharedEngine>,
        Json(requests): Json<Vec<GeometryRequest>>,
    ) -> impl IntoResponse {
        let outcome = engine.process_geometry_batch(&requests);
        info!(total = outcome.total, successful = outcome.successful, "geometry batch processed");
        Json(outcome)
    }

    async fn process_equation(
        State(engine): State<SharedEngine>,
        Json(request): Json<EquationRequest>,
    ) -> Result<impl IntoResponse, ApiError> {
        let report = engine.process_equation(&request).map_err(api_error)?;
        Ok(Json(report))
    }

    async fn process_equation_batch(
        State(engine): State<SharedEngine>,
        Json(requests): Json<Vec<EquationRequest>>,
    ) -> impl IntoResponse {
        let outcome = engine.process_equation_batch(&requests);
        info!(total = outcome.total, successful = outcome.successful, "equation batch processed");
        Json(outcome)
    }

    async fn process_polynomial(
        State(engine): State<SharedEngine>,
        Json(request): Json<PolynomialRequest>,
    ) -> Result<impl IntoResponse, ApiError> {
        let report = engine.process_polynomial(&request).map_err(api_error)?;
        Ok(Json(report))
    }
}
