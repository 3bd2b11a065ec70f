use anyhow::Result;
use axum::{Router, routing::get};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use newsclip::{app_state::AppState, config::Config, health, scrape};

#[derive(OpenApi)]
#[openapi(
    paths(health::health_check, scrape::handlers::scrape),
    components(schemas(health::HealthResponse, scrape::ScrapeResponse)),
    tags(
        (name = "scrape", description = "Article content extraction"),
        (name = "health", description = "Liveness")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    let state = AppState::new(&config);

    let app = Router::new()
        .route("/healthz", get(health::health_check))
        .route("/api/scrape", get(scrape::handlers::scrape))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id());

    info!(bind_addr = config.bind_addr(), "starting newsclip server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
