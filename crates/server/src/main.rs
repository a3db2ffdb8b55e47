mod config;
mod doc;
mod dtos;
mod error;
mod routes;
mod state;
mod utils;

use crate::{config::Config, doc::ApiDoc, state::AppState, utils::shutdown::shutdown_signal};
use database::db::create_connection;
use log::info;
use std::error::Error;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer};
use tower_oauth2_resource_server::server::OAuth2ResourceServer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = Config::from_env()?;
    let db = create_connection(&config.database_url).await?;

    let oauth2_resource_server = <OAuth2ResourceServer>::builder()
        .issuer_url(config.oidc_issuer_url.as_str())
        .build()
        .await
        .map_err(|e| format!("Failed to build OAuth2ResourceServer: {e:?}"))?;

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(
            routes::api_router()
                .layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer())),
        )
        .merge(routes::public_router())
        .split_for_parts();

    let app = router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(AppState::new(db));

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Running axum on http://{}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
