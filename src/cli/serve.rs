use async_graphql_axum::GraphQL;
use axum::{routing::get, Router};
use modelql::error::{ModelqlError, Result};
use modelql::model::models_from_config;
use modelql::schema::SchemaBuilder;
use std::path::Path;
use tower_http::cors::CorsLayer;

/// Run the serve command to start the GraphQL server
pub async fn run(config_path: String, port: u16) -> Result<()> {
    tracing::info!("📖 Loading configuration from {}", config_path);

    let config = modelql::config::load_config(&config_path)?;

    // Use provided port or default from config
    let server_port = if port != 4000 { port } else { config.server.port };

    let models = models_from_config(&config)?;

    tracing::info!("🔧 Building GraphQL schema for {} models...", models.len());

    let mut builder = SchemaBuilder::new();

    tracing::info!("📦 Loading seed data from {}", config.store.data_dir);
    builder
        .store()
        .load_dir(Path::new(&config.store.data_dir), &models)?;

    let schema = builder.build_schema(models)?;

    tracing::info!("✅ Schema built successfully");
    tracing::info!("🚀 GraphQL server running on http://localhost:{}", server_port);
    tracing::info!("📊 Playground: http://localhost:{}/graphql", server_port);
    tracing::info!("💡 Press Ctrl+C to stop the server");

    start_http_server(schema, &config.server.bind, server_port).await
}

async fn start_http_server(
    schema: async_graphql::dynamic::Schema,
    bind: &str,
    port: u16,
) -> Result<()> {
    let app = Router::new()
        .route(
            "/graphql",
            get(graphql_playground).post_service(GraphQL::new(schema)),
        )
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", bind, port);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        ModelqlError::Config(format!(
            "Failed to bind to {}: {}. Port may be in use.",
            addr, e
        ))
    })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ModelqlError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

async fn graphql_playground() -> axum::response::Html<String> {
    axum::response::Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}

async fn health_check() -> &'static str {
    "OK"
}
