use modelql::error::Result;
use modelql::model::models_from_config;
use modelql::schema::SchemaBuilder;

/// Run the sdl command: build the schema and print its SDL. Useful as a
/// startup smoke check because unsupported column kinds fail here too.
pub async fn run(config_path: String) -> Result<()> {
    tracing::info!("📖 Loading configuration from {}", config_path);

    let config = modelql::config::load_config(&config_path)?;
    let models = models_from_config(&config)?;

    let mut builder = SchemaBuilder::new();
    let schema = builder.build_schema(models)?;

    println!("{}", schema.sdl());

    Ok(())
}
