use modelql::config::{
    ChoiceSetConfig, ChoiceValueConfig, ChoiceVariantConfig, Config, FieldConfig, ModelConfig,
    ServerConfig, StoreConfig,
};
use modelql::error::Result;
use serde_json::json;
use std::path::Path;

/// Run the init command to generate an example configuration and its
/// JSON seed data
pub async fn run(output: Option<String>, data_dir: String) -> Result<()> {
    tracing::info!("🎨 Setting up example environment with a small publishing domain...");
    tracing::info!("");

    write_seed_data(Path::new(&data_dir))?;
    tracing::info!("");

    tracing::info!("📝 Generating configuration...");
    let config = example_config(&data_dir);

    tracing::info!("✨ Created {} example models:", config.model.len());
    for model in &config.model {
        tracing::info!("   • {} ({})", model.name, model.table);
        if let Some(desc) = &model.description {
            tracing::info!("     {}", desc);
        }
    }

    let wrote_to_file = if let Some(output_path) = output {
        modelql::config::save_config(&config, &output_path)?;
        tracing::info!("📝 Generated example configuration: {}", output_path);
        true
    } else {
        let toml_string = toml::to_string_pretty(&config)?;
        println!("{}", toml_string);
        false
    };

    tracing::info!("");
    tracing::info!("🎯 This example showcases:");
    tracing::info!("   • Auto primary keys exposed as IDs");
    tracing::info!("   • Choice columns wrapped as GraphQL enums");
    tracing::info!("   • Date and datetime scalars");
    tracing::info!("   • create_* mutations reporting OperationMessages");
    tracing::info!("");
    tracing::info!("💡 Next steps:");
    if wrote_to_file {
        tracing::info!("   1. Review the generated configuration file");
        tracing::info!("   2. Start server with 'cargo run -- serve --config <file>'");
    } else {
        tracing::info!("   1. Save the configuration to a file: cargo run -- init --output modelql.toml");
        tracing::info!("   2. Start server with 'cargo run -- serve'");
    }

    Ok(())
}

fn write_seed_data(data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;

    let authors = json!([
        {"id": 1, "name": "Ada Quill", "email": "ada@example.com", "active": true},
        {"id": 2, "name": "Brook Vane", "email": "brook@example.com", "active": false}
    ]);

    let articles = json!([
        {
            "id": 1,
            "author_id": 1,
            "title": "Typed columns, typed fields",
            "body": "How a column kind becomes a GraphQL type.",
            "status": "published",
            "priority": 2,
            "published_on": "2024-02-10",
            "created_at": "2024-02-01T09:30:00Z"
        },
        {
            "id": 2,
            "author_id": 1,
            "title": "Choice sets as enums",
            "body": null,
            "status": "draft",
            "priority": 3,
            "published_on": null,
            "created_at": "2024-03-05T14:00:00Z"
        },
        {
            "id": 3,
            "author_id": 2,
            "title": "Reporting validation as data",
            "body": "OperationMessages in practice.",
            "status": "archived",
            "priority": 1,
            "published_on": "2023-11-20",
            "created_at": "2023-11-01T08:15:00Z"
        }
    ]);

    for (table, rows) in [("authors", &authors), ("articles", &articles)] {
        let path = data_dir.join(format!("{}.json", table));
        std::fs::write(&path, serde_json::to_string_pretty(rows)?)?;
        tracing::info!("   Wrote seed data: {}", path.display());
    }

    Ok(())
}

fn example_config(data_dir: &str) -> Config {
    Config {
        server: ServerConfig {
            port: 4000,
            bind: "0.0.0.0".to_string(),
        },
        store: StoreConfig {
            data_dir: data_dir.to_string(),
        },
        model: vec![
            ModelConfig {
                name: "Author".to_string(),
                table: "authors".to_string(),
                primary_key: "id".to_string(),
                description: Some("People who write articles".to_string()),
                field: vec![
                    field("id", "auto", false, None),
                    field("name", "char", false, None),
                    field("email", "email", false, None),
                    field("active", "boolean", false, None),
                ],
            },
            ModelConfig {
                name: "Article".to_string(),
                table: "articles".to_string(),
                primary_key: "id".to_string(),
                description: Some("Published and in-progress articles".to_string()),
                field: vec![
                    field("id", "big_auto", false, None),
                    field("author_id", "big_integer", false, None),
                    field("title", "char", false, None),
                    field("body", "text", true, None),
                    FieldConfig {
                        choices: Some("ArticleStatus".to_string()),
                        ..field("status", "text_choices", false, None)
                    },
                    FieldConfig {
                        choices: Some("Priority".to_string()),
                        ..field("priority", "integer_choices", false, None)
                    },
                    field("published_on", "date", true, None),
                    field("created_at", "datetime", false, None),
                ],
            },
        ],
        choices: vec![
            ChoiceSetConfig {
                name: "ArticleStatus".to_string(),
                doc: Some("Publication lifecycle of an article.".to_string()),
                variant: vec![
                    variant("DRAFT", ChoiceValueConfig::Str("draft".to_string())),
                    variant("PUBLISHED", ChoiceValueConfig::Str("published".to_string())),
                    variant("ARCHIVED", ChoiceValueConfig::Str("archived".to_string())),
                ],
            },
            ChoiceSetConfig {
                name: "Priority".to_string(),
                doc: None,
                variant: vec![
                    variant("LOW", ChoiceValueConfig::Int(1)),
                    variant("NORMAL", ChoiceValueConfig::Int(2)),
                    variant("HIGH", ChoiceValueConfig::Int(3)),
                ],
            },
        ],
    }
}

fn field(name: &str, column: &str, nullable: bool, description: Option<&str>) -> FieldConfig {
    FieldConfig {
        name: name.to_string(),
        column: column.to_string(),
        nullable,
        description: description.map(str::to_string),
        choices: None,
    }
}

fn variant(name: &str, value: ChoiceValueConfig) -> ChoiceVariantConfig {
    ChoiceVariantConfig {
        name: name.to_string(),
        value,
        description: None,
    }
}
