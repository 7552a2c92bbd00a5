//! Integration tests for create mutations and their OperationMessages
//! payloads: validation problems come back as ordered data, successful
//! creates insert a row and return an empty message list.

mod mutation_tests {
    use async_graphql::Request;
    use modelql::config::Config;
    use modelql::model::{models_from_config, Model};
    use modelql::schema::SchemaBuilder;
    use serde_json::json;

    const CONFIG: &str = r#"
[[model]]
name = "Article"
table = "articles"
primary_key = "id"

[[model.field]]
name = "id"
column = "big_auto"

[[model.field]]
name = "title"
column = "char"

[[model.field]]
name = "status"
column = "text_choices"
choices = "ArticleStatus"

[[model.field]]
name = "body"
column = "text"
nullable = true

[[choices]]
name = "ArticleStatus"

[[choices.variant]]
name = "DRAFT"
value = "draft"

[[choices.variant]]
name = "PUBLISHED"
value = "published"
"#;

    fn article_models() -> Vec<Model> {
        let config: Config = toml::from_str(CONFIG).expect("Config should parse");
        models_from_config(&config).expect("Models should resolve")
    }

    fn empty_builder() -> SchemaBuilder {
        let builder = SchemaBuilder::new();
        builder.store().register_rows("articles", vec![]).unwrap();
        builder
    }

    #[tokio::test]
    async fn test_create_reports_missing_required_fields_in_order() {
        let _ = tracing_subscriber::fmt::try_init();

        let mut builder = empty_builder();
        let schema = builder
            .build_schema(article_models())
            .expect("Failed to build schema");

        let mutation = r#"
            mutation {
                create_article {
                    messages {
                        kind
                        message
                        field
                    }
                }
            }
        "#;

        let response = schema.execute(Request::new(mutation)).await;
        assert!(response.errors.is_empty(), "Mutation had errors: {:?}", response.errors);

        let data = response.data.into_json().unwrap();
        let messages = data["create_article"]["messages"].as_array().unwrap();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["kind"], "VALIDATION");
        assert_eq!(messages[0]["field"], "title");
        assert_eq!(messages[0]["message"], "This field is required.");
        assert_eq!(messages[1]["field"], "status");

        // Nothing was inserted
        assert_eq!(builder.store().len("articles").unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_success_returns_empty_messages_and_inserts() {
        let _ = tracing_subscriber::fmt::try_init();

        let mut builder = empty_builder();
        let schema = builder
            .build_schema(article_models())
            .expect("Failed to build schema");

        let mutation = r#"
            mutation {
                create_article(title: "Fresh", status: DRAFT) {
                    messages {
                        kind
                    }
                }
            }
        "#;

        let response = schema.execute(Request::new(mutation)).await;
        assert!(response.errors.is_empty(), "Mutation had errors: {:?}", response.errors);

        let data = response.data.into_json().unwrap();
        let messages = data["create_article"]["messages"].as_array().unwrap();
        assert!(messages.is_empty());

        // The row is queryable with an assigned key and the raw choice
        // value mapped back to its enum name.
        let response = schema
            .execute(Request::new("query { article(id: \"1\") { title status body } }"))
            .await;
        assert!(response.errors.is_empty());
        let data = response.data.into_json().unwrap();
        assert_eq!(data["article"]["title"], "Fresh");
        assert_eq!(data["article"]["status"], "DRAFT");
        assert!(data["article"]["body"].is_null());
    }

    #[tokio::test]
    async fn test_create_with_choices_disabled_rejects_unknown_choice() {
        let _ = tracing_subscriber::fmt::try_init();

        let mut builder = SchemaBuilder::with_choice_support(false);
        builder.store().register_rows("articles", vec![]).unwrap();
        let schema = builder
            .build_schema(article_models())
            .expect("Failed to build schema");

        // With enum wrapping off the status argument is a plain String,
        // so unknown values reach the resolver and come back as data.
        let mutation = r#"
            mutation {
                create_article(title: "Fresh", status: "deleted") {
                    messages {
                        kind
                        message
                        field
                    }
                }
            }
        "#;

        let response = schema.execute(Request::new(mutation)).await;
        assert!(response.errors.is_empty(), "Mutation had errors: {:?}", response.errors);

        let data = response.data.into_json().unwrap();
        let messages = data["create_article"]["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["kind"], "VALIDATION");
        assert_eq!(messages[0]["field"], "status");
        assert!(messages[0]["message"].as_str().unwrap().contains("deleted"));
    }

    #[tokio::test]
    async fn test_create_with_choices_disabled_accepts_raw_value() {
        let _ = tracing_subscriber::fmt::try_init();

        let mut builder = SchemaBuilder::with_choice_support(false);
        builder.store().register_rows("articles", vec![]).unwrap();
        let schema = builder
            .build_schema(article_models())
            .expect("Failed to build schema");

        let mutation = r#"
            mutation {
                create_article(title: "Fresh", status: "published") {
                    messages { kind }
                }
            }
        "#;

        let response = schema.execute(Request::new(mutation)).await;
        assert!(response.errors.is_empty(), "Mutation had errors: {:?}", response.errors);

        let data = response.data.into_json().unwrap();
        assert!(data["create_article"]["messages"].as_array().unwrap().is_empty());
        assert_eq!(builder.store().len("articles").unwrap(), 1);
    }

    #[tokio::test]
    async fn test_assigned_keys_increment() {
        let _ = tracing_subscriber::fmt::try_init();

        let mut builder = empty_builder();
        builder
            .store()
            .register_rows(
                "articles",
                vec![json!({"id": 1, "title": "Seeded", "status": "draft", "body": null})],
            )
            .unwrap();
        let schema = builder
            .build_schema(article_models())
            .expect("Failed to build schema");

        let mutation = r#"
            mutation {
                create_article(title: "Next", status: PUBLISHED) {
                    messages { kind }
                }
            }
        "#;

        let response = schema.execute(Request::new(mutation)).await;
        assert!(response.errors.is_empty());

        let response = schema
            .execute(Request::new("query { article(id: \"2\") { title } }"))
            .await;
        assert!(response.errors.is_empty());
        let data = response.data.into_json().unwrap();
        assert_eq!(data["article"]["title"], "Next");
    }
}
