use groupix_core::{MigrationConfig, ObjectCopyConfig, ProjectConfig, Row, ServiceKey};
use serde_json::{Value, json};

fn project(name: &str) -> ProjectConfig {
    ProjectConfig {
        url: format!("https://{name}.supabase.test"),
        service_key: ServiceKey::new(format!("{name}-key")),
    }
}

/// Object copy settings pointing at placeholder projects.
#[allow(dead_code)]
pub fn object_config(limit: usize, concurrency: usize, log_every: usize) -> ObjectCopyConfig {
    ObjectCopyConfig {
        migration: MigrationConfig {
            source: project("prod"),
            target: project("dev"),
        },
        bucket: "trip-media".to_string(),
        limit,
        concurrency,
        log_every,
    }
}

/// Build a row from a JSON object literal.
#[allow(dead_code)]
pub fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        other => panic!("row fixture must be an object, got {other}"),
    }
}

/// `count` rows with ids `1..=count`, where higher ids are newer.
#[allow(dead_code)]
pub fn rows_with_ids(count: usize) -> Vec<Row> {
    (1..=count)
        .map(|i| {
            row(json!({
                "id": i,
                "created_at": format!("2025-01-01T00:00:00.{i:06}Z"),
                "group_id": "family",
                "media": [{ "path": format!("{i}.jpg") }]
            }))
        })
        .collect()
}
