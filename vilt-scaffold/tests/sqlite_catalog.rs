//! Catalog introspection against a real SQLite database

use std::collections::HashMap;

use sqlx::{Executor, SqlitePool};
use tempfile::TempDir;
use vilt_scaffold::prelude::*;

const SCHEMA: &str = r"
CREATE TABLE posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title VARCHAR(255) NOT NULL,
    body TEXT,
    status VARCHAR(20) NOT NULL DEFAULT 'draft',
    author_id INTEGER NOT NULL,
    created_at TIMESTAMP,
    updated_at TIMESTAMP
);
";

fn database() -> (TempDir, String) {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("blog.db").display());

    let runtime = tokio::runtime::Runtime::new().unwrap();
    runtime.block_on(async {
        let pool = SqlitePool::connect(&url).await.unwrap();
        pool.execute(SCHEMA).await.unwrap();
        pool.close().await;
    });

    (dir, url)
}

#[test]
fn test_sqlite_columns_in_ordinal_order() {
    let (_dir, url) = database();
    let catalog = SqlCatalog::connect_lazy(&url).unwrap();

    let columns = catalog.columns("posts").unwrap();
    let names: Vec<_> = columns.iter().map(|c| c.column_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["id", "title", "body", "status", "author_id", "created_at", "updated_at"]
    );

    assert!(columns[0].is_primary_key());
    assert_eq!(columns[1].data_type, "varchar");
    assert_eq!(columns[1].max_length, Some(255));
    assert!(!columns[1].nullable);
    assert_eq!(columns[2].data_type, "text");
    assert!(columns[2].nullable);
    assert_eq!(columns[3].default_value.as_deref(), Some("'draft'"));
}

#[test]
fn test_sqlite_unknown_table_is_empty() {
    let (_dir, url) = database();
    let catalog = SqlCatalog::connect_lazy(&url).unwrap();
    assert!(catalog.columns("comments").unwrap().is_empty());
}

#[test]
fn test_sqlite_describe() {
    let (_dir, url) = database();
    let catalog = SqlCatalog::connect_lazy(&url).unwrap();

    let mut models = HashMap::new();
    models.insert("Post".to_string(), ModelMetadata::new("Post"));

    let model = SchemaReader::new(models, catalog).describe("Post").unwrap();
    let names: Vec<_> = model.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["title", "body", "status", "author_id"]);
    assert_eq!(model.fields[3].field_type, "Author");
    assert!(!model.fields[1].required);
}
