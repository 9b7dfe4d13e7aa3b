#![cfg(feature = "sqlite")]

mod common;

use common::submitted_fields;
use db_dashboard::{
    DataSource, Dashboard, DashboardConfig, DashboardError, FindQuery, PageQuery, SchemaError,
    SemanticType, SqliteProvider, Value,
};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::collections::HashMap;

/// A private in-memory database; one connection so every query sees it
async fn pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    for statement in [
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            score REAL,
            is_active BOOLEAN NOT NULL DEFAULT 1,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        "CREATE TABLE orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER REFERENCES users(id),
            quantity INTEGER NOT NULL
        )",
        "INSERT INTO users (name, score, is_active) VALUES ('Alice', 4.5, 1), ('Bob', NULL, 0), ('Carol', 2, 1)",
        "INSERT INTO orders (user_id, quantity) VALUES (1, 3), (2, 1)",
    ] {
        sqlx::query(statement).execute(&pool).await.unwrap();
    }

    pool
}

async fn dashboard() -> Dashboard<SqliteProvider> {
    Dashboard::connect(SqliteProvider::new(pool().await), DashboardConfig::default())
        .await
        .unwrap()
}

fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[tokio::test]
async fn test_schema_discovery() {
    let dashboard = dashboard().await;
    let registry = dashboard.registry();

    assert_eq!(registry.table_names().collect::<Vec<_>>(), vec!["orders", "users"]);

    let users = registry.get("users").unwrap();
    assert_eq!(users.primary_key, "id");
    assert_eq!(users.column("name").unwrap().semantic_type, SemanticType::String);
    assert_eq!(users.column("score").unwrap().semantic_type, SemanticType::Real);
    assert_eq!(users.column("is_active").unwrap().semantic_type, SemanticType::Boolean);
    assert_eq!(users.column("created_at").unwrap().semantic_type, SemanticType::Other);

    let orders = registry.get("orders").unwrap();
    assert_eq!(orders.relation_for("user_id").unwrap().foreign_table, "users");
    assert!(orders.column("user_id").unwrap().is_foreign_key);
}

#[tokio::test]
async fn test_table_without_primary_key_fails_startup() {
    let pool = pool().await;
    sqlx::query("CREATE TABLE audit_log (message TEXT)")
        .execute(&pool)
        .await
        .unwrap();

    let result = Dashboard::connect(SqliteProvider::new(pool), DashboardConfig::default()).await;
    assert!(matches!(result, Err(DashboardError::Schema(_))));
}

#[tokio::test]
async fn test_composite_primary_key_fails_startup() {
    let pool = pool().await;
    sqlx::query(
        "CREATE TABLE memberships (
            group_id INTEGER NOT NULL,
            user_id INTEGER NOT NULL,
            role TEXT,
            PRIMARY KEY (group_id, user_id)
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = Dashboard::connect(SqliteProvider::new(pool), DashboardConfig::default()).await;
    assert!(matches!(
        result,
        Err(DashboardError::Schema(SchemaError::CompositePrimaryKey { ref table, .. }))
            if table == "memberships"
    ));
}

#[tokio::test]
async fn test_list_and_edit() {
    let dashboard = dashboard().await;

    let fragment = dashboard.list("users", PageQuery::new(0, 2)).await.unwrap();
    assert!(fragment.body.contains("1 - 2 of 3"));
    assert!(fragment.body.contains("<td>Alice</td>"));
    assert!(fragment.body.contains("<td>true</td>"));
    assert!(!fragment.body.contains("Carol"));

    let fragment = dashboard.list("orders", PageQuery::default()).await.unwrap();
    assert!(fragment.body.contains("href=\"/tables/users/2\""));

    let form = dashboard.edit_form("users", "2").await.unwrap();
    assert!(form.body.contains("value=\"Bob\""));
    assert!(!form.body.contains("checked"));
}

#[tokio::test]
async fn test_insert_update_delete() {
    let dashboard = dashboard().await;
    let source = dashboard.source();

    dashboard
        .submit("users", &fields(&[("name", "Dave"), ("score", "1.25"), ("is_active", "true")]))
        .await
        .unwrap();
    assert_eq!(source.count("users").await.unwrap(), 4);

    let stored = source
        .find(
            "users",
            FindQuery::Where {
                column: "name".to_string(),
                equals: Value::Text("Dave".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].get("id"), Some(&Value::Integer(4)));
    assert_eq!(stored[0].get("score"), Some(&Value::Real(1.25)));
    // Omitted columns keep their defaults.
    assert!(!stored[0].get("created_at").unwrap().is_null());

    dashboard
        .submit("users", &fields(&[("id", "2"), ("name", "Robert")]))
        .await
        .unwrap();
    let form = dashboard.edit_form("users", "2").await.unwrap();
    assert!(form.body.contains("value=\"Robert\""));
    assert_eq!(source.count("users").await.unwrap(), 4);

    dashboard.delete("orders", "2").await.unwrap();
    assert_eq!(source.count("orders").await.unwrap(), 1);

    let error = dashboard.delete("orders", "2").await.unwrap_err();
    assert!(matches!(error, DashboardError::NotFound(_)));
}

#[tokio::test]
async fn test_boolean_round_trip() {
    let dashboard = dashboard().await;

    // Alice is active; submitting her form without the box unchecks her.
    dashboard
        .submit("users", &fields(&[("id", "1"), ("name", "Alice")]))
        .await
        .unwrap();

    let rows = dashboard
        .source()
        .find(
            "users",
            FindQuery::Where {
                column: "id".to_string(),
                equals: Value::Integer(1),
            },
        )
        .await
        .unwrap();
    let row = rows.into_iter().next().unwrap();
    assert_eq!(row.get("is_active"), Some(&Value::Integer(0)));

    let form = dashboard.edit_form("users", "1").await.unwrap();
    assert!(!form.body.contains("checked"));
}

#[tokio::test]
async fn test_blank_field_clears_stored_value() {
    let dashboard = dashboard().await;

    dashboard
        .submit(
            "users",
            &fields(&[("id", "1"), ("name", "Alice"), ("score", ""), ("is_active", "true")]),
        )
        .await
        .unwrap();

    let rows = dashboard
        .source()
        .find(
            "users",
            FindQuery::Where {
                column: "id".to_string(),
                equals: Value::Integer(1),
            },
        )
        .await
        .unwrap();
    assert_eq!(rows[0].get("score"), Some(&Value::Null));
    assert_eq!(rows[0].get("is_active"), Some(&Value::Integer(1)));
    // Not submitted, so untouched.
    assert!(!rows[0].get("created_at").unwrap().is_null());
}

#[tokio::test]
async fn test_unchanged_form_keeps_blob_bytes() {
    let pool = pool().await;
    for statement in [
        "CREATE TABLE attachments (id INTEGER PRIMARY KEY, name TEXT, data BLOB)",
        "INSERT INTO attachments (id, name, data) VALUES (1, 'a', x'DEADBEEF')",
    ] {
        sqlx::query(statement).execute(&pool).await.unwrap();
    }
    let dashboard = Dashboard::connect(SqliteProvider::new(pool.clone()), DashboardConfig::default())
        .await
        .unwrap();

    let form = dashboard.edit_form("attachments", "1").await.unwrap();
    assert!(form.body.contains("[BLOB: 4 bytes]"));

    let fields = submitted_fields(&form.body);
    assert!(!fields.contains_key("data"));
    dashboard.submit("attachments", &fields).await.unwrap();

    let stored: String = sqlx::query_scalar("SELECT hex(data) FROM attachments WHERE id = 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, "DEADBEEF");

    let listing = dashboard.list("attachments", PageQuery::default()).await.unwrap();
    assert!(listing.body.contains("<td>[BLOB: 4 bytes]</td>"));
}
