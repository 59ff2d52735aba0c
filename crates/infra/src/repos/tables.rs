use crate::models::TableRow;
use sqlx::{PgExecutor, Result as SqlxResult};

#[derive(Debug, Clone)]
pub struct CreateTable {
    pub table_name: String,
    pub capacity: i32,
}

pub async fn list<'e>(executor: impl PgExecutor<'e>) -> SqlxResult<Vec<TableRow>> {
    sqlx::query_as::<_, TableRow>(
        r#"
        SELECT table_id, table_name, capacity, reservation_id, created_at, updated_at
        FROM tables
        ORDER BY table_name ASC
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn get_by_id<'e>(
    executor: impl PgExecutor<'e>,
    table_id: i32,
) -> SqlxResult<Option<TableRow>> {
    sqlx::query_as::<_, TableRow>(
        r#"
        SELECT table_id, table_name, capacity, reservation_id, created_at, updated_at
        FROM tables
        WHERE table_id = $1
        "#,
    )
    .bind(table_id)
    .fetch_optional(executor)
    .await
}

/// Same as `get_by_id` but locks the row for the rest of the transaction.
pub async fn get_for_update<'e>(
    executor: impl PgExecutor<'e>,
    table_id: i32,
) -> SqlxResult<Option<TableRow>> {
    sqlx::query_as::<_, TableRow>(
        r#"
        SELECT table_id, table_name, capacity, reservation_id, created_at, updated_at
        FROM tables
        WHERE table_id = $1
        FOR UPDATE
        "#,
    )
    .bind(table_id)
    .fetch_optional(executor)
    .await
}

pub async fn create<'e>(executor: impl PgExecutor<'e>, data: CreateTable) -> SqlxResult<TableRow> {
    sqlx::query_as::<_, TableRow>(
        r#"
        INSERT INTO tables (table_name, capacity)
        VALUES ($1, $2)
        RETURNING table_id, table_name, capacity, reservation_id, created_at, updated_at
        "#,
    )
    .bind(data.table_name)
    .bind(data.capacity)
    .fetch_one(executor)
    .await
}

pub async fn seat<'e>(
    executor: impl PgExecutor<'e>,
    table_id: i32,
    reservation_id: i32,
) -> SqlxResult<TableRow> {
    sqlx::query_as::<_, TableRow>(
        r#"
        UPDATE tables
        SET reservation_id = $2, updated_at = NOW()
        WHERE table_id = $1
        RETURNING table_id, table_name, capacity, reservation_id, created_at, updated_at
        "#,
    )
    .bind(table_id)
    .bind(reservation_id)
    .fetch_one(executor)
    .await
}

pub async fn clear<'e>(executor: impl PgExecutor<'e>, table_id: i32) -> SqlxResult<TableRow> {
    sqlx::query_as::<_, TableRow>(
        r#"
        UPDATE tables
        SET reservation_id = NULL, updated_at = NOW()
        WHERE table_id = $1
        RETURNING table_id, table_name, capacity, reservation_id, created_at, updated_at
        "#,
    )
    .bind(table_id)
    .fetch_one(executor)
    .await
}
