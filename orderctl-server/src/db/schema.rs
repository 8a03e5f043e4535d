//! Table definitions for orders, products, and their join table

use sqlx::{PgPool, Postgres, Transaction};

use super::DbError;

/// Products inserted by [`reset_and_seed`]: (id, name, description).
pub const SEED_PRODUCTS: [(i32, &str, &str); 4] = [
    (1, "HP laptop", "This is HP laptop"),
    (2, "Lenovo laptop", "This is Lenovo laptop"),
    (3, "Car", "This is Car"),
    (4, "Bike", "This is Bike"),
];

const CREATE_ORDERS: &str = r#"
    CREATE TABLE IF NOT EXISTS orders (
        id SERIAL PRIMARY KEY,
        order_description VARCHAR(100) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

const CREATE_PRODUCTS: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY,
        product_name VARCHAR(100) NOT NULL,
        product_description TEXT
    )
"#;

const CREATE_ORDER_PRODUCT_MAP: &str = r#"
    CREATE TABLE IF NOT EXISTS order_product_map (
        id SERIAL PRIMARY KEY,
        order_id INTEGER NOT NULL REFERENCES orders(id),
        product_id INTEGER NOT NULL REFERENCES products(id)
    )
"#;

const CREATE_ORDER_PRODUCT_MAP_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_order_product_map_order ON order_product_map(order_id)";

/// Create any missing tables. Existing rows are left alone.
pub async fn reconcile(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Reconciling schema...");

    let mut tx = pool.begin().await?;
    create_tables(&mut tx).await?;
    tx.commit().await?;

    tracing::info!("Schema reconciled");
    Ok(())
}

/// Drop and recreate all tables, then insert the fixed product catalogue.
///
/// Destroys every order. Operator maintenance only; never called while serving.
pub async fn reset_and_seed(pool: &PgPool) -> Result<(), DbError> {
    tracing::warn!("Dropping orders, products and order_product_map");

    let mut tx = pool.begin().await?;

    sqlx::query("DROP TABLE IF EXISTS order_product_map, orders, products CASCADE")
        .execute(&mut *tx)
        .await?;

    create_tables(&mut tx).await?;

    for (id, name, description) in SEED_PRODUCTS {
        sqlx::query(
            r#"
            INSERT INTO products (id, product_name, product_description)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(products = SEED_PRODUCTS.len(), "Seed data inserted");
    Ok(())
}

async fn create_tables(tx: &mut Transaction<'_, Postgres>) -> Result<(), DbError> {
    // Order matters: the join table references both parents
    for ddl in [
        CREATE_ORDERS,
        CREATE_PRODUCTS,
        CREATE_ORDER_PRODUCT_MAP,
        CREATE_ORDER_PRODUCT_MAP_INDEX,
    ] {
        sqlx::query(ddl).execute(&mut **tx).await?;
    }
    Ok(())
}
