//! Order repository
//!
//! Handles order CRUD with:
//! - Atomic create/update/delete together with the order's product associations
//! - Association replacement as delete-all-then-insert

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Row, Transaction};

use super::products::Product;
use crate::db::DbError;

/// Order record from database
#[derive(Debug, Clone, FromRow)]
pub struct Order {
    pub id: i32,
    pub order_description: String,
    pub created_at: DateTime<Utc>,
}

/// One row of the order/product join table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderProductMap {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub product: Product,
}

/// Order with its associations, each carrying the referenced product
#[derive(Debug, Clone)]
pub struct OrderDetail {
    pub order: Order,
    pub products: Vec<OrderProductMap>,
}

/// Order repository
#[derive(Clone)]
pub struct OrderRepo {
    pool: PgPool,
}

impl OrderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every order.
    pub async fn list(&self) -> Result<Vec<Order>, DbError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, order_description, created_at
            FROM orders
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Get a single order with its associations and their products.
    pub async fn get(&self, id: i32) -> Result<OrderDetail, DbError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, order_description, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(id))?;

        let rows = sqlx::query(
            r#"
            SELECT
                m.id,
                m.order_id,
                m.product_id,
                p.product_name,
                p.product_description
            FROM order_product_map m
            JOIN products p ON p.id = m.product_id
            WHERE m.order_id = $1
            ORDER BY m.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let products = rows
            .into_iter()
            .map(|r| {
                let product_id: i32 = r.get("product_id");
                OrderProductMap {
                    id: r.get("id"),
                    order_id: r.get("order_id"),
                    product_id,
                    product: Product {
                        id: product_id,
                        product_name: r.get("product_name"),
                        product_description: r.get("product_description"),
                    },
                }
            })
            .collect();

        Ok(OrderDetail { order, products })
    }

    /// Create an order, associating it with `product_ids` when non-empty.
    ///
    /// A `None` description is passed through as NULL and rejected by the
    /// NOT NULL constraint. An unknown product id fails the foreign key and
    /// rolls back the order as well.
    pub async fn create(
        &self,
        description: Option<&str>,
        product_ids: Option<&[i32]>,
    ) -> Result<Order, DbError> {
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (order_description)
            VALUES ($1)
            RETURNING id, order_description, created_at
            "#,
        )
        .bind(description)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(ids) = product_ids {
            insert_associations(&mut tx, order.id, ids).await?;
        }

        tx.commit().await?;
        tracing::debug!(order_id = order.id, "order created");
        Ok(order)
    }

    /// Update an order.
    ///
    /// `description: None` keeps the stored description; `Some(None)` writes
    /// NULL, which the NOT NULL constraint rejects. `product_ids: Some(_)`
    /// replaces every association (an empty slice clears them);
    /// `None` leaves associations untouched.
    pub async fn update(
        &self,
        id: i32,
        description: Option<Option<&str>>,
        product_ids: Option<&[i32]>,
    ) -> Result<Order, DbError> {
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET order_description = CASE WHEN $3 THEN $2 ELSE order_description END
            WHERE id = $1
            RETURNING id, order_description, created_at
            "#,
        )
        .bind(id)
        .bind(description.flatten())
        .bind(description.is_some())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| not_found(id))?;

        if let Some(ids) = product_ids {
            delete_associations(&mut tx, id).await?;
            insert_associations(&mut tx, id, ids).await?;
        }

        tx.commit().await?;
        tracing::debug!(order_id = id, "order updated");
        Ok(order)
    }

    /// Delete an order and all of its associations.
    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        delete_associations(&mut tx, id).await?;

        let deleted = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            // Dropping tx rolls back
            return Err(not_found(id));
        }

        tx.commit().await?;
        tracing::debug!(order_id = id, "order deleted");
        Ok(())
    }
}

fn not_found(id: i32) -> DbError {
    DbError::NotFound {
        resource: "order",
        id: id.to_string(),
    }
}

async fn delete_associations(
    tx: &mut Transaction<'_, Postgres>,
    order_id: i32,
) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM order_product_map WHERE order_id = $1")
        .bind(order_id)
        .execute(&mut **tx)
        .await?;

    Ok(result.rows_affected())
}

/// Insert one join row per id, keeping duplicates and input order.
async fn insert_associations(
    tx: &mut Transaction<'_, Postgres>,
    order_id: i32,
    product_ids: &[i32],
) -> Result<(), DbError> {
    if product_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO order_product_map (order_id, product_id)
        SELECT $1, p.product_id
        FROM UNNEST($2::int4[]) WITH ORDINALITY AS p(product_id, ord)
        ORDER BY p.ord
        "#,
    )
    .bind(order_id)
    .bind(product_ids)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
