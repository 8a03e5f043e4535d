//! Order endpoints
//!
//! Malformed ids and bodies are not reported separately: like storage
//! failures they become the endpoint's 500 message.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::SecondsFormat;
use serde::{Deserialize, Deserializer, Serialize};

use super::products::ProductResponse;
use crate::db::{Order, OrderDetail, OrderProductMap};
use crate::http::error::{ApiError, DbResultExt};
use crate::state::AppState;

const LIST_FAILED: &str = "Failed to fetch orders";
const FETCH_FAILED: &str = "Failed to fetch order";
const CREATE_FAILED: &str = "Failed to create order";
const UPDATE_FAILED: &str = "Failed to update order";
const DELETE_FAILED: &str = "Failed to delete order";

/// Create order request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Left optional so a missing value reaches the NOT NULL constraint
    pub order_description: Option<String>,
    pub product_ids: Option<Vec<i32>>,
}

/// Update order request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    /// `None` when absent, `Some(None)` for an explicit null
    #[serde(default, deserialize_with = "present")]
    pub order_description: Option<Option<String>>,
    /// `None` keeps associations, `Some(vec![])` clears them
    pub product_ids: Option<Vec<i32>>,
}

/// Wrap any present value, null included, in `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Order response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i32,
    pub order_description: String,
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            order_description: o.order_description,
            created_at: o.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Association entry nested in the order detail
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderProductMapResponse {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    #[serde(rename = "Product")]
    pub product: ProductResponse,
}

impl From<OrderProductMap> for OrderProductMapResponse {
    fn from(m: OrderProductMap) -> Self {
        Self {
            id: m.id,
            order_id: m.order_id,
            product_id: m.product_id,
            product: ProductResponse::from(m.product),
        }
    }
}

/// Order with its associations
#[derive(Debug, Serialize)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    #[serde(rename = "OrderProductMaps")]
    pub order_product_maps: Vec<OrderProductMapResponse>,
}

impl From<OrderDetail> for OrderDetailResponse {
    fn from(d: OrderDetail) -> Self {
        Self {
            order: OrderResponse::from(d.order),
            order_product_maps: d
                .products
                .into_iter()
                .map(OrderProductMapResponse::from)
                .collect(),
        }
    }
}

fn order_id(path: Result<Path<i32>, PathRejection>, failure: &'static str) -> Result<i32, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|e| ApiError::failed(failure, e))
}

fn body<T>(json: Result<Json<T>, JsonRejection>, failure: &'static str) -> Result<T, ApiError> {
    json.map(|Json(req)| req)
        .map_err(|e| ApiError::failed(failure, e))
}

/// GET /api/orders - list all orders
async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = state.orders().list().await.or_fail(LIST_FAILED)?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// GET /api/orders/{id} - get one order with its products
async fn get_order(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<OrderDetailResponse>, ApiError> {
    let id = order_id(path, FETCH_FAILED)?;
    let detail = state.orders().get(id).await.or_fail(FETCH_FAILED)?;
    Ok(Json(OrderDetailResponse::from(detail)))
}

/// POST /api/orders - create an order
async fn create_order(
    State(state): State<AppState>,
    json: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let req = body(json, CREATE_FAILED)?;

    let order = state
        .orders()
        .create(req.order_description.as_deref(), req.product_ids.as_deref())
        .await
        .or_fail(CREATE_FAILED)?;

    tracing::info!(order_id = order.id, "Created order");
    Ok((StatusCode::CREATED, Json(OrderResponse::from(order))))
}

/// PUT /api/orders/{id} - update description and optionally replace products
async fn update_order(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    json: Result<Json<UpdateOrderRequest>, JsonRejection>,
) -> Result<Json<OrderResponse>, ApiError> {
    let id = order_id(path, UPDATE_FAILED)?;
    let req = body(json, UPDATE_FAILED)?;

    let order = state
        .orders()
        .update(
            id,
            req.order_description.as_ref().map(Option::as_deref),
            req.product_ids.as_deref(),
        )
        .await
        .or_fail(UPDATE_FAILED)?;

    Ok(Json(OrderResponse::from(order)))
}

/// DELETE /api/orders/{id} - delete an order and its associations
async fn delete_order(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = order_id(path, DELETE_FAILED)?;
    state.orders().delete(id).await.or_fail(DELETE_FAILED)?;

    tracing::info!(order_id = id, "Deleted order");
    Ok(StatusCode::NO_CONTENT)
}

/// Order routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(list_orders).post(create_order))
        .route(
            "/api/orders/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Product;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn update_request_distinguishes_missing_and_empty_products() {
        let missing: UpdateOrderRequest =
            serde_json::from_value(json!({ "orderDescription": "x" })).unwrap();
        assert!(missing.product_ids.is_none());

        let empty: UpdateOrderRequest =
            serde_json::from_value(json!({ "orderDescription": "x", "productIds": [] })).unwrap();
        assert_eq!(empty.product_ids, Some(vec![]));

        let null: UpdateOrderRequest =
            serde_json::from_value(json!({ "productIds": null })).unwrap();
        assert!(null.product_ids.is_none());
        assert!(null.order_description.is_none());
    }

    #[test]
    fn update_request_distinguishes_missing_and_null_description() {
        let missing: UpdateOrderRequest =
            serde_json::from_value(json!({ "productIds": [1] })).unwrap();
        assert_eq!(missing.order_description, None);

        let null: UpdateOrderRequest =
            serde_json::from_value(json!({ "orderDescription": null })).unwrap();
        assert_eq!(null.order_description, Some(None));

        let set: UpdateOrderRequest =
            serde_json::from_value(json!({ "orderDescription": "new" })).unwrap();
        assert_eq!(set.order_description, Some(Some("new".to_string())));
    }

    #[test]
    fn created_at_uses_millisecond_utc_format() {
        let order = Order {
            id: 1,
            order_description: "x".into(),
            created_at: Utc.with_ymd_and_hms(2026, 10, 17, 18, 33, 47).unwrap()
                + chrono::Duration::microseconds(10_642),
        };
        assert_eq!(
            OrderResponse::from(order).created_at,
            "2026-10-17T18:33:47.010Z"
        );
    }

    #[test]
    fn create_request_tolerates_missing_description() {
        let req: CreateOrderRequest =
            serde_json::from_value(json!({ "productIds": [1, 3] })).unwrap();
        assert!(req.order_description.is_none());
        assert_eq!(req.product_ids, Some(vec![1, 3]));
    }

    #[test]
    fn detail_serializes_nested_associations() {
        let detail = OrderDetail {
            order: Order {
                id: 9,
                order_description: "two things".into(),
                created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            },
            products: vec![OrderProductMap {
                id: 21,
                order_id: 9,
                product_id: 1,
                product: Product {
                    id: 1,
                    product_name: "HP laptop".into(),
                    product_description: Some("This is HP laptop".into()),
                },
            }],
        };

        let value = serde_json::to_value(OrderDetailResponse::from(detail)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 9,
                "orderDescription": "two things",
                "createdAt": "2024-05-01T12:00:00.000Z",
                "OrderProductMaps": [{
                    "id": 21,
                    "orderId": 9,
                    "productId": 1,
                    "Product": {
                        "id": 1,
                        "productName": "HP laptop",
                        "productDescription": "This is HP laptop"
                    }
                }]
            })
        );
    }
}
