//! Product endpoints

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::Product;
use crate::http::error::{ApiError, DbResultExt};
use crate::state::AppState;

const FETCH_FAILED: &str = "Failed to fetch products";

/// Product response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i32,
    pub product_name: String,
    pub product_description: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            product_name: p.product_name,
            product_description: p.product_description,
        }
    }
}

/// GET /api/products - list all products
async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state.products().list().await.or_fail(FETCH_FAILED)?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// Product routes
pub fn router() -> Router<AppState> {
    Router::new().route("/api/products", get(list_products))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_camel_case_with_null_description() {
        let response = ProductResponse::from(Product {
            id: 3,
            product_name: "Car".into(),
            product_description: None,
        });

        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({ "id": 3, "productName": "Car", "productDescription": null })
        );
    }
}
