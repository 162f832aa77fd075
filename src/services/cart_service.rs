// ============================================================================
// CART SERVICE - Carrito del usuario (requiere sesión)
// ============================================================================

use crate::error::ApiError;
use crate::models::page::ListOrPage;
use crate::models::{AddToCart, CartItem, QuantityUpdate};
use crate::services::api_client::ApiClient;

#[derive(Clone)]
pub struct CartService {
    api: ApiClient,
}

impl CartService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<CartItem>, ApiError> {
        let items: ListOrPage<CartItem> = self.api.get("cart/").await?;
        Ok(items.into_vec())
    }

    pub async fn add(&self, product: u64, quantity: u32) -> Result<CartItem, ApiError> {
        self.api.post("cart/", &AddToCart { product, quantity }).await
    }

    pub async fn update_quantity(&self, item_id: u64, quantity: u32) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> = self
            .api
            .patch(&format!("cart/{}/", item_id), &QuantityUpdate { quantity })
            .await?;
        Ok(())
    }

    pub async fn remove(&self, item_id: u64) -> Result<(), ApiError> {
        self.api.delete(&format!("cart/{}/", item_id)).await
    }
}
