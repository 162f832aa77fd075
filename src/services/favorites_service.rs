use crate::error::ApiError;
use crate::models::page::ListOrPage;
use crate::models::{FavoriteItem, FavoriteRequest};
use crate::services::api_client::ApiClient;

#[derive(Clone)]
pub struct FavoritesService {
    api: ApiClient,
}

impl FavoritesService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<FavoriteItem>, ApiError> {
        let items: ListOrPage<FavoriteItem> = self.api.get("favorites/").await?;
        Ok(items.into_vec())
    }

    pub async fn add(&self, product: u64) -> Result<(), ApiError> {
        self.api.post_no_content("favorites/", &FavoriteRequest { product }).await
    }

    /// Se borra por id de producto, no por id del favorito
    pub async fn remove(&self, product: u64) -> Result<(), ApiError> {
        self.api.delete(&format!("favorites/delete/?product={}", product)).await
    }
}
