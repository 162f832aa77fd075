// ============================================================================
// CATALOG SERVICE - Secciones, productos, ficha y países
// ============================================================================

use crate::error::ApiError;
use crate::models::{Category, Page, Product, Section};
use crate::services::api_client::ApiClient;
use crate::state::QueryState;

#[derive(Clone)]
pub struct CatalogService {
    api: ApiClient,
}

impl CatalogService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn sections(&self) -> Result<Vec<Section>, ApiError> {
        self.api.get("sections/").await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.api.get("category/").await
    }

    /// Países presentes en el catálogo (filtro del sidebar)
    pub async fn countries(&self) -> Result<Vec<String>, ApiError> {
        self.api.get("countries/").await
    }

    pub async fn products(&self, query: &QueryState) -> Result<Page<Product>, ApiError> {
        let qs = query.to_query_string();
        let path = if qs.is_empty() {
            "products/".to_string()
        } else {
            format!("products/?{}", qs)
        };
        self.api.get(&path).await
    }

    /// `None` si el producto no existe (404)
    pub async fn product(&self, id: u64) -> Result<Option<Product>, ApiError> {
        match self.api.get(&format!("products/{}/", id)).await {
            Ok(product) => Ok(Some(product)),
            Err(ApiError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Búsqueda por texto (título, descripción, tipo) para las sugerencias
    pub async fn suggestions(&self, text: &str, limit: usize) -> Result<Vec<Product>, ApiError> {
        let path = format!("products/?search={}", urlencoding::encode(text));
        let page: Page<Product> = self.api.get(&path).await?;
        Ok(page.results.into_iter().take(limit).collect())
    }
}
