// ============================================================================
// ORDER SERVICE - Historial de pedidos, promocódigos y checkout
// ============================================================================

use serde::{Deserialize, Serialize};
use crate::error::ApiError;
use crate::models::page::ListOrPage;
use crate::models::{Order, Promocode};
use crate::services::api_client::ApiClient;

#[derive(Debug, Clone, Serialize)]
struct CreateOrder<'a> {
    shipping_address: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    promo: Option<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
struct CreatedOrder {
    #[serde(default)]
    payment_link: Option<String>,
}

#[derive(Clone)]
pub struct OrderService {
    api: ApiClient,
}

impl OrderService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `orders/` no está paginado; acepta lista, página u objeto suelto
    pub async fn list(&self) -> Result<Vec<Order>, ApiError> {
        let orders: Option<ListOrPage<Order>> = self.api.get("orders/").await?;
        Ok(orders.map(ListOrPage::into_vec).unwrap_or_default())
    }

    /// `None` si el código no existe
    pub async fn promo(&self, code: &str) -> Result<Option<Promocode>, ApiError> {
        let path = format!("promo/{}/", urlencoding::encode(code));
        match self.api.get(&path).await {
            Ok(promo) => Ok(Some(promo)),
            Err(ApiError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Crea el pedido con el carrito actual; devuelve el enlace de pago
    pub async fn place_order(&self, shipping_address: &str, promo: Option<&str>) -> Result<Option<String>, ApiError> {
        let created: CreatedOrder = self
            .api
            .post("orders/", &CreateOrder { shipping_address, promo })
            .await?;
        Ok(created.payment_link)
    }
}
