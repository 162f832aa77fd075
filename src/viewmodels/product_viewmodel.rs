// ============================================================================
// PRODUCT VIEWMODEL - Ficha de producto, favorito y añadir al carrito
// ============================================================================

use crate::error::ApiError;
use crate::models::Product;
use crate::services::{CartService, CatalogService, FavoritesService, SessionManager};
use crate::state::ReactiveState;
use crate::utils::constants::MSG_LOGIN_REQUIRED;
use crate::viewmodels::ui_message;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ProductState {
    #[default]
    Loading,
    Loaded(Product),
    /// 404: la vista muestra "товар не найден", no un banner de error
    NotFound,
    Failed(String),
}

#[derive(Clone)]
pub struct ProductViewModel {
    catalog: CatalogService,
    cart: CartService,
    favorites: FavoritesService,
    session: SessionManager,
    state: ReactiveState<ProductState>,
}

impl ProductViewModel {
    pub fn new(
        catalog: CatalogService,
        cart: CartService,
        favorites: FavoritesService,
        session: SessionManager,
    ) -> Self {
        Self {
            catalog,
            cart,
            favorites,
            session,
            state: ReactiveState::default(),
        }
    }

    pub fn state(&self) -> ProductState {
        self.state.get()
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) {
        self.state.subscribe(callback);
    }

    pub async fn load(&self, id: u64) {
        self.state.set(ProductState::Loading);
        let next = match self.catalog.product(id).await {
            Ok(Some(product)) => ProductState::Loaded(product),
            Ok(None) => {
                log::info!("⚠️ [PRODUCT] Producto {} no existe", id);
                ProductState::NotFound
            }
            Err(e) => {
                log::error!("❌ [PRODUCT] Error cargando {}: {}", id, e);
                ProductState::Failed(ui_message(&e))
            }
        };
        self.state.set(next);
    }

    fn loaded_id(&self) -> Option<(u64, bool)> {
        self.state.with(|s| match s {
            ProductState::Loaded(p) => Some((p.id, p.is_fav)),
            _ => None,
        })
    }

    /// Marca o desmarca favorito. Devuelve el nuevo valor de `is_fav`.
    pub async fn toggle_favorite(&self) -> Result<bool, String> {
        let (id, is_fav) = self.loaded_id().ok_or_else(|| "Товар не загружен".to_string())?;
        if !self.session.is_authenticated() {
            return Err(MSG_LOGIN_REQUIRED.to_string());
        }

        let favorites = &self.favorites;
        let result = if is_fav {
            self.session.authorized(move || favorites.remove(id)).await
        } else {
            self.session.authorized(move || favorites.add(id)).await
        };
        match result {
            Ok(()) => {
                self.state.update(|s| {
                    if let ProductState::Loaded(p) = s {
                        p.is_fav = !is_fav;
                    }
                });
                log::info!("✅ [PRODUCT] Favorito {} -> {}", id, !is_fav);
                Ok(!is_fav)
            }
            Err(e) => {
                log::warn!("❌ [PRODUCT] Favorito {} falló: {}", id, e);
                Err(ui_message(&e))
            }
        }
    }

    pub async fn add_to_cart(&self, quantity: u32) -> Result<(), String> {
        let (id, _) = self.loaded_id().ok_or_else(|| "Товар не загружен".to_string())?;
        if !self.session.is_authenticated() {
            return Err(MSG_LOGIN_REQUIRED.to_string());
        }
        let cart = &self.cart;
        let quantity = quantity.max(1);
        match self.session.authorized(move || cart.add(id, quantity)).await {
            Ok(_) => {
                log::info!("🛒 [PRODUCT] {} x{} añadido al carrito", id, quantity);
                Ok(())
            }
            Err(ApiError::Validation { message, .. }) => Err(message),
            Err(e) => Err(ui_message(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use crate::config::SessionConfig;
    use crate::services::{ApiClient, AuthService, Method};
    use crate::testing::{user_json, Harness, BASE_URL};
    use crate::utils::storage::MemoryStore;

    const PRODUCT: &str = r#"{"id": 12, "title": "Крем для рук", "price": "890.00", "discount_price": "690.00", "is_fav": false}"#;

    fn viewmodel(h: &Harness) -> (ProductViewModel, SessionManager) {
        let api = ApiClient::new(BASE_URL, h.transport.clone());
        let session = SessionManager::new(
            AuthService::new(api.clone()),
            h.scheduler.clone(),
            Rc::new(MemoryStore::new()),
            SessionConfig::default(),
        );
        let vm = ProductViewModel::new(
            CatalogService::new(api.clone()),
            CartService::new(api.clone()),
            FavoritesService::new(api),
            session.clone(),
        );
        (vm, session)
    }

    fn sign_in(h: &mut Harness, session: &SessionManager) {
        h.transport.respond(Method::Post, "login/", 200, "{}");
        h.transport.respond(Method::Get, "users/me/", 200, user_json());
        h.block_on(session.login("anna@example.com", "secret")).unwrap();
    }

    #[test]
    fn missing_product_is_not_found_state() {
        let mut h = Harness::new();
        h.transport.respond(Method::Get, "products/99/", 404, r#"{"detail": "No Product matches the given query."}"#);
        let (vm, _) = viewmodel(&h);

        h.block_on(vm.load(99));
        assert_eq!(vm.state(), ProductState::NotFound);
    }

    #[test]
    fn favorite_toggles_both_ways() {
        let mut h = Harness::new();
        let (vm, session) = viewmodel(&h);
        sign_in(&mut h, &session);
        h.transport.respond(Method::Get, "products/12/", 200, PRODUCT);
        h.transport.respond(Method::Post, "favorites/", 201, r#"{"id": 1, "product": 12}"#);
        h.transport.respond(Method::Delete, "favorites/delete/", 204, "");

        h.block_on(vm.load(12));
        assert_eq!(h.block_on(vm.toggle_favorite()), Ok(true));
        assert_eq!(h.block_on(vm.toggle_favorite()), Ok(false));

        let deletes = h.transport.urls(Method::Delete, "favorites/delete/");
        assert!(deletes[0].ends_with("/api/favorites/delete/?product=12"));
        let posts = h.transport.requests();
        let add = posts.iter().find(|r| r.url.ends_with("/api/favorites/")).unwrap();
        assert_eq!(add.body.as_ref().unwrap()["product"], 12);
    }

    #[test]
    fn anonymous_user_is_asked_to_log_in() {
        let mut h = Harness::new();
        let (vm, _) = viewmodel(&h);
        h.transport.respond(Method::Get, "products/12/", 200, PRODUCT);

        h.block_on(vm.load(12));
        assert_eq!(h.block_on(vm.add_to_cart(1)), Err(MSG_LOGIN_REQUIRED.to_string()));
        assert_eq!(h.transport.request_count(Method::Post, "cart/"), 0);
    }

    #[test]
    fn add_to_cart_posts_product_and_quantity() {
        let mut h = Harness::new();
        let (vm, session) = viewmodel(&h);
        sign_in(&mut h, &session);
        h.transport.respond(Method::Get, "products/12/", 200, PRODUCT);
        h.transport.respond(
            Method::Post,
            "cart/",
            201,
            r#"{"id": 5, "quantity": 2, "product_data": {"id": 12, "title": "Крем для рук", "price": "890.00", "discount_price": "690.00"}}"#,
        );

        h.block_on(vm.load(12));
        assert_eq!(h.block_on(vm.add_to_cart(2)), Ok(()));
        let sent = h.transport.requests();
        let add = sent.iter().find(|r| r.url.ends_with("/api/cart/")).unwrap();
        assert_eq!(add.body.as_ref().unwrap()["quantity"], 2);
    }
}
