// ============================================================================
// FAVORITES VIEWMODEL - Lista de favoritos y paso al carrito
// ============================================================================

use std::collections::BTreeSet;

use futures::future::join_all;

use crate::models::FavoriteItem;
use crate::services::{CartService, FavoritesService, SessionManager};
use crate::state::ReactiveState;
use crate::utils::constants::{
    MSG_CART_ADD_FAILED, MSG_FAVORITES_CLEAR_FAILED, MSG_FAVORITES_LOAD_FAILED,
    MSG_FAVORITES_REMOVE_FAILED,
};
use crate::viewmodels::ui_message_or;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FavoritesState {
    pub items: Vec<FavoriteItem>,
    /// Productos que ya están en el carrito ("В корзине")
    pub in_cart: BTreeSet<u64>,
    pub loading: bool,
    pub error: Option<String>,
}

impl FavoritesState {
    pub fn is_in_cart(&self, product_id: u64) -> bool {
        self.in_cart.contains(&product_id)
    }
}

#[derive(Clone)]
pub struct FavoritesViewModel {
    favorites: FavoritesService,
    cart: CartService,
    session: SessionManager,
    state: ReactiveState<FavoritesState>,
}

impl FavoritesViewModel {
    pub fn new(favorites: FavoritesService, cart: CartService, session: SessionManager) -> Self {
        Self {
            favorites,
            cart,
            session,
            state: ReactiveState::default(),
        }
    }

    pub fn state(&self) -> FavoritesState {
        self.state.get()
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) {
        self.state.subscribe(callback);
    }

    pub async fn load(&self) {
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });
        let favorites = &self.favorites;
        match self.session.authorized(move || favorites.list()).await {
            Ok(items) => {
                log::info!("❤️ [FAVORITES] {} productos", items.len());
                self.state.update(|s| {
                    s.items = items;
                    s.loading = false;
                });
            }
            Err(e) => {
                log::error!("❌ [FAVORITES] Error cargando: {}", e);
                self.state.update(|s| {
                    s.loading = false;
                    s.error = Some(ui_message_or(&e, MSG_FAVORITES_LOAD_FAILED));
                });
                return;
            }
        }

        // marca "en el carrito"; si falla solo se pierde la marca
        let cart = &self.cart;
        match self.session.authorized(move || cart.list()).await {
            Ok(items) => self.state.update(|s| {
                s.in_cart = items.iter().map(|item| item.product_data.id).collect();
            }),
            Err(e) => log::warn!("⚠️ [FAVORITES] No se pudo comprobar el carrito: {}", e),
        }
    }

    /// Quita por id de producto; si falla se restaura la lista
    pub async fn remove(&self, product_id: u64) {
        let previous = self.state.update(|s| {
            let previous = s.items.clone();
            s.items.retain(|item| item.product_data.id != product_id);
            s.error = None;
            previous
        });
        let favorites = &self.favorites;
        if let Err(e) = self.session.authorized(move || favorites.remove(product_id)).await {
            log::warn!("❌ [FAVORITES] No se pudo quitar {}: {}", product_id, e);
            self.state.update(|s| {
                s.items = previous;
                s.error = Some(MSG_FAVORITES_REMOVE_FAILED.to_string());
            });
        }
    }

    pub async fn clear(&self) {
        let previous = self.state.update(|s| {
            s.error = None;
            std::mem::take(&mut s.items)
        });
        if previous.is_empty() {
            return;
        }
        let (favorites, session) = (&self.favorites, &self.session);
        let results = join_all(
            previous
                .iter()
                .map(move |item| {
                    let id = item.product_data.id;
                    session.authorized(move || favorites.remove(id))
                }),
        )
        .await;
        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            // parte ya se borró en el servidor: se recarga en vez de restaurar
            log::warn!("⚠️ [FAVORITES] {} de {} borrados fallaron", failed, previous.len());
            self.load().await;
            self.state.update(|s| s.error = Some(MSG_FAVORITES_CLEAR_FAILED.to_string()));
        } else {
            log::info!("🧹 [FAVORITES] Favoritos vaciados ({} productos)", previous.len());
        }
    }

    /// "В корзину": añade una unidad; si ya estaba no se repite la petición
    pub async fn add_to_cart(&self, product_id: u64) -> Result<(), String> {
        if self.state.with(|s| s.is_in_cart(product_id)) {
            return Ok(());
        }
        let cart = &self.cart;
        match self.session.authorized(move || cart.add(product_id, 1)).await {
            Ok(_) => {
                self.state.update(|s| {
                    s.in_cart.insert(product_id);
                });
                Ok(())
            }
            Err(e) => {
                log::warn!("❌ [FAVORITES] No se pudo añadir {} al carrito: {}", product_id, e);
                Err(ui_message_or(&e, MSG_CART_ADD_FAILED))
            }
        }
    }
}
