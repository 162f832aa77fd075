// ============================================================================
// CART VIEWMODEL - Carrito, selección, promocódigo y checkout
// ============================================================================
// - cantidades normalizadas a 1..=max, sin petición si no cambian
// - actualización optimista; si el backend falla se recarga el carrito
// - totales solo sobre los artículos seleccionados
// ============================================================================

use std::collections::BTreeSet;

use futures::future::join_all;

use crate::models::{CartItem, Promocode};
use crate::services::{CartService, OrderService, SessionManager};
use crate::state::ReactiveState;
use crate::utils::constants::{
    promo_min_price_message, MSG_CART_CLEAR_FAILED, MSG_CART_LOAD_FAILED, MSG_CART_REMOVE_FAILED,
    MSG_CART_UPDATE_FAILED, MSG_PROMO_CHECK_FAILED, MSG_PROMO_EMPTY, MSG_PROMO_NOT_FOUND,
    MSG_PROMO_NO_SELECTION, MSG_SHIPPING_ADDRESS_REQUIRED,
};
use crate::viewmodels::{ui_message, ui_message_or};

const MSG_CART_EMPTY: &str = "Корзина пуста";

/// Texto del input de cantidad -> cantidad válida (`"abc"`/`"0"` -> 1, `"150"` -> max)
pub fn normalize_quantity(input: &str, max: u32) -> u32 {
    let max = max.max(1);
    match input.trim().parse::<i64>() {
        Ok(n) if n <= 0 => 1,
        Ok(n) if n > i64::from(max) => max,
        Ok(n) => n as u32,
        Err(_) => 1,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartState {
    pub items: Vec<CartItem>,
    pub selected: BTreeSet<u64>,
    pub loading: bool,
    pub error: Option<String>,
    pub promo: Option<Promocode>,
    pub promo_error: Option<String>,
}

impl CartState {
    pub fn selected_items(&self) -> impl Iterator<Item = &CartItem> + '_ {
        self.items.iter().filter(move |item| self.selected.contains(&item.id))
    }

    pub fn is_selected(&self, item_id: u64) -> bool {
        self.selected.contains(&item_id)
    }

    /// Unidades totales (todas, seleccionadas o no)
    pub fn total_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Suma a precio de lista
    pub fn full_total(&self) -> f64 {
        self.selected_items()
            .map(|item| item.product_data.price * f64::from(item.quantity))
            .sum()
    }

    /// Suma con los descuentos de producto aplicados
    pub fn subtotal(&self) -> f64 {
        self.selected_items().map(CartItem::line_total).sum()
    }

    pub fn product_discount(&self) -> f64 {
        round2(self.full_total() - self.subtotal())
    }

    pub fn promo_applies(&self) -> bool {
        match &self.promo {
            Some(promo) => self.subtotal() >= promo.min_price,
            None => false,
        }
    }

    pub fn promo_discount(&self) -> f64 {
        match &self.promo {
            Some(promo) if self.promo_applies() => round2(self.subtotal() * f64::from(promo.percent) / 100.0),
            _ => 0.0,
        }
    }

    pub fn final_total(&self) -> f64 {
        round2(self.subtotal() - self.promo_discount())
    }

    /// Recalcula el aviso del promo tras cambiar selección o cantidades
    fn recheck_promo(&mut self) {
        self.promo_error = match &self.promo {
            Some(promo) if !self.promo_applies() => Some(promo_min_price_message(promo.min_price)),
            _ => None,
        };
    }
}

#[derive(Clone)]
pub struct CartViewModel {
    cart: CartService,
    orders: OrderService,
    session: SessionManager,
    max_quantity: u32,
    state: ReactiveState<CartState>,
}

impl CartViewModel {
    pub fn new(cart: CartService, orders: OrderService, session: SessionManager, max_quantity: u32) -> Self {
        Self {
            cart,
            orders,
            session,
            max_quantity,
            state: ReactiveState::default(),
        }
    }

    pub fn state(&self) -> CartState {
        self.state.get()
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) {
        self.state.subscribe(callback);
    }

    /// Carga el carrito; todo queda seleccionado
    pub async fn load(&self) {
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });
        let cart = &self.cart;
        match self.session.authorized(move || cart.list()).await {
            Ok(items) => {
                log::info!("🛒 [CART] {} artículos", items.len());
                self.state.update(|s| {
                    s.selected = items.iter().map(|item| item.id).collect();
                    s.items = items;
                    s.loading = false;
                    s.recheck_promo();
                });
            }
            Err(e) => {
                log::error!("❌ [CART] Error cargando carrito: {}", e);
                self.state.update(|s| {
                    s.loading = false;
                    s.error = Some(ui_message_or(&e, MSG_CART_LOAD_FAILED));
                });
            }
        }
    }

    /// Confirma el texto del input. Devuelve `true` si hubo que enviar algo.
    pub async fn set_quantity(&self, item_id: u64, input: &str) -> bool {
        let quantity = normalize_quantity(input, self.max_quantity);
        self.update_quantity(item_id, quantity).await
    }

    pub async fn increment(&self, item_id: u64) -> bool {
        match self.quantity_of(item_id) {
            Some(current) => self.update_quantity(item_id, (current + 1).min(self.max_quantity)).await,
            None => false,
        }
    }

    pub async fn decrement(&self, item_id: u64) -> bool {
        match self.quantity_of(item_id) {
            Some(current) if current > 1 => self.update_quantity(item_id, current - 1).await,
            _ => false,
        }
    }

    fn quantity_of(&self, item_id: u64) -> Option<u32> {
        self.state
            .with(|s| s.items.iter().find(|item| item.id == item_id).map(|item| item.quantity))
    }

    async fn update_quantity(&self, item_id: u64, quantity: u32) -> bool {
        match self.quantity_of(item_id) {
            Some(current) if current != quantity => {}
            _ => return false,
        }

        self.state.update(|s| {
            if let Some(item) = s.items.iter_mut().find(|item| item.id == item_id) {
                item.quantity = quantity;
            }
            s.error = None;
            s.recheck_promo();
        });

        let cart = &self.cart;
        if let Err(e) = self.session.authorized(move || cart.update_quantity(item_id, quantity)).await {
            log::warn!("❌ [CART] Cantidad de {} no guardada: {}", item_id, e);
            self.load().await;
            self.state.update(|s| s.error = Some(MSG_CART_UPDATE_FAILED.to_string()));
        }
        true
    }

    /// Quita un artículo; si falla se restaura la lista anterior
    pub async fn remove(&self, item_id: u64) {
        let previous = self.state.update(|s| {
            let previous = (s.items.clone(), s.selected.clone());
            s.items.retain(|item| item.id != item_id);
            s.selected.remove(&item_id);
            s.error = None;
            s.recheck_promo();
            previous
        });

        let cart = &self.cart;
        if let Err(e) = self.session.authorized(move || cart.remove(item_id)).await {
            log::warn!("❌ [CART] No se pudo borrar {}: {}", item_id, e);
            self.state.update(|s| {
                s.items = previous.0;
                s.selected = previous.1;
                s.error = Some(MSG_CART_REMOVE_FAILED.to_string());
                s.recheck_promo();
            });
        }
    }

    /// Borra todos los artículos (en paralelo)
    pub async fn clear(&self) {
        let ids: Vec<u64> = self.state.with(|s| s.items.iter().map(|item| item.id).collect());
        if ids.is_empty() {
            return;
        }
        self.state.update(|s| {
            s.items.clear();
            s.selected.clear();
            s.loading = true;
            s.error = None;
        });

        let cart = &self.cart;
        let session = &self.session;
        let results = join_all(ids.iter().map(move |&id| session.authorized(move || cart.remove(id)))).await;
        let failed = results.iter().filter(|r| r.is_err()).count();

        if failed == 0 {
            log::info!("🧹 [CART] Carrito vaciado ({} artículos)", ids.len());
            self.state.update(|s| {
                s.loading = false;
                s.promo = None;
                s.promo_error = None;
            });
        } else {
            log::warn!("⚠️ [CART] {} de {} borrados fallaron", failed, ids.len());
            self.load().await;
            self.state.update(|s| s.error = Some(MSG_CART_CLEAR_FAILED.to_string()));
        }
    }

    pub fn toggle_selected(&self, item_id: u64) {
        self.state.update(|s| {
            if !s.selected.remove(&item_id) && s.items.iter().any(|item| item.id == item_id) {
                s.selected.insert(item_id);
            }
            s.recheck_promo();
        });
    }

    pub fn select_all(&self, selected: bool) {
        self.state.update(|s| {
            s.selected = if selected {
                s.items.iter().map(|item| item.id).collect()
            } else {
                BTreeSet::new()
            };
            s.recheck_promo();
        });
    }

    /// Comprueba el código contra el subtotal seleccionado
    pub async fn apply_promo(&self, code: &str) {
        let code = code.trim();
        let precheck = self.state.with(|s| {
            if code.is_empty() {
                Some(MSG_PROMO_EMPTY)
            } else if s.selected.is_empty() {
                Some(MSG_PROMO_NO_SELECTION)
            } else {
                None
            }
        });
        if let Some(message) = precheck {
            self.state.update(|s| s.promo_error = Some(message.to_string()));
            return;
        }

        match self.orders.promo(code).await {
            Ok(Some(promo)) => {
                let subtotal = self.state.with(CartState::subtotal);
                if subtotal < promo.min_price {
                    log::info!("⚠️ [CART] Promo {} requiere {}", promo.code, promo.min_price);
                    self.state.update(|s| s.promo_error = Some(promo_min_price_message(promo.min_price)));
                } else {
                    log::info!("✅ [CART] Promo {} (-{}%)", promo.code, promo.percent);
                    self.state.update(|s| {
                        s.promo = Some(Promocode {
                            code: code.to_string(),
                            ..promo
                        });
                        s.promo_error = None;
                    });
                }
            }
            Ok(None) => self.state.update(|s| s.promo_error = Some(MSG_PROMO_NOT_FOUND.to_string())),
            Err(e) => {
                log::warn!("❌ [CART] Error comprobando promo: {}", e);
                self.state.update(|s| s.promo_error = Some(MSG_PROMO_CHECK_FAILED.to_string()));
            }
        }
    }

    pub fn remove_promo(&self) {
        self.state.update(|s| {
            s.promo = None;
            s.promo_error = None;
        });
    }

    /// Crea el pedido y devuelve el enlace de pago
    pub async fn checkout(&self, shipping_address: &str) -> Result<Option<String>, String> {
        let address = shipping_address.trim();
        if address.is_empty() {
            return Err(MSG_SHIPPING_ADDRESS_REQUIRED.to_string());
        }
        let (is_empty, promo) = self.state.with(|s| {
            let promo = s.promo.as_ref().filter(|_| s.promo_applies()).map(|p| p.code.clone());
            (s.items.is_empty(), promo)
        });
        if is_empty {
            return Err(MSG_CART_EMPTY.to_string());
        }

        let (orders, promo) = (&self.orders, promo.as_deref());
        match self.session.authorized(move || orders.place_order(address, promo)).await {
            Ok(link) => {
                log::info!("✅ [CART] Pedido creado");
                self.remove_promo();
                self.load().await;
                Ok(link)
            }
            Err(e) => {
                log::error!("❌ [CART] Error creando pedido: {}", e);
                Err(ui_message(&e))
            }
        }
    }
}
