// ============================================================================
// ORDERS VIEWMODEL - Historial de pedidos con detalle desplegable
// ============================================================================

use std::collections::BTreeSet;

use crate::models::Order;
use crate::services::{OrderService, SessionManager};
use crate::state::ReactiveState;
use crate::utils::constants::MSG_ORDERS_LOAD_FAILED;
use crate::viewmodels::ui_message_or;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrdersState {
    pub orders: Vec<Order>,
    pub expanded: BTreeSet<u64>,
    pub loaded: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl OrdersState {
    /// "У вас пока нет заказов": solo tras una carga correcta
    pub fn is_empty(&self) -> bool {
        self.loaded && self.error.is_none() && self.orders.is_empty()
    }

    pub fn is_expanded(&self, order_id: u64) -> bool {
        self.expanded.contains(&order_id)
    }
}

#[derive(Clone)]
pub struct OrdersViewModel {
    orders: OrderService,
    session: SessionManager,
    state: ReactiveState<OrdersState>,
}

impl OrdersViewModel {
    pub fn new(orders: OrderService, session: SessionManager) -> Self {
        Self {
            orders,
            session,
            state: ReactiveState::default(),
        }
    }

    pub fn state(&self) -> OrdersState {
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
        let orders = &self.orders;
        match self.session.authorized(move || orders.list()).await {
            Ok(mut list) => {
                // más recientes primero
                list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
                log::info!("📦 [ORDERS] {} pedidos", list.len());
                self.state.update(|s| {
                    s.expanded.retain(|id| list.iter().any(|o| o.id == *id));
                    s.orders = list;
                    s.loaded = true;
                    s.loading = false;
                });
            }
            Err(e) => {
                log::error!("❌ [ORDERS] Error cargando pedidos: {}", e);
                self.state.update(|s| {
                    s.loading = false;
                    s.error = Some(ui_message_or(&e, MSG_ORDERS_LOAD_FAILED));
                });
            }
        }
    }

    pub fn toggle(&self, order_id: u64) {
        self.state.update(|s| {
            if !s.expanded.remove(&order_id) {
                s.expanded.insert(order_id);
            }
        });
    }
}
