// ============================================================================
// REVOLLINE STOREFRONT - NÚCLEO DEL CLIENTE (RUST / WASM)
// ============================================================================
// Arquitectura MVVM:
// - ViewModels: Estado de UI + lógica (lo que pinta el renderer)
// - Services: SOLO comunicación API + sesión
// - State: Estado puro (máquina de sesión, query del catálogo) + reactividad
// - Models: Estructuras compartidas con el backend
// ============================================================================

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(test)]
mod testing;

pub use app::Storefront;
pub use config::AppConfig;
pub use error::ApiError;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    use crate::app::Storefront;
    use crate::config::CONFIG;
    use crate::services::{SessionOutcome, WebScheduler, WebTransport};
    use crate::utils::storage::LocalStorage;

    // Instancia única del contexto, como la App global del renderer
    thread_local! {
        static STOREFRONT: RefCell<Option<Rc<Storefront>>> = RefCell::new(None);
    }

    /// Contexto ya inicializado (para el renderer)
    pub fn storefront() -> Option<Rc<Storefront>> {
        STOREFRONT.with(|cell| cell.borrow().clone())
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if CONFIG.is_logging_enabled() {
            wasm_logger::init(wasm_logger::Config::default());
        }
        log::info!("🚀 Revolline storefront ({})", CONFIG.environment);

        let shop = Rc::new(Storefront::new(
            CONFIG.clone(),
            Rc::new(WebTransport::new(CONFIG.network_timeout_seconds)),
            Rc::new(WebScheduler),
            Rc::new(LocalStorage),
        ));
        STOREFRONT.with(|cell| *cell.borrow_mut() = Some(shop.clone()));

        wasm_bindgen_futures::spawn_local(async move {
            match shop.session().restore().await {
                Ok(SessionOutcome::Authenticated(user)) => {
                    log::info!("✅ [APP] Sesión activa: {}", user.display_name())
                }
                Ok(SessionOutcome::Unauthenticated) => log::info!("👤 [APP] Visitante anónimo"),
                Err(e) => log::warn!("⚠️ [APP] Sesión sin verificar: {}", e),
            }
        });
        Ok(())
    }

    /// Logout llamable desde JavaScript
    #[wasm_bindgen]
    pub fn logout() -> js_sys::Promise {
        wasm_bindgen_futures::future_to_promise(async move {
            if let Some(shop) = storefront() {
                shop.session().logout().await;
            }
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen]
    pub fn is_authenticated() -> bool {
        storefront().map_or(false, |shop| shop.session().is_authenticated())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::storefront;
