// ============================================================================
// VIEWMODELS - Convierten resultados del API en estado de UI
// ============================================================================
// Ningún error es fatal: todo termina en un estado que la vista sabe pintar.
// ============================================================================

pub mod catalog_viewmodel;
pub mod search_viewmodel;
pub mod product_viewmodel;
pub mod cart_viewmodel;
pub mod favorites_viewmodel;
pub mod orders_viewmodel;
pub mod profile_viewmodel;

pub use catalog_viewmodel::{CatalogState, CatalogViewModel};
pub use search_viewmodel::{SearchSuggestions, SuggestionState};
pub use product_viewmodel::{ProductState, ProductViewModel};
pub use cart_viewmodel::{normalize_quantity, CartState, CartViewModel};
pub use favorites_viewmodel::{FavoritesState, FavoritesViewModel};
pub use orders_viewmodel::{OrdersState, OrdersViewModel};
pub use profile_viewmodel::{AccountFlowState, ProfileViewModel};

use crate::error::ApiError;
use crate::utils::constants::{MSG_LOGIN_REQUIRED, MSG_NETWORK_ERROR};

/// Texto para la UI: red y sesión tienen mensaje fijo, el resto viene del backend
pub fn ui_message(error: &ApiError) -> String {
    match error {
        ApiError::Network(_) => MSG_NETWORK_ERROR.to_string(),
        ApiError::Unauthorized => MSG_LOGIN_REQUIRED.to_string(),
        other => other.message(),
    }
}

/// Igual que `ui_message`, pero errores no explicados por el backend usan `fallback`
pub(crate) fn ui_message_or(error: &ApiError, fallback: &str) -> String {
    match error {
        ApiError::Validation { .. } | ApiError::Network(_) | ApiError::Unauthorized => ui_message(error),
        _ => fallback.to_string(),
    }
}
