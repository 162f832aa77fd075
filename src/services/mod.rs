// ============================================================================
// SERVICES - Red (transport + ApiClient), recursos del API y sesión
// ============================================================================

pub mod transport;
pub mod scheduler;
pub mod api_client;
pub mod auth_service;
pub mod catalog_service;
pub mod cart_service;
pub mod favorites_service;
pub mod order_service;
pub mod session_service;

pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method};
pub use scheduler::Scheduler;
pub use api_client::ApiClient;
pub use auth_service::AuthService;
pub use catalog_service::CatalogService;
pub use cart_service::CartService;
pub use favorites_service::FavoritesService;
pub use order_service::OrderService;
pub use session_service::{SessionManager, SessionOutcome};

#[cfg(target_arch = "wasm32")]
pub use transport::WebTransport;
#[cfg(target_arch = "wasm32")]
pub use scheduler::WebScheduler;
