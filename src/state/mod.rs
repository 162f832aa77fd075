// ============================================================================
// STATE MODULE - Estado puro (sin red) + notificaciones
// ============================================================================

pub mod reactivity;
pub mod session_state;
pub mod query_state;

pub use reactivity::*;
pub use session_state::*;
pub use query_state::*;
