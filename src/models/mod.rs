// ============================================================================
// MODELS - Estructuras compartidas con el backend (JSON del API)
// ============================================================================

pub mod price;
pub mod auth;
pub mod product;
pub mod cart;
pub mod order;
pub mod page;

pub use auth::{
    ChangePasswordRequest, LoginRequest, PasswordResetConfirm, ProfileUpdate, RegisterRequest,
    UserProfile,
};
pub use product::{Category, Product, ProductImage, Section, ShortProduct};
pub use cart::{AddToCart, CartItem, FavoriteItem, FavoriteRequest, QuantityUpdate};
pub use order::{Order, OrderItem, Promocode};
pub use page::Page;
