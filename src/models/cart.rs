use serde::{Deserialize, Serialize};
use super::product::ShortProduct;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct CartItem {
    pub id: u64,
    pub product_data: ShortProduct,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.product_data.effective_price() * f64::from(self.quantity)
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct FavoriteItem {
    pub id: u64,
    pub product_data: ShortProduct,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct AddToCart {
    pub product: u64,
    pub quantity: u32,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct QuantityUpdate {
    pub quantity: u32,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct FavoriteRequest {
    pub product: u64,
}
