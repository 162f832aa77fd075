use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use super::price::{de_opt_price, de_price};
use super::product::ShortProduct;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct OrderItem {
    pub product: ShortProduct,
    pub quantity: u32,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Order {
    pub id: u64,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub payment_link: Option<String>,
    #[serde(default, deserialize_with = "de_opt_price")]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub promo: Option<String>,
    #[serde(default, deserialize_with = "de_opt_price")]
    pub final_price: Option<f64>,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Total a mostrar: final (con promo) si existe, si no el total bruto
    pub fn amount_due(&self) -> f64 {
        self.final_price.or(self.total_price).unwrap_or(0.0)
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// "dd.mm.yyyy" para la cabecera del pedido
    pub fn created_date_label(&self) -> Option<String> {
        self.created_at.map(|dt| dt.format("%d.%m.%Y").to_string())
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Promocode {
    pub code: String,
    pub percent: u32,
    #[serde(deserialize_with = "de_price")]
    pub min_price: f64,
}
