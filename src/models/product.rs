use serde::{Deserialize, Serialize};
use super::price::{de_opt_price, de_price};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Category {
    pub slug: String,
    pub title: String,
}

/// Sección del catálogo con sus categorías (sidebar)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Section {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ProductImage {
    pub image: String,
}

/// Ficha completa (`/api/products/` y `/api/products/{id}/`)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pr_type: Option<String>,
    #[serde(deserialize_with = "de_price")]
    pub price: f64,
    #[serde(default, deserialize_with = "de_opt_price")]
    pub discount_price: Option<f64>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_fav: bool,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub full_weight: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub effect: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub product_weight: Option<String>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl Product {
    /// Precio que paga el cliente
    pub fn effective_price(&self) -> f64 {
        effective(self.price, self.discount_price)
    }

    pub fn has_discount(&self) -> bool {
        matches!(self.discount_price, Some(d) if d < self.price)
    }

    pub fn main_image(&self) -> Option<&str> {
        self.images.first().map(|img| img.image.as_str())
    }
}

/// Versión corta embebida en carrito, favoritos y pedidos
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ShortProduct {
    pub id: u64,
    pub title: String,
    #[serde(deserialize_with = "de_price")]
    pub price: f64,
    #[serde(default, deserialize_with = "de_opt_price")]
    pub discount_price: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
}

impl ShortProduct {
    pub fn effective_price(&self) -> f64 {
        effective(self.price, self.discount_price)
    }
}

fn effective(price: f64, discount_price: Option<f64>) -> f64 {
    match discount_price {
        Some(d) if d > 0.0 => d,
        _ => price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_product() {
        let json = r#"{
            "id": 12, "title": "Крем для рук", "description": "", "pr_type": "крем",
            "price": "890.00", "discount_price": "690.00", "is_new": true, "is_fav": false,
            "ingredients": null, "country": "Корея", "size": null, "full_weight": null,
            "color": null, "effect": null, "collection": null, "product_weight": null,
            "categories": [{"slug": "hands", "title": "Руки"}],
            "images": [{"image": "http://127.0.0.1:8000/media/p/12.jpg"}]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.effective_price(), 690.0);
        assert!(product.has_discount());
        assert_eq!(product.main_image(), Some("http://127.0.0.1:8000/media/p/12.jpg"));
        assert_eq!(product.country.as_deref(), Some("Корея"));
    }

    #[test]
    fn short_product_without_discount() {
        let short: ShortProduct =
            serde_json::from_str(r#"{"id": 3, "title": "Тоник", "price": 450, "discount_price": null, "image": null}"#)
                .unwrap();
        assert_eq!(short.effective_price(), 450.0);
    }
}
