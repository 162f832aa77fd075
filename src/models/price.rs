// DRF serializa `DecimalField` como string ("1290.00"); los precios enteros
// llegan como número. Se aceptan ambos.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

fn parse(raw: RawPrice) -> Option<f64> {
    match raw {
        RawPrice::Number(n) => Some(n),
        RawPrice::Text(s) => s.trim().replace(',', ".").parse().ok(),
    }
}

pub fn de_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawPrice>::deserialize(deserializer)?;
    Ok(raw.and_then(parse).unwrap_or(0.0))
}

pub fn de_opt_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawPrice>::deserialize(deserializer)?;
    Ok(raw.and_then(parse))
}
