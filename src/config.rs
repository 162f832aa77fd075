use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Origen único del backend (sin `/api`)
    pub api_base_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub network_timeout_seconds: u32,
    pub session_config: SessionConfig,
    pub catalog_config: CatalogConfig,
    pub cart_config: CartConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            network_timeout_seconds: 30,
            session_config: SessionConfig::default(),
            catalog_config: CatalogConfig::default(),
            cart_config: CartConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Intervalo del refresh silencioso (el access token vive 15 min)
    pub refresh_interval_minutes: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_interval_minutes: 14,
        }
    }
}

impl SessionConfig {
    pub fn refresh_interval_ms(&self) -> u32 {
        self.refresh_interval_minutes.saturating_mul(60 * 1000)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub page_size: u32,
    pub search_debounce_ms: u32,
    pub suggestion_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: 12,
            search_debounce_ms: 1000,
            suggestion_limit: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    pub max_quantity: u32,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self { max_quantity: 100 }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: option_env!("API_BASE_URL")
                .unwrap_or(DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            network_timeout_seconds: option_env!("NETWORK_TIMEOUT_SECONDS")
                .unwrap_or("30").parse().unwrap_or(defaults.network_timeout_seconds),
            session_config: SessionConfig {
                refresh_interval_minutes: option_env!("TOKEN_REFRESH_MINUTES")
                    .unwrap_or("14").parse().unwrap_or(14),
            },
            catalog_config: CatalogConfig {
                page_size: option_env!("CATALOG_PAGE_SIZE")
                    .unwrap_or("12").parse().unwrap_or(12),
                search_debounce_ms: option_env!("SEARCH_DEBOUNCE_MS")
                    .unwrap_or("1000").parse().unwrap_or(1000),
                suggestion_limit: option_env!("SEARCH_SUGGESTION_LIMIT")
                    .unwrap_or("5").parse().unwrap_or(5),
            },
            cart_config: CartConfig {
                max_quantity: option_env!("CART_MAX_QUANTITY")
                    .unwrap_or("100").parse().unwrap_or(100),
            },
        }
    }

    /// URL absoluta para una ruta del API (`"cart/"` -> `{base}/api/cart/`)
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/api/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática (solo la usa el punto de entrada wasm)
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_joins_single_slashes() {
        let mut config = AppConfig::default();
        config.api_base_url = "https://shop.example/".to_string();
        assert_eq!(config.api_url("/users/me/"), "https://shop.example/api/users/me/");
        assert_eq!(config.api_url("cart/3/"), "https://shop.example/api/cart/3/");
    }

    #[test]
    fn refresh_interval_is_fourteen_minutes() {
        assert_eq!(SessionConfig::default().refresh_interval_ms(), 14 * 60 * 1000);
    }

    #[test]
    fn huge_refresh_interval_saturates() {
        let config = SessionConfig {
            refresh_interval_minutes: 100_000,
        };
        assert_eq!(config.refresh_interval_ms(), u32::MAX);
    }
}
