// ============================================================================
// APP - Contexto de la tienda (se construye una vez por proceso)
// ============================================================================
// Reúne transport, scheduler, almacenamiento y config; crea los servicios y
// entrega viewmodels que comparten la misma sesión.
// ============================================================================

use std::rc::Rc;

use crate::config::AppConfig;
use crate::services::{
    ApiClient, AuthService, CartService, CatalogService, FavoritesService, HttpTransport,
    OrderService, Scheduler, SessionManager,
};
use crate::state::CatalogFilters;
use crate::utils::storage::KeyValueStore;
use crate::viewmodels::{
    CartViewModel, CatalogViewModel, FavoritesViewModel, OrdersViewModel, ProductViewModel,
    ProfileViewModel, SearchSuggestions,
};

pub struct Storefront {
    config: AppConfig,
    api: ApiClient,
    scheduler: Rc<dyn Scheduler>,
    session: SessionManager,
}

impl Storefront {
    pub fn new(
        config: AppConfig,
        transport: Rc<dyn HttpTransport>,
        scheduler: Rc<dyn Scheduler>,
        store: Rc<dyn KeyValueStore>,
    ) -> Self {
        let api = ApiClient::new(&config.api_base_url, transport);
        let session = SessionManager::new(
            AuthService::new(api.clone()),
            scheduler.clone(),
            store,
            config.session_config.clone(),
        );
        log::info!("🏪 [APP] Storefront sobre {} ({})", config.api_base_url, config.environment);
        Self {
            config,
            api,
            scheduler,
            session,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Listado del catálogo; `CatalogFilters::new_arrivals()` para novedades
    pub fn catalog(&self, preset: CatalogFilters) -> CatalogViewModel {
        CatalogViewModel::new(
            CatalogService::new(self.api.clone()),
            self.config.catalog_config.page_size,
            preset,
        )
    }

    pub fn search(&self) -> SearchSuggestions {
        let catalog = &self.config.catalog_config;
        SearchSuggestions::new(
            CatalogService::new(self.api.clone()),
            self.scheduler.clone(),
            catalog.search_debounce_ms,
            catalog.suggestion_limit,
        )
    }

    pub fn product(&self) -> ProductViewModel {
        ProductViewModel::new(
            CatalogService::new(self.api.clone()),
            CartService::new(self.api.clone()),
            FavoritesService::new(self.api.clone()),
            self.session.clone(),
        )
    }

    pub fn cart(&self) -> CartViewModel {
        CartViewModel::new(
            CartService::new(self.api.clone()),
            OrderService::new(self.api.clone()),
            self.session.clone(),
            self.config.cart_config.max_quantity,
        )
    }

    pub fn favorites(&self) -> FavoritesViewModel {
        FavoritesViewModel::new(
            FavoritesService::new(self.api.clone()),
            CartService::new(self.api.clone()),
            self.session.clone(),
        )
    }

    pub fn orders(&self) -> OrdersViewModel {
        OrdersViewModel::new(OrderService::new(self.api.clone()), self.session.clone())
    }

    pub fn profile(&self) -> ProfileViewModel {
        ProfileViewModel::new(self.session.clone(), AuthService::new(self.api.clone()))
    }
}
