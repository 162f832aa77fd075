// ============================================================================
// CATALOG VIEWMODEL - Listado paginado con filtros, orden y sidebar
// ============================================================================
// Cada cambio de página/orden/filtros vuelve a pedir el listado. Las
// respuestas de una petición ya superada se descartan (contador de generación).
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::models::{Product, Section};
use crate::services::CatalogService;
use crate::state::{CatalogFilters, Ordering, QueryState, ReactiveState};
use crate::viewmodels::ui_message;

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogState {
    pub query: QueryState,
    pub products: Vec<Product>,
    pub count: u64,
    pub total_pages: u32,
    pub loading: bool,
    pub error: Option<String>,
    pub sections: Vec<Section>,
    pub countries: Vec<String>,
}

impl CatalogState {
    fn new(query: QueryState) -> Self {
        Self {
            query,
            products: Vec::new(),
            count: 0,
            total_pages: 1,
            loading: false,
            error: None,
            sections: Vec::new(),
            countries: Vec::new(),
        }
    }

    /// Respuesta vacía ya recibida (no confundir con "cargando")
    pub fn is_empty(&self) -> bool {
        !self.loading && self.error.is_none() && self.products.is_empty()
    }
}

#[derive(Clone)]
pub struct CatalogViewModel {
    catalog: CatalogService,
    page_size: u32,
    state: ReactiveState<CatalogState>,
    generation: Rc<Cell<u64>>,
}

impl CatalogViewModel {
    pub fn new(catalog: CatalogService, page_size: u32, preset: CatalogFilters) -> Self {
        Self {
            catalog,
            page_size,
            state: ReactiveState::new(CatalogState::new(QueryState::new(preset))),
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn state(&self) -> CatalogState {
        self.state.get()
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) {
        self.state.subscribe(callback);
    }

    pub async fn set_page(&self, page: u32) {
        if self.state.update(|s| s.query.set_page(page)) {
            self.reload().await;
        }
    }

    pub async fn set_ordering(&self, ordering: Ordering) {
        if self.state.update(|s| s.query.set_ordering(ordering)) {
            self.reload().await;
        }
    }

    pub async fn set_filters(&self, filters: CatalogFilters) {
        if self.state.update(|s| s.query.set_filters(filters)) {
            self.reload().await;
        }
    }

    pub async fn update_filters(&self, edit: impl FnOnce(&mut CatalogFilters)) {
        if self.state.update(|s| s.query.update_filters(edit)) {
            self.reload().await;
        }
    }

    pub async fn reset_filters(&self) {
        if self.state.update(|s| s.query.reset()) {
            self.reload().await;
        }
    }

    /// Pide el listado para el QueryState actual
    pub async fn reload(&self) {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        let query = self.state.update(|s| {
            s.loading = true;
            s.error = None;
            s.query.clone()
        });

        let result = self.catalog.products(&query).await;
        if self.generation.get() != generation {
            log::debug!("⏭️ [CATALOG] Respuesta obsoleta descartada ({})", query.to_query_string());
            return;
        }

        let page_size = self.page_size;
        match result {
            Ok(page) => {
                log::info!("✅ [CATALOG] {} productos (total {})", page.results.len(), page.count);
                self.state.update(|s| {
                    s.total_pages = page.total_pages(page_size);
                    s.count = page.count;
                    s.products = page.results;
                    s.loading = false;
                });
            }
            Err(e) if e.is_not_found() => {
                // página fuera de rango
                log::warn!("⚠️ [CATALOG] Página inexistente: {}", query.page());
                self.state.update(|s| {
                    s.products.clear();
                    s.count = 0;
                    s.total_pages = 1;
                    s.loading = false;
                });
            }
            Err(e) => {
                log::error!("❌ [CATALOG] Error cargando productos: {}", e);
                self.state.update(|s| {
                    s.loading = false;
                    s.error = Some(ui_message(&e));
                });
            }
        }
    }

    /// Secciones (árbol del sidebar) y países del filtro. Fallos no bloquean el listado.
    pub async fn load_sidebar(&self) {
        match self.catalog.sections().await {
            Ok(sections) => self.state.update(|s| s.sections = sections),
            Err(e) => log::warn!("⚠️ [CATALOG] Sin secciones: {}", e),
        }
        match self.catalog.countries().await {
            Ok(mut countries) => {
                countries.retain(|c| !c.trim().is_empty());
                countries.sort();
                countries.dedup();
                self.state.update(|s| s.countries = countries);
            }
            Err(e) => log::warn!("⚠️ [CATALOG] Sin países: {}", e),
        }
    }
}
