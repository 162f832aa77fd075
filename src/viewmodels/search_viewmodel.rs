// ============================================================================
// SEARCH SUGGESTIONS - Búsqueda mientras se escribe (debounce de 1 s)
// ============================================================================
// Idle -> Pending (espera + petición) -> Results | NoResults | Failed
// Cada pulsación cancela la consulta pendiente; solo la última puede
// escribir el estado.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::{abortable, AbortHandle, FutureExt};

use crate::models::Product;
use crate::services::{CatalogService, Scheduler};
use crate::state::ReactiveState;
use crate::viewmodels::ui_message;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SuggestionState {
    #[default]
    Idle,
    Pending,
    Results(Vec<Product>),
    NoResults,
    Failed(String),
}

struct Inner {
    catalog: CatalogService,
    scheduler: Rc<dyn Scheduler>,
    debounce_ms: u32,
    limit: usize,
    text: RefCell<String>,
    state: ReactiveState<SuggestionState>,
    generation: Cell<u64>,
    pending: RefCell<Option<AbortHandle>>,
}

#[derive(Clone)]
pub struct SearchSuggestions {
    inner: Rc<Inner>,
}

impl SearchSuggestions {
    pub fn new(catalog: CatalogService, scheduler: Rc<dyn Scheduler>, debounce_ms: u32, limit: usize) -> Self {
        Self {
            inner: Rc::new(Inner {
                catalog,
                scheduler,
                debounce_ms,
                limit,
                text: RefCell::new(String::new()),
                state: ReactiveState::default(),
                generation: Cell::new(0),
                pending: RefCell::new(None),
            }),
        }
    }

    pub fn state(&self) -> SuggestionState {
        self.inner.state.get()
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) {
        self.inner.state.subscribe(callback);
    }

    /// Texto actual del campo (para navegar a la búsqueda completa)
    pub fn text(&self) -> String {
        self.inner.text.borrow().clone()
    }

    /// Nueva pulsación: reinicia la espera
    pub fn input(&self, text: &str) {
        let generation = self.supersede();
        *self.inner.text.borrow_mut() = text.to_string();

        let query = text.trim().to_string();
        if query.is_empty() {
            self.inner.state.set(SuggestionState::Idle);
            return;
        }
        self.inner.state.set(SuggestionState::Pending);

        let (task, handle) = abortable(run_query(self.inner.clone(), generation, query));
        *self.inner.pending.borrow_mut() = Some(handle);
        self.inner.scheduler.spawn(task.map(|_| ()).boxed_local());
    }

    /// Campo vaciado o cerrado
    pub fn clear(&self) {
        self.supersede();
        self.inner.text.borrow_mut().clear();
        self.inner.state.set(SuggestionState::Idle);
    }

    /// Invalida la consulta anterior y devuelve la nueva generación
    fn supersede(&self) -> u64 {
        if let Some(handle) = self.inner.pending.borrow_mut().take() {
            handle.abort();
        }
        let generation = self.inner.generation.get() + 1;
        self.inner.generation.set(generation);
        generation
    }
}

async fn run_query(inner: Rc<Inner>, generation: u64, query: String) {
    inner.scheduler.sleep(inner.debounce_ms).await;
    if inner.generation.get() != generation {
        return;
    }

    log::debug!("🔍 [SEARCH] Sugerencias para '{}'", query);
    let result = inner.catalog.suggestions(&query, inner.limit).await;
    if inner.generation.get() != generation {
        log::debug!("⏭️ [SEARCH] Respuesta obsoleta para '{}'", query);
        return;
    }
    inner.pending.borrow_mut().take();

    let next = match result {
        Ok(products) if products.is_empty() => SuggestionState::NoResults,
        Ok(products) => SuggestionState::Results(products),
        Err(e) => {
            log::warn!("❌ [SEARCH] Error en sugerencias: {}", e);
            SuggestionState::Failed(ui_message(&e))
        }
    };
    inner.state.set(next);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{ApiClient, Method};
    use crate::testing::{Harness, BASE_URL};

    const EMPTY_PAGE: &str = r#"{"count": 0, "next": null, "previous": null, "results": []}"#;

    fn suggestions(h: &Harness) -> SearchSuggestions {
        let api = ApiClient::new(BASE_URL, h.transport.clone());
        SearchSuggestions::new(CatalogService::new(api), h.scheduler.clone(), 1000, 5)
    }

    fn page_of(count: usize) -> String {
        let results: Vec<String> = (1..=count)
            .map(|id| format!(r#"{{"id": {}, "title": "Крем {}", "price": "100.00"}}"#, id, id))
            .collect();
        format!(r#"{{"count": {}, "results": [{}]}}"#, count, results.join(","))
    }

    #[test]
    fn fast_typing_sends_only_the_last_query() {
        let mut h = Harness::new();
        h.transport.respond(Method::Get, "products/", 200, &page_of(2));
        let search = suggestions(&h);

        search.input("a");
        h.advance(300);
        search.input("ab");
        h.advance(300);
        search.input("abc");
        h.advance(999);
        assert_eq!(h.transport.request_count(Method::Get, "products/"), 0);
        assert_eq!(search.state(), SuggestionState::Pending);

        h.advance(1);
        let urls = h.transport.urls(Method::Get, "products/");
        assert_eq!(urls.len(), 1);
        assert!(urls[0].ends_with("/api/products/?search=abc"));
        assert!(matches!(search.state(), SuggestionState::Results(ref list) if list.len() == 2));
        assert_eq!(h.scheduler.live_timers(), 0);
    }

    #[test]
    fn pause_between_keystrokes_sends_two_queries() {
        let mut h = Harness::new();
        h.transport.respond(Method::Get, "products/", 200, &page_of(1));
        let search = suggestions(&h);

        search.input("a");
        h.advance(1000);
        search.input("ab");
        h.advance(1000);
        assert_eq!(h.transport.request_count(Method::Get, "products/"), 2);
    }

    #[test]
    fn no_results_only_after_the_answer() {
        let mut h = Harness::new();
        h.transport.respond_after(Method::Get, "products/", 400, 200, EMPTY_PAGE);
        let search = suggestions(&h);

        search.input("шампунь");
        h.advance(1000);
        assert_eq!(search.state(), SuggestionState::Pending);
        h.advance(400);
        assert_eq!(search.state(), SuggestionState::NoResults);
    }

    #[test]
    fn late_answer_for_old_text_is_ignored() {
        let mut h = Harness::new();
        h.transport.respond_after(Method::Get, "products/", 500, 200, &page_of(3));
        h.transport.respond(Method::Get, "products/", 200, EMPTY_PAGE);
        let search = suggestions(&h);

        search.input("мыло");
        h.advance(1000);
        search.input("мыло д");
        h.advance(500);
        assert_eq!(search.state(), SuggestionState::Pending);
        h.advance(500);
        assert_eq!(search.state(), SuggestionState::NoResults);
        assert_eq!(h.transport.request_count(Method::Get, "products/"), 2);
    }

    #[test]
    fn blank_input_goes_idle_without_request() {
        let mut h = Harness::new();
        let search = suggestions(&h);

        search.input("крем");
        search.input("   ");
        h.advance(2000);
        assert_eq!(search.state(), SuggestionState::Idle);
        assert_eq!(h.transport.request_count(Method::Get, "products/"), 0);
    }

    #[test]
    fn suggestions_are_capped_and_failures_reported() {
        let mut h = Harness::new();
        h.transport.respond(Method::Get, "products/", 200, &page_of(8));
        h.transport.fail(Method::Get, "products/");
        let search = suggestions(&h);

        search.input("маска");
        h.advance(1000);
        assert!(matches!(search.state(), SuggestionState::Results(ref list) if list.len() == 5));

        search.input("маска для");
        h.advance(1000);
        assert!(matches!(search.state(), SuggestionState::Failed(_)));
    }
}
