// ============================================================================
// QUERY STATE - Página + orden + filtros de un listado de productos
// ============================================================================
// Cada vista de listado tiene su propio QueryState (no se comparte).
// Cambiar filtros u orden vuelve a la página 1; cambiar solo la página no
// toca los filtros.
// ============================================================================

use std::collections::{BTreeMap, BTreeSet};

/// Orden del listado (campo `ordering` del backend)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ordering {
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
}

impl Ordering {
    pub fn token(&self) -> Option<&'static str> {
        match self {
            Ordering::Default => None,
            Ordering::PriceAsc => Some("discount_price"),
            Ordering::PriceDesc => Some("-discount_price"),
        }
    }

    pub fn from_token(token: &str) -> Self {
        match token {
            "discount_price" => Ordering::PriceAsc,
            "-discount_price" => Ordering::PriceDesc,
            _ => Ordering::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogFilters {
    pub country: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub categories: BTreeSet<String>,
    pub is_new: bool,
    pub has_discount: bool,
    pub search: Option<String>,
}

impl CatalogFilters {
    /// Preset del listado de novedades
    pub fn new_arrivals() -> Self {
        Self {
            is_new: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn insert_into(&self, params: &mut BTreeMap<&'static str, String>) {
        if let Some(country) = non_blank(self.country.as_deref()) {
            params.insert("country", country);
        }
        if let Some(min) = self.price_min {
            params.insert("price_min", format_number(min));
        }
        if let Some(max) = self.price_max {
            params.insert("price_max", format_number(max));
        }
        if !self.categories.is_empty() {
            // BTreeSet ya viene ordenado
            let joined = self.categories.iter().cloned().collect::<Vec<_>>().join(",");
            params.insert("categories", joined);
        }
        if self.is_new {
            params.insert("is_new", "true".to_string());
        }
        if self.has_discount {
            params.insert("has_discount", "true".to_string());
        }
        if let Some(search) = non_blank(self.search.as_deref()) {
            params.insert("search", search);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    page: u32,
    ordering: Ordering,
    filters: CatalogFilters,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: 1,
            ordering: Ordering::Default,
            filters: CatalogFilters::default(),
        }
    }
}

impl QueryState {
    pub fn new(filters: CatalogFilters) -> Self {
        Self {
            filters,
            ..Self::default()
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn ordering(&self) -> Ordering {
        self.ordering
    }

    pub fn filters(&self) -> &CatalogFilters {
        &self.filters
    }

    /// Devuelve `true` si algo cambió (hay que recargar)
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    pub fn set_ordering(&mut self, ordering: Ordering) -> bool {
        if ordering == self.ordering {
            return false;
        }
        self.ordering = ordering;
        self.page = 1;
        true
    }

    pub fn set_filters(&mut self, filters: CatalogFilters) -> bool {
        if filters == self.filters {
            return false;
        }
        self.filters = filters;
        self.page = 1;
        true
    }

    /// Modifica los filtros en sitio (mismas reglas que `set_filters`)
    pub fn update_filters(&mut self, edit: impl FnOnce(&mut CatalogFilters)) -> bool {
        let mut filters = self.filters.clone();
        edit(&mut filters);
        self.set_filters(filters)
    }

    pub fn reset(&mut self) -> bool {
        let changed = *self != Self::new(CatalogFilters::default());
        *self = Self::default();
        changed
    }

    /// Query string estable: claves ordenadas, valores codificados, vacíos omitidos
    pub fn to_query_string(&self) -> String {
        let mut params: BTreeMap<&'static str, String> = BTreeMap::new();
        self.filters.insert_into(&mut params);
        if let Some(token) = self.ordering.token() {
            params.insert("ordering", token.to_string());
        }
        if self.page > 1 {
            params.insert("page", self.page.to_string());
        }
        params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// 1500.0 -> "1500", 99.5 -> "99.5"
fn format_number(value: f64) -> String {
    format!("{}", value)
}
