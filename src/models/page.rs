use serde::{Deserialize, Serialize};

/// Respuesta paginada de DRF (`count`, `next`, `previous`, `results`)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }

    /// Número de páginas, nunca menos de 1
    pub fn total_pages(&self, page_size: u32) -> u32 {
        total_pages(self.count, page_size)
    }
}

pub fn total_pages(count: u64, page_size: u32) -> u32 {
    let size = u64::from(page_size.max(1));
    let pages = (count + size - 1) / size;
    pages.max(1).min(u64::from(u32::MAX)) as u32
}

/// Algunos endpoints devuelven lista, otros página y `orders/` a veces un objeto
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ListOrPage<T> {
    Page(Page<T>),
    List(Vec<T>),
    Single(T),
}

impl<T> ListOrPage<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            ListOrPage::Page(page) => page.results,
            ListOrPage::List(list) => list,
            ListOrPage::Single(item) => vec![item],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_is_at_least_one() {
        assert_eq!(total_pages(0, 12), 1);
        assert_eq!(total_pages(12, 12), 1);
        assert_eq!(total_pages(13, 12), 2);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn list_or_page_accepts_all_shapes() {
        let page: ListOrPage<u32> = serde_json::from_str(r#"{"count": 2, "results": [1, 2]}"#).unwrap();
        assert_eq!(page.into_vec(), vec![1, 2]);
        let list: ListOrPage<u32> = serde_json::from_str("[3]").unwrap();
        assert_eq!(list.into_vec(), vec![3]);
    }
}
