use serde::Serialize;

use crate::recipe::RecipeSummary;

/// Results shown per page unless configured otherwise
pub const DEFAULT_RESULTS_PER_PAGE: usize = 10;

/// Current search query, its results and the selected page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<RecipeSummary>,
    /// 1-indexed
    pub page: usize,
    pub results_per_page: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(DEFAULT_RESULTS_PER_PAGE)
    }
}

impl SearchState {
    pub fn new(results_per_page: usize) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            page: 1,
            results_per_page,
        }
    }

    /// Replace the results and go back to the first page
    pub fn set_results(&mut self, results: Vec<RecipeSummary>) {
        self.results = results;
        self.page = 1;
    }

    /// Number of pages needed for the current results
    pub fn total_pages(&self) -> usize {
        self.results.len().div_ceil(self.results_per_page)
    }

    /// Select `page` (or keep the current one) and return its window of results
    ///
    /// The page is not checked against the result count; a page past the end
    /// yields an empty slice.
    pub fn results_page(&mut self, page: Option<usize>) -> &[RecipeSummary] {
        if let Some(page) = page {
            self.page = page;
        }

        let (start, end) = page_bounds(self.results.len(), self.page, self.results_per_page);
        &self.results[start..end]
    }
}

/// Calculate the `[start, end)` window of `page`, clipped to `total_items`
///
/// Page 0 has no window.
pub fn page_bounds(total_items: usize, page: usize, per_page: usize) -> (usize, usize) {
    if page == 0 {
        return (0, 0);
    }

    let start = (page - 1).saturating_mul(per_page).min(total_items);
    let end = page.saturating_mul(per_page).min(total_items);
    (start, end)
}
