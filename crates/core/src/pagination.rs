//! Search pagination controls
//!
//! Pure functions deciding which "previous"/"next" controls a results page
//! shows. Rendering the controls and reacting to them is left to the shell.

use serde::{Deserialize, Serialize};

use crate::search::SearchState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Prev,
    Next,
}

/// A navigation control and the page it leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    pub direction: Direction,
    pub target_page: usize,
}

impl Control {
    pub fn prev(current_page: usize) -> Self {
        Self {
            direction: Direction::Prev,
            target_page: current_page.saturating_sub(1),
        }
    }

    pub fn next(current_page: usize) -> Self {
        Self {
            direction: Direction::Next,
            target_page: current_page + 1,
        }
    }
}

/// Number of pages needed to show `total_items`
pub fn total_pages(total_items: usize, per_page: usize) -> usize {
    total_items.div_ceil(per_page)
}

/// Controls to show on `page` out of `total_pages`
///
/// - first page of several: next only
/// - last page of several: previous only
/// - any page in between: previous and next
/// - anything else, including a single page: nothing
pub fn controls(page: usize, total_pages: usize) -> Vec<Control> {
    if page == 1 && total_pages > 1 {
        return vec![Control::next(page)];
    }

    if page == total_pages && total_pages > 1 {
        return vec![Control::prev(page)];
    }

    if page > 1 && page < total_pages {
        return vec![Control::prev(page), Control::next(page)];
    }

    Vec::new()
}

/// Controls for the current page of a search
pub fn search_controls(search: &SearchState) -> Vec<Control> {
    controls(
        search.page,
        total_pages(search.results.len(), search.results_per_page),
    )
}
