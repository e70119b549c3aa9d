//! Pagination controls binding
//!
//! Turns the control descriptors from [`recipes_core::pagination`] into
//! clickable elements, and routes clicks on them to a single registered
//! page-change handler.

use std::collections::BTreeMap;

use colored::Colorize;
use recipes_core::pagination::{search_controls, Control, Direction};
use recipes_core::search::SearchState;

use crate::prelude::*;

/// Class carried by every pagination control
pub const CONTROL_CLASS: &str = "btn--inline";

/// Data attribute holding the page a control leads to
pub const GOTO_ATTRIBUTE: &str = "goto";

/// Minimal element model: classes plus `data-*` attributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub classes: Vec<String>,
    pub dataset: BTreeMap<String, String>,
}

impl Element {
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_data(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.dataset.insert(name.into(), value.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

impl From<&Control> for Element {
    fn from(control: &Control) -> Self {
        let modifier = match control.direction {
            Direction::Prev => "pagination__btn--prev",
            Direction::Next => "pagination__btn--next",
        };

        Element::default()
            .with_class(CONTROL_CLASS)
            .with_class(modifier)
            .with_data(GOTO_ATTRIBUTE, control.target_page.to_string())
    }
}

/// A click: the element hit, followed by its ancestors, innermost first
#[derive(Debug, Clone, Default)]
pub struct ClickEvent {
    path: Vec<Element>,
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new(target: Element, ancestors: Vec<Element>) -> Self {
        let mut path = vec![target];
        path.extend(ancestors);

        Self {
            path,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Nearest element on the path carrying `class`, starting at the target
    pub fn closest(&self, class: &str) -> Option<&Element> {
        self.path.iter().find(|element| element.has_class(class))
    }
}

type PageHandler = Box<dyn FnMut(usize)>;

/// Pagination controls of the search results
#[derive(Default)]
pub struct PaginationView {
    controls: Vec<Control>,
    handler: Option<PageHandler>,
}

impl PaginationView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the controls for the current page of `search`
    pub fn render(&mut self, search: &SearchState) -> &[Control] {
        self.controls = search_controls(search);
        &self.controls
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Register the page-change handler, replacing any previous one
    pub fn add_handler_click(&mut self, handler: impl FnMut(usize) + 'static) {
        self.handler = Some(Box::new(handler));
    }

    /// Dispatch a click
    ///
    /// The default action is always suppressed. Clicks outside a control, or
    /// on a control without a valid page, are ignored. Returns the page passed
    /// to the handler.
    pub fn click(&mut self, event: &mut ClickEvent) -> Option<usize> {
        event.prevent_default();

        let page = event
            .closest(CONTROL_CLASS)?
            .dataset
            .get(GOTO_ATTRIBUTE)?
            .parse::<usize>()
            .ok()?;

        if let Some(handler) = self.handler.as_mut() {
            handler(page);
        }

        Some(page)
    }
}

/// Navigation hints for a search page, one line per control
pub fn format_navigation(query: &str, controls: &[Control]) -> String {
    let mut result = String::new();

    for control in controls {
        let label = match control.direction {
            Direction::Prev => "Previous page",
            Direction::Next => "Next page",
        };
        result.push_str(&f!(
            "  {}: {}\n",
            label.green(),
            f!(
                "recipes search \"{}\" --page {}",
                query,
                control.target_page
            )
            .cyan()
        ));
    }

    result
}
