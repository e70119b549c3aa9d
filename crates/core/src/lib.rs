//! Core library for recipes
//!
//! This crate implements the **Functional Core** of the recipes application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The recipes project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`recipes_core`** (this crate): Data model, state transitions and pure derivations
//! - **`recipes`**: HTTP access, persistence wiring and the CLI (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! Functions in this crate never talk to the network. The only side effects
//! allowed are the ones routed through the [`storage::KeyValueStore`] trait, which
//! the shell decides how to back.
//!
//! # Module Organization
//!
//! - [`recipe`]: Recipe model, API wire shapes and servings rescaling
//! - [`search`]: Search state and the results-page window
//! - [`state`]: The application state object (current recipe, search, bookmarks, shopping list)
//! - [`storage`]: Key-value persistence for bookmarks and the shopping list
//! - [`upload`]: New recipe form parsing and upload payload construction
//! - [`pagination`]: Which previous/next controls a search page shows
//!
//! # Example Usage
//!
//! ```rust
//! use recipes_core::pagination::{controls, Control, Direction};
//!
//! let shown = controls(1, 5);
//! assert_eq!(shown, vec![Control { direction: Direction::Next, target_page: 2 }]);
//! ```

pub mod error;
pub mod pagination;
pub mod recipe;
pub mod search;
pub mod state;
pub mod storage;
pub mod upload;

pub use error::{Error, Result};
