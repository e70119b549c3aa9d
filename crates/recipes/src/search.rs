use std::cell::Cell;
use std::io::BufRead;
use std::rc::Rc;

use crate::api::RecipeApi;
use crate::pagination::{format_navigation, ClickEvent, Element, PaginationView};
use crate::prelude::{print, println, *};
use crate::store::Store;
use colored::Colorize;
use recipes_core::pagination::{Control, Direction};
use recipes_core::recipe::RecipeSummary;
use recipes_core::search::SearchState;
use recipes_core::storage::KeyValueStore;
use serde::Serialize;

#[derive(Debug, clap::Args, Clone)]
pub struct SearchOptions {
    /// Search terms (e.g. "pizza")
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Browse the result pages with n/p
    #[arg(short, long, conflicts_with = "json")]
    pub interactive: bool,
}

/// Search page output
#[derive(Debug, Serialize, Clone)]
pub struct SearchOutput {
    pub query: String,
    pub page: usize,
    pub total_pages: usize,
    pub total_results: usize,
    pub results: Vec<RecipeSummary>,
    pub controls: Vec<Control>,
}

pub async fn run(options: SearchOptions, global: crate::Global) -> Result<()> {
    let config = global.config()?;
    let mut store = crate::store::open(&config)?;

    if global.verbose {
        println!("Searching for '{}'...", options.query);
    }

    store.load_search_results(&options.query).await?;

    let mut view = PaginationView::new();

    if options.interactive {
        return browse(&mut store, &mut view, options.page);
    }

    let results = store.get_search_results_page(Some(options.page)).to_vec();
    let controls = view.render(&store.state().search).to_vec();
    let output = build_search_output(&store.state().search, results, controls);

    if options.json {
        println!("{}", format_search_json(&output)?);
    } else {
        print!("{}", format_search_text(&output));
    }

    Ok(())
}

/// Page through the results, turning n/p into clicks on the rendered controls
fn browse<A: RecipeApi, S: KeyValueStore>(
    store: &mut Store<A, S>,
    view: &mut PaginationView,
    start_page: usize,
) -> Result<()> {
    let requested = Rc::new(Cell::new(Some(start_page)));
    let sink = Rc::clone(&requested);
    view.add_handler_click(move |page| sink.set(Some(page)));

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(page) = requested.take() {
        let results = store.get_search_results_page(Some(page)).to_vec();
        let controls = view.render(&store.state().search).to_vec();
        let output = build_search_output(&store.state().search, results, controls);

        print!("{}", format_search_text(&output));
        println!("{}", "[p]revious  [n]ext  [q]uit".bright_black());

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        if line.trim() == "q" {
            break;
        }

        let dispatched = key_to_click(view, line.trim()).and_then(|mut event| {
            let page = view.click(&mut event);
            log::trace!(
                "click dispatched to {page:?}, default prevented: {}",
                event.default_prevented()
            );
            page
        });

        if dispatched.is_none() {
            requested.set(Some(page));
        }
    }

    Ok(())
}

/// Click on the control matching `key`, if that control is shown
fn key_to_click(view: &PaginationView, key: &str) -> Option<ClickEvent> {
    let direction = match key {
        "n" => Direction::Next,
        "p" => Direction::Prev,
        _ => return None,
    };

    view.controls()
        .iter()
        .find(|control| control.direction == direction)
        .map(|control| {
            ClickEvent::new(
                Element::from(control),
                vec![Element::default().with_class("pagination")],
            )
        })
}

pub fn build_search_output(
    search: &SearchState,
    results: Vec<RecipeSummary>,
    controls: Vec<Control>,
) -> SearchOutput {
    SearchOutput {
        query: search.query.clone(),
        page: search.page,
        total_pages: search.total_pages(),
        total_results: search.results.len(),
        results,
        controls,
    }
}

fn format_search_json(output: &SearchOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_search_text(output: &SearchOutput) -> String {
    let mut result = String::new();

    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!(
        "{}\n",
        f!(
            "RECIPES FOR \"{}\" (Page {} of {})",
            output.query.to_uppercase(),
            output.page,
            output.total_pages
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_cyan()));

    if output.results.is_empty() {
        result.push_str(&f!("\n{}\n", "No recipes on this page.".yellow()));
    } else {
        for recipe in &output.results {
            let mine = if recipe.key.is_some() { " (yours)" } else { "" };
            result.push_str(&f!(
                "\n{}{}\n",
                recipe.title.white().bold(),
                mine.bright_magenta()
            ));
            result.push_str(&f!(
                "    {}: {} | {}: {}\n",
                "Publisher".green(),
                recipe.publisher.bright_white(),
                "Show".green(),
                f!("recipes show {}", recipe.id).cyan()
            ));
        }
    }

    if !output.controls.is_empty() {
        result.push_str(&f!("\n{}:\n", "To navigate".bright_white().bold()));
        result.push_str(&format_navigation(&output.query, &output.controls));
    }

    result.push('\n');
    result
}
