use std::path::PathBuf;

use crate::prelude::{println, *};
use clap::Parser;

mod api;
mod bookmarks;
mod config;
mod error;
mod pagination;
mod prelude;
mod search;
mod shop;
mod show;
mod store;
mod upload;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Search, bookmark and plan recipes from the terminal"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Recipe API base URL (defaults to RECIPES_API_URL or the public forkify API)
    #[clap(long, global = true)]
    api_url: Option<String>,

    /// Recipe API key (defaults to RECIPES_API_KEY)
    #[clap(long, global = true)]
    api_key: Option<String>,

    /// Search results per page (defaults to RECIPES_PER_PAGE or 10)
    #[clap(long, global = true)]
    per_page: Option<usize>,

    /// Directory holding bookmarks and the shopping list (defaults to RECIPES_DATA_DIR)
    #[clap(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Whether to display additional information.
    #[clap(long, env = "RECIPES_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

impl Global {
    /// Environment configuration with the command line flags applied on top
    pub fn config(&self) -> Result<config::ApiConfig> {
        let config = config::ApiConfig::from_env()?.with_overrides(
            self.api_url.clone(),
            self.api_key.clone(),
            self.per_page,
            self.data_dir.clone(),
        )?;

        if self.verbose {
            println!("Recipe API: {}", config.base_url);
            println!("Data directory: {}", config.data_dir.display());
            println!();
        }

        Ok(config)
    }
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Search recipes and browse the result pages
    Search(crate::search::SearchOptions),

    /// Show a recipe, optionally rescaled to a number of servings
    Show(crate::show::ShowOptions),

    /// Bookmarked recipes
    Bookmarks(crate::bookmarks::App),

    /// Shopping list
    Shop(crate::shop::App),

    /// Create a recipe of your own (requires an API key)
    Upload(crate::upload::UploadOptions),

    /// Delete the stored bookmarks and shopping list
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Search(options) => crate::search::run(options, app.global).await,
        SubCommands::Show(options) => crate::show::run(options, app.global).await,
        SubCommands::Bookmarks(sub_app) => crate::bookmarks::run(sub_app, app.global).await,
        SubCommands::Shop(sub_app) => crate::shop::run(sub_app, app.global).await,
        SubCommands::Upload(options) => crate::upload::run(options, app.global).await,
        SubCommands::Clear => clear(app.global),
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}

fn clear(global: Global) -> Result<()> {
    let config = global.config()?;

    match crate::store::open(&config) {
        Ok(mut store) => store.clear_data()?,
        Err(err) => {
            log::warn!("stored data could not be read, removing it anyway: {err}");
            crate::store::clear(&config)?;
        }
    }

    println!(
        "Cleared bookmarks and shopping list in {}",
        config.data_dir.display()
    );
    Ok(())
}
