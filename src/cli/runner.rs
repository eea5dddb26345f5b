//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{load_config, PagerConfig};
use crate::controller::PaginationController;
use crate::error::{Error, Result};
use crate::pagination::PaginationState;
use crate::types::{Direction, Item, ViewMode};
use serde_json::{json, Value};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Feed { pages } => self.feed(*pages).await,
            Commands::Browse { next, previous } => self.browse(*next, *previous).await,
            Commands::Validate => self.validate(),
        }
    }

    /// Load pager configuration
    fn load_config(&self) -> Result<PagerConfig> {
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::config("Config file not specified (use -c flag)"))?;
        load_config(path)
    }

    /// Scroll forward until exhausted or `max_pages` pages are loaded
    async fn feed(&self, max_pages: Option<usize>) -> Result<()> {
        let config = self.load_config()?;
        let controller = PaginationController::from_config(&config)?;

        let mut state = controller.initialize().await?;
        self.output_message(&page_message(&state, &state.items));
        let mut loaded = 1;

        while state.has_next() && max_pages.map_or(true, |max| loaded < max) {
            let seen = state.items.len();
            let next = controller.advance(Direction::Forward).await?;
            if next.active_page_index == state.active_page_index {
                break;
            }

            let fresh = match next.mode {
                ViewMode::Scroll => &next.items[seen.min(next.items.len())..],
                ViewMode::Jump => &next.items[..],
            };
            self.output_message(&page_message(&next, fresh));
            state = next;
            loaded += 1;
        }

        info!("Feed finished after {} pages", loaded);
        self.output_log(&format!(
            "Loaded {} pages, {} items visible{}",
            loaded,
            state.items.len(),
            if state.exhausted { ", feed exhausted" } else { "" }
        ));
        Ok(())
    }

    /// Step `next` pages forward, then `previous` pages back
    async fn browse(&self, next: usize, previous: usize) -> Result<()> {
        let config = self.load_config()?;
        let controller = PaginationController::from_config(&config)?;

        let mut state = controller.initialize().await?;
        self.output_message(&page_message(&state, &state.items));

        let steps = std::iter::repeat(Direction::Forward)
            .take(next)
            .chain(std::iter::repeat(Direction::Backward).take(previous));

        for direction in steps {
            let moved = controller.advance(direction).await?;
            if moved.active_page_index == state.active_page_index {
                self.output_log(&format!(
                    "No {} page from page {}",
                    direction,
                    state.page_number()
                ));
                continue;
            }
            self.output_message(&page_message(&moved, &moved.items));
            state = moved;
        }

        Ok(())
    }

    /// Validate pager configuration
    fn validate(&self) -> Result<()> {
        let config = self.load_config()?;

        self.output_log(&format!(
            "Config for '{}' is valid ({} strategy, {} mode)",
            config.endpoint,
            config.strategy.name(),
            config.effective_mode()
        ));

        Ok(())
    }

    fn output_log(&self, message: &str) {
        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": message
            }
        }));
    }

    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Summary of one committed page
fn page_message(state: &PaginationState, items: &[Item]) -> Value {
    json!({
        "type": "PAGE",
        "page": {
            "number": state.page_number(),
            "total_pages": state.total_pages,
            "count": state.count,
            "visible": state.items.len(),
            "exhausted": state.exhausted,
            "page_numbers": state.page_numbers,
            "items": items.iter().map(|item| &item.data).collect::<Vec<_>>(),
        }
    })
}
