//! Implements InputPort. Inquire-based interactive menu.
//!
//! Mirrors the actions of the original grid panel: fetch & annotate, annotate
//! from cache, edit/reset colors, clear cached data.

use crate::domain::{ColorConfig, DomainError, WeekCategory};
use crate::ports::{ColorStore, InputPort};
use crate::usecases::{AnnotateOutcome, AnnotateService};
use async_trait::async_trait;
use inquire::error::InquireError;
use inquire::{Select, Text};
use std::sync::Arc;
use tracing::warn;

const MENU_FETCH: &str = "Fetch & annotate";
const MENU_CACHED: &str = "Annotate from cache";
const MENU_EDIT: &str = "Edit colors";
const MENU_RESET: &str = "Reset colors";
const MENU_CLEAR: &str = "Clear cached data";
const MENU_QUIT: &str = "Quit";

/// TUI adapter. Inquire prompts around the annotate service.
pub struct TuiInputPort {
    service: Arc<AnnotateService>,
    color_store: Arc<dyn ColorStore>,
}

impl TuiInputPort {
    pub fn new(service: Arc<AnnotateService>, color_store: Arc<dyn ColorStore>) -> Self {
        Self {
            service,
            color_store,
        }
    }

    fn report(outcome: &AnnotateOutcome) {
        println!(
            "{} course(s), {} cell(s) annotated",
            outcome.courses, outcome.cells
        );
    }

    /// Prompt for each category's color; invalid input keeps the old value.
    async fn edit_colors(&self, colors: &mut ColorConfig) -> Result<(), DomainError> {
        for category in WeekCategory::ALL {
            let current = colors.resolve(category).to_string();
            let input = Text::new(&format!("Color for {} (#rrggbb):", category.label()))
                .with_initial_value(&current)
                .prompt()
                .map_err(|e| DomainError::Ui(e.to_string()))?;
            let trimmed = input.trim();
            if is_hex_color(trimmed) {
                colors.set(category, trimmed.to_ascii_lowercase());
            } else {
                warn!(category = %category, input = trimmed, "not a #rrggbb color, keeping old value");
            }
        }
        self.color_store.save(colors).await
    }
}

/// `#` followed by exactly six hex digits.
fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(d) => d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let mut colors = self.color_store.load().await?;

        loop {
            let options = vec![
                MENU_FETCH, MENU_CACHED, MENU_EDIT, MENU_RESET, MENU_CLEAR, MENU_QUIT,
            ];
            let choice = match Select::new("week-tint", options).prompt() {
                Ok(c) => c,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    return Ok(());
                }
                Err(e) => return Err(DomainError::Ui(e.to_string())),
            };

            // One bad fetch or render must not end the session; report and
            // show the menu again.
            let result: Result<(), DomainError> = match choice {
                MENU_FETCH => self
                    .service
                    .refresh_and_annotate(&colors)
                    .await
                    .map(|o| Self::report(&o)),
                MENU_CACHED => self
                    .service
                    .annotate_cached(&colors)
                    .await
                    .map(|o| Self::report(&o)),
                MENU_EDIT => match self.edit_colors(&mut colors).await {
                    Ok(()) => self.service.annotate_cached(&colors).await.map(|_| ()),
                    Err(e) => Err(e),
                },
                MENU_RESET => {
                    colors = ColorConfig::default();
                    match self.color_store.save(&colors).await {
                        Ok(()) => self.service.annotate_cached(&colors).await.map(|_| ()),
                        Err(e) => Err(e),
                    }
                }
                MENU_CLEAR => self.service.clear_cache().await,
                _ => return Ok(()),
            };

            if let Err(e) = result {
                warn!(error = %e, "action failed");
                println!("action failed: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_validation() {
        assert!(is_hex_color("#ff9966"));
        assert!(is_hex_color("#ABCDEF"));
        assert!(!is_hex_color("ff9966"));
        assert!(!is_hex_color("#ff996"));
        assert!(!is_hex_color("#ff99667"));
        assert!(!is_hex_color("#gg0000"));
    }
}
