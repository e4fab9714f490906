pub mod banner;
pub mod grid_renderer;
pub mod tui;

pub use grid_renderer::TerminalGridRenderer;
pub use tui::TuiInputPort;

/// Prints the welcome banner. Call once at startup (after tracing init).
pub fn init_ui() {
    banner::print_welcome();
}
