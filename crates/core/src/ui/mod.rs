//! User interface for promptshare.
//!
//! This module provides the eframe window that hosts the create-post form.
//!
//! # Architecture
//!
//! The UI is split into focused submodules:
//! - [`state`]: screens, background events and the form view model
//! - [`settings`]: user preferences and persistence
//! - [`toasts`]: the on-screen notification queue
//! - [`rendering`]: drawing for the preview panel and toasts
//! - [`create_post`]: main application logic
//!
//! # Usage
//!
//! ```ignore
//! use promptshare_core::{ui, Config};
//!
//! let config = Config::load()?;
//! let settings = ui::Settings::load();
//!
//! // Blocks until the window is closed
//! ui::run_create_post_ui(config, settings, None)?;
//! ```

mod create_post;
mod rendering;
mod settings;
mod state;
mod toasts;

// Public API exports
pub use create_post::{CreatePostApp, GuiForm};
pub use settings::Settings;
pub use state::{FormView, Preview, Screen};
pub use toasts::{QueuedToast, ToastQueue};

use crate::config::Config;
use crate::error::Result;

/// Opens the create-post window.
///
/// # Arguments
/// * `config` - Application configuration with the API base URL and toast style
/// * `settings` - Persisted user settings
/// * `initial_prompt` - Prompt to prefill, if any
///
/// # Errors
/// Returns an error if the HTTP client or the window cannot be created.
pub fn run_create_post_ui(
    config: Config,
    settings: Settings,
    initial_prompt: Option<String>,
) -> Result<()> {
    create_post::run(config, settings, initial_prompt)
}
