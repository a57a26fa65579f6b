//! PromptShare Core Library
//!
//! This library provides the core functionality for PromptShare: a form that
//! turns a text prompt into an AI generated image and shares it with the
//! community feed.
//!
//! # Overview
//!
//! - **Form**: draft state, busy flags and the generate/share actions via [`form`]
//! - **API**: the remote image generation and post endpoints via [`api`]
//! - **Notices and routing**: injected sinks in [`notify`] and [`navigation`]
//! - **Images**: data URI handling and preview decoding via [`image_processing`]
//! - **User Interface**: the eframe window via [`ui`]
//!
//! # Quick Start
//!
//! ```ignore
//! use promptshare_core::PromptShare;
//!
//! // Initialize with environment configuration
//! let app = PromptShare::new()?;
//!
//! // Open the form window
//! app.run_interactive(None)?;
//! ```
//!
//! # Module Structure
//!
//! - [`api`]: HTTP client and the [`ImageApi`] seam
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases
//! - [`form`]: The create-post form controller
//! - [`image_processing`]: Data URI and image utilities
//! - [`navigation`]: Routes and the navigator seam
//! - [`notify`]: Toasts and the notifier seam
//! - [`prompts`]: Surprise-me prompt suggestions
//! - [`ui`]: User interface components

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod image_processing;
pub mod navigation;
pub mod notify;
pub mod prompts;
pub mod ui;

// Re-export primary types for convenience
pub use api::{HttpImageApi, ImageApi};
pub use config::Config;
pub use error::{AppError, Result};
pub use form::{CreatePostForm, DraftPost, Field, FormState};
pub use navigation::{Navigator, PendingNavigation, Route};
pub use notify::{LogNotifier, Notifier, Toast, ToastKind, ToastStyle};

use std::sync::Arc;
use ui::Settings;

/// Form wired for terminal use: real HTTP, toasts as log lines.
pub type HeadlessForm = CreatePostForm<HttpImageApi, LogNotifier, PendingNavigation>;

/// Main entry point for the PromptShare application.
///
/// Bundles the configuration with the persisted user settings and builds
/// the form in either of its two hosts.
pub struct PromptShare {
    config: Config,
    settings: Settings,
}

impl PromptShare {
    /// Creates an instance from the environment and the saved settings.
    ///
    /// An API URL saved in the settings takes precedence over the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the saved API URL is invalid.
    pub fn new() -> Result<Self> {
        let settings = Settings::load();
        let config = Config::load()?;

        let mut app = Self { config, settings };
        if let Some(url) = app.settings.api_url_override().map(str::to_string) {
            app.set_api_url(&url)?;
        }
        Ok(app)
    }

    /// Creates an instance with custom configuration and default settings.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            settings: Settings::default(),
        }
    }

    /// Points the form at a different API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn set_api_url(&mut self, url: &str) -> Result<()> {
        self.config = Config::builder()
            .with_api_url(url)
            .with_toast_style(self.config.toast)
            .build()?;
        Ok(())
    }

    /// Opens the form window. Blocks until it is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or the window cannot be created.
    pub fn run_interactive(&self, initial_prompt: Option<String>) -> Result<()> {
        ui::run_create_post_ui(self.config.clone(), self.settings.clone(), initial_prompt)
    }

    /// Builds a form for headless use, prefilled with the saved author name.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn headless_form(&self) -> Result<HeadlessForm> {
        let api = Arc::new(HttpImageApi::new(&self.config)?);
        let mut form = CreatePostForm::new(
            api,
            LogNotifier::new(),
            PendingNavigation::new(),
            self.config.toast,
        );
        form.update_field(Field::Name, self.settings.author_name.clone());
        Ok(form)
    }

    /// Returns a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Remembers the author name for the next session.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be written.
    pub fn remember_author(&mut self, name: &str) -> Result<()> {
        if name.is_empty() || name == self.settings.author_name {
            return Ok(());
        }
        self.settings.author_name = name.to_string();
        self.settings.save()
    }
}

/// Initializes the library by loading environment variables.
///
/// Call this once at application startup before using any other functions.
/// This loads `.env` files if present and sets up the environment.
pub fn init() {
    let _ = dotenvy::dotenv();
}
