use std::env;
use std::time::Duration;
use crate::error::{AppError, Result};
use crate::notify::ToastStyle;
use dotenvy::dotenv;
use url::Url;

/// Base URL of the hosted image generation service.
pub const DEFAULT_API_URL: &str = "https://imagegenerator-i032.onrender.com/api/v1/";

#[derive(Clone, Debug)]
pub struct Config {
    /// Base that the `dalle` and `post` endpoints are joined onto. Always ends in `/`.
    pub api_base_url: Url,
    pub toast: ToastStyle,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists, ignore if it doesn't
        let _ = dotenv();

        let mut builder = Config::builder();

        if let Ok(url) = env::var("PROMPTSHARE_API_URL") {
            builder = builder.with_api_url(&url);
        }

        let mut toast = ToastStyle::default();
        if let Some(delay) = millis_var("PROMPTSHARE_TOAST_DELAY_MS")? {
            toast.delay = delay;
        }
        if let Some(duration) = millis_var("PROMPTSHARE_TOAST_DURATION_MS")? {
            toast.duration = duration;
        }

        builder.with_toast_style(toast).build()
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Endpoint that turns a prompt into a base64 image.
    pub fn generate_url(&self) -> Result<Url> {
        Ok(self.api_base_url.join("dalle")?)
    }

    /// Endpoint that publishes a finished post.
    pub fn post_url(&self) -> Result<Url> {
        Ok(self.api_base_url.join("post")?)
    }
}

#[derive(Default)]
pub struct ConfigBuilder {
    api_url: Option<String>,
    toast: Option<ToastStyle>,
}

impl ConfigBuilder {
    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = Some(url.to_string());
        self
    }

    pub fn with_toast_style(mut self, style: ToastStyle) -> Self {
        self.toast = Some(style);
        self
    }

    pub fn build(self) -> Result<Config> {
        let raw = self.api_url.as_deref().unwrap_or(DEFAULT_API_URL).trim();
        if raw.is_empty() {
            return Err(AppError::config("API URL must not be empty"));
        }

        // Url::join drops the last path segment unless the base ends in a slash
        let normalized = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{}/", raw)
        };
        let api_base_url = Url::parse(&normalized)?;

        if !matches!(api_base_url.scheme(), "http" | "https") {
            return Err(AppError::config(format!(
                "API URL must use http or https, got {}",
                api_base_url.scheme()
            )));
        }

        Ok(Config {
            api_base_url,
            toast: self.toast.unwrap_or_default(),
        })
    }
}

fn millis_var(name: &str) -> Result<Option<Duration>> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|_| {
                AppError::Config(format!("{} must be a whole number of milliseconds", name))
            }),
        Err(_) => Ok(None),
    }
}
