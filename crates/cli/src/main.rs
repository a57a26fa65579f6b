use promptshare_core::{
    form::Field,
    image_processing::save_photo,
    init,
    HeadlessForm,
    PromptShare,
};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Prompt to prefill (GUI) or generate from (headless)
    #[arg(trailing_var_arg = true)]
    prompt: Vec<String>,

    /// Override the API base URL defined in .env
    #[arg(long)]
    api_url: Option<String>,

    /// Run from the terminal without opening a window
    #[arg(long, default_value_t = false)]
    headless: bool,

    /// Author name for the post (headless)
    #[arg(short, long)]
    name: Option<String>,

    /// Replace the prompt with a random suggestion (headless)
    #[arg(long, default_value_t = false)]
    surprise: bool,

    /// Save the generated image to this file (headless)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Share the generated image with the community (headless)
    #[arg(long, default_value_t = false)]
    share: bool,

    /// Emit logs as JSON
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup
    init();
    let args = Args::parse();
    init_logging(args.log_json);

    let mut app = PromptShare::new().context("Failed to load configuration")?;
    if let Some(url) = &args.api_url {
        app.set_api_url(url).context("Invalid --api-url")?;
    }

    let prompt = args.prompt.join(" ");

    if !args.headless {
        let initial = (!prompt.trim().is_empty()).then_some(prompt);
        app.run_interactive(initial).context("Failed to run the form window")?;
        return Ok(());
    }

    let mut form = app.headless_form().context("Failed to create API client")?;
    if let Some(name) = &args.name {
        form.update_field(Field::Name, name.clone());
    }
    form.update_field(Field::Prompt, prompt);
    if args.surprise {
        form.surprise_me();
        println!("Prompt: {}", form.draft().prompt);
    }

    run_with_spinner("Generating image...", form.generate_image()).await?;
    if form.draft().photo.is_empty() {
        bail!("No image was generated");
    }

    if let Some(path) = &args.output {
        save_photo(&form.draft().photo, path)
            .with_context(|| format!("Failed to save image to {}", path.display()))?;
        println!("Saved image to {}", path.display());
    }

    if args.share {
        share(&mut form).await?;
        let name = form.draft().name.clone();
        if let Err(e) = app.remember_author(&name) {
            tracing::warn!(error = %e, "failed to save settings");
        }
    }

    Ok(())
}

async fn share(form: &mut HeadlessForm) -> Result<()> {
    let errors_before = form.notifier().error_count();
    run_with_spinner("Sharing...", form.submit()).await?;

    let published = form.navigator_mut().take().is_some();
    if !published || form.notifier().error_count() > errors_before {
        bail!("The post was not published");
    }
    println!("Shared with the community");
    Ok(())
}

async fn run_with_spinner<F>(message: &str, task: F) -> Result<()>
where
    F: std::future::Future<Output = ()>,
{
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.green} {msg}")?,
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    task.await;

    spinner.finish_and_clear();
    Ok(())
}

fn init_logging(json: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,promptshare_core=info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}
