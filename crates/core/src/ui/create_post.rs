//! The create-post window.
//!
//! This module contains the `CreatePostApp` struct which implements the
//! `eframe::App` trait. It owns the form controller, runs its requests on
//! background threads and draws the form from [`FormView`].

use super::rendering::{draw_preview_panel, draw_toasts};
use super::settings::Settings;
use super::state::{FormEvent, FormView, Screen};
use super::toasts::ToastQueue;
use crate::api::{HttpImageApi, ImageApi};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::form::{CreatePostForm, Field};
use crate::image_processing::{decode_data_uri, to_color_image};
use crate::navigation::{Navigator, PendingNavigation, Route};
use eframe::egui;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

const PROMPT_HINT: &str =
    "A man wanders through the rainy streets of Tokyo, with bright neon signs, 50mm...";

/// Form controller as wired up for the GUI.
pub type GuiForm = CreatePostForm<dyn ImageApi, ToastQueue, PendingNavigation>;

/// Decoded preview, keyed by the data URI it came from.
struct PreviewTexture {
    uri: String,
    texture: Option<egui::TextureHandle>,
}

pub struct CreatePostApp {
    config: Config,
    api: Arc<dyn ImageApi>,
    screen: Screen,
    form: GuiForm,
    preview: Option<PreviewTexture>,

    // Background request results
    rx: Receiver<FormEvent>,
    tx: Sender<FormEvent>,

    // Settings
    settings: Settings,
    settings_path: Option<PathBuf>,
}

impl CreatePostApp {
    /// Creates the app showing an empty form.
    ///
    /// # Arguments
    /// * `config` - Application configuration
    /// * `api` - Backend the form talks to
    /// * `settings` - Loaded user settings, used to prefill the name
    /// * `settings_path` - Where to persist settings, `None` to skip saving
    pub fn new(
        config: Config,
        api: Arc<dyn ImageApi>,
        settings: Settings,
        settings_path: Option<PathBuf>,
    ) -> Self {
        let (tx, rx) = channel();
        let form = Self::fresh_form(&config, &api, &settings, ToastQueue::new());

        Self {
            config,
            api,
            screen: Screen::CreatePost,
            form,
            preview: None,
            rx,
            tx,
            settings,
            settings_path,
        }
    }

    fn fresh_form(
        config: &Config,
        api: &Arc<dyn ImageApi>,
        settings: &Settings,
        toasts: ToastQueue,
    ) -> GuiForm {
        let mut form = CreatePostForm::new(
            Arc::clone(api),
            toasts,
            PendingNavigation::new(),
            config.toast,
        );
        form.update_field(Field::Name, settings.author_name.clone());
        form
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn form(&self) -> &GuiForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut GuiForm {
        &mut self.form
    }

    /// Starts a new draft, carrying over toasts that are still showing.
    pub fn open_form(&mut self) {
        let toasts = std::mem::take(self.form.notifier_mut());
        self.form = Self::fresh_form(&self.config, &self.api, &self.settings, toasts);
        self.preview = None;

        // Results from the previous draft's requests are dropped with the old channel
        let (tx, rx) = channel();
        self.tx = tx;
        self.rx = rx;
        self.screen = Screen::CreatePost;
    }

    /// Checks the prompt and runs generation in the background.
    fn start_generate(&mut self, ctx: &egui::Context) {
        let Some(request) = self.form.begin_generate() else {
            return;
        };
        let api = self.form.api();
        spawn_request(
            ctx.clone(),
            self.tx.clone(),
            async move { api.generate_image(&request).await },
            FormEvent::ImageGenerated,
        );
    }

    /// Checks prompt and photo and runs the share request in the background.
    fn start_submit(&mut self, ctx: &egui::Context) {
        let Some(post) = self.form.begin_submit() else {
            return;
        };
        let api = self.form.api();
        spawn_request(
            ctx.clone(),
            self.tx.clone(),
            async move { api.create_post(&post).await },
            FormEvent::PostShared,
        );
    }

    /// Applies finished background requests to the form.
    pub(crate) fn process_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            self.apply_event(event);
        }
    }

    pub(crate) fn apply_event(&mut self, event: FormEvent) {
        match event {
            FormEvent::ImageGenerated(result) => self.form.finish_generate(result),
            FormEvent::PostShared(result) => self.form.finish_submit(result),
        }
    }

    /// Switches screens if the form asked to navigate.
    pub(crate) fn handle_navigation(&mut self) {
        let Some(route) = self.form.navigator_mut().take() else {
            return;
        };

        match route {
            Route::Home => {
                self.remember_author();
                self.screen = route.into();
            }
            Route::CreatePost => self.open_form(),
        }
    }

    fn remember_author(&mut self) {
        let name = self.form.draft().name.clone();
        if name.is_empty() || name == self.settings.author_name {
            return;
        }
        self.settings.author_name = name;
        if let Some(path) = &self.settings_path {
            if let Err(e) = self.settings.save_to(path) {
                tracing::warn!(error = %e, "failed to save settings");
            }
        }
    }

    /// Keeps the preview texture in sync with the draft photo.
    fn sync_preview(&mut self, ctx: &egui::Context) {
        let photo = &self.form.draft().photo;
        if photo.is_empty() {
            self.preview = None;
            return;
        }
        if self.preview.as_ref().is_some_and(|p| &p.uri == photo) {
            return;
        }

        let texture = match decode_data_uri(photo) {
            Ok(image) => Some(ctx.load_texture(
                "generated-photo",
                to_color_image(&image),
                egui::TextureOptions::LINEAR,
            )),
            Err(e) => {
                tracing::warn!(error = %e, "could not decode generated photo");
                None
            }
        };
        self.preview = Some(PreviewTexture {
            uri: photo.clone(),
            texture,
        });
    }

    /// Renders the form screen.
    fn render_form(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let view = FormView::from_state(self.form.state());

        ui.heading(
            egui::RichText::new("Generate an imaginative image and share it with the community")
                .strong()
                .size(28.0),
        );
        ui.add_space(24.0);

        ui.label("Your Name");
        let mut name = self.form.draft().name.clone();
        let name_edit = ui.add(
            egui::TextEdit::singleline(&mut name)
                .hint_text("Ex. Amandi Perera")
                .desired_width(f32::INFINITY),
        );
        if name_edit.changed() {
            self.form.update_field(Field::Name, name);
        }
        ui.add_space(12.0);

        let mut surprise = false;
        ui.horizontal(|ui| {
            ui.label("Prompt");
            surprise = ui.small_button("Surprise me").clicked();
        });
        if surprise {
            self.form.surprise_me();
        }

        let mut prompt = self.form.draft().prompt.clone();
        let prompt_edit = ui.add(
            egui::TextEdit::singleline(&mut prompt)
                .hint_text(PROMPT_HINT)
                .desired_width(f32::INFINITY),
        );
        if prompt_edit.changed() {
            self.form.update_field(Field::Prompt, prompt);
        }
        ui.add_space(12.0);

        let texture = self.preview.as_ref().and_then(|p| p.texture.as_ref());
        draw_preview_panel(ui, texture, &view.alt_text, view.show_spinner);
        ui.add_space(16.0);

        let generate = ui.add_enabled(
            view.generate_enabled,
            egui::Button::new(egui::RichText::new(view.generate_label).color(egui::Color32::WHITE))
                .fill(egui::Color32::from_rgb(4, 120, 87)),
        );
        if generate.clicked() {
            self.start_generate(ctx);
        }

        ui.add_space(32.0);
        ui.label(
            egui::RichText::new("** Share it with others in the community !**")
                .color(egui::Color32::from_gray(117)),
        );
        let share = ui.add_enabled(
            view.share_enabled,
            egui::Button::new(egui::RichText::new(view.share_label).color(egui::Color32::WHITE))
                .fill(egui::Color32::from_rgb(100, 105, 255)),
        );
        if share.clicked() {
            self.start_submit(ctx);
        }
    }

    /// Renders the root view shown after a successful share.
    fn render_home(&mut self, ui: &mut egui::Ui) {
        ui.heading(egui::RichText::new("The Community Showcase").strong().size(28.0));
        ui.add_space(8.0);
        ui.label("Browse through a collection of imaginative and visually stunning images.");
        ui.add_space(24.0);
        if ui.button("Create").clicked() {
            self.form.navigator_mut().navigate(Route::CreatePost);
        }
    }
}

impl eframe::App for CreatePostApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::light());

        self.process_events();
        self.handle_navigation();
        self.sync_preview(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_max_width(720.0);
                match self.screen {
                    Screen::CreatePost => self.render_form(ui, ctx),
                    Screen::Home => self.render_home(ui),
                }
            });
        });

        let now = Instant::now();
        draw_toasts(ctx, self.form.notifier(), now);
        if self.form.notifier_mut().prune(now) {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

/// Runs `task` on a fresh current-thread runtime in a background thread and
/// sends its result back to the UI wrapped by `wrap`.
fn spawn_request<T, Fut>(
    ctx: egui::Context,
    tx: Sender<FormEvent>,
    task: Fut,
    wrap: fn(Result<T>) -> FormEvent,
) where
    T: Send + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build();

        // A runtime failure still has to reach the form so its busy flag clears
        let result = match runtime {
            Ok(rt) => rt.block_on(task),
            Err(e) => Err(AppError::Io(e)),
        };

        let _ = tx.send(wrap(result));
        ctx.request_repaint();
    });
}

/// Launches the create-post window and returns when the user closes it.
///
/// # Arguments
/// * `config` - Application configuration
/// * `settings` - Loaded user settings
/// * `initial_prompt` - Optional prompt to prefill
pub fn run(config: Config, settings: Settings, initial_prompt: Option<String>) -> Result<()> {
    let api: Arc<dyn ImageApi> = Arc::new(HttpImageApi::new(&config)?);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("PromptShare")
            .with_inner_size([760.0, 820.0]),
        ..Default::default()
    };

    eframe::run_native(
        "PromptShare",
        options,
        Box::new(move |_cc| {
            let mut app = CreatePostApp::new(config, api, settings, Settings::default_path());
            if let Some(prompt) = initial_prompt {
                app.form_mut().update_field(Field::Prompt, prompt);
            }
            Ok(Box::new(app) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| AppError::ui(format!("Failed to run UI: {}", e)))
}
