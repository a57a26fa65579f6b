//! UI state types and event definitions.
//!
//! This module contains the screen switcher, the events background tasks
//! send back to the UI thread, and the view model the form is drawn from.

use crate::error::Result;
use crate::form::FormState;
use crate::navigation::Route;

/// Which view the window is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Home,
    CreatePost,
}

impl From<Route> for Screen {
    fn from(route: Route) -> Self {
        match route {
            Route::Home => Screen::Home,
            Route::CreatePost => Screen::CreatePost,
        }
    }
}

/// Results received from background request threads.
///
/// These are sent through a channel to the UI thread, which applies them
/// to the form on the next frame.
pub(crate) enum FormEvent {
    /// The generation request finished with a base64 payload or an error.
    ImageGenerated(Result<String>),
    /// The post request finished.
    PostShared(Result<()>),
}

/// What the image panel shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Preview {
    /// The generated photo, as a data URI.
    Photo(String),
    /// The faded stand-in image.
    Placeholder,
}

/// Labels and toggles derived from the form state, one per frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormView {
    pub preview: Preview,
    pub alt_text: String,
    pub show_spinner: bool,
    pub generate_label: &'static str,
    pub generate_enabled: bool,
    pub share_label: &'static str,
    pub share_enabled: bool,
}

impl FormView {
    pub fn from_state(state: &FormState) -> Self {
        let draft = state.draft();
        let (preview, alt_text) = if draft.photo.is_empty() {
            (Preview::Placeholder, "preview".to_string())
        } else {
            (Preview::Photo(draft.photo.clone()), draft.prompt.clone())
        };

        Self {
            preview,
            alt_text,
            show_spinner: state.is_generating_image(),
            generate_label: if state.is_generating_image() {
                "Generating..."
            } else {
                "Generate"
            },
            generate_enabled: !state.is_generating_image(),
            share_label: if state.is_submitting() {
                "Sharing..."
            } else {
                "Share with the Community"
            },
            share_enabled: !state.is_submitting(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{GenerateRequest, ImageApi};
    use crate::form::{CreatePostForm, DraftPost, Field};
    use crate::navigation::PendingNavigation;
    use crate::notify::{LogNotifier, ToastStyle};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct NoApi;

    #[async_trait]
    impl ImageApi for NoApi {
        async fn generate_image(&self, _request: &GenerateRequest) -> Result<String> {
            unreachable!("view tests never call the API")
        }

        async fn create_post(&self, _post: &DraftPost) -> Result<()> {
            unreachable!("view tests never call the API")
        }
    }

    fn form() -> CreatePostForm<NoApi, LogNotifier, PendingNavigation> {
        CreatePostForm::new(
            Arc::new(NoApi),
            LogNotifier::new(),
            PendingNavigation::new(),
            ToastStyle::default(),
        )
    }

    #[test]
    fn test_idle_view() {
        let view = FormView::from_state(form().state());
        assert_eq!(view.preview, Preview::Placeholder);
        assert_eq!(view.alt_text, "preview");
        assert!(!view.show_spinner);
        assert_eq!(view.generate_label, "Generate");
        assert_eq!(view.share_label, "Share with the Community");
        assert!(view.generate_enabled && view.share_enabled);
    }

    #[test]
    fn test_generating_view() {
        let mut form = form();
        form.update_field(Field::Prompt, "cats");
        form.begin_generate().unwrap();

        let view = FormView::from_state(form.state());
        assert!(view.show_spinner);
        assert_eq!(view.generate_label, "Generating...");
        assert!(!view.generate_enabled);
        assert!(view.share_enabled);
    }

    #[test]
    fn test_photo_and_sharing_view() {
        let mut form = form();
        form.update_field(Field::Prompt, "cats");
        form.begin_generate().unwrap();
        form.finish_generate(Ok("AAAA".to_string()));
        form.begin_submit().unwrap();

        let view = FormView::from_state(form.state());
        assert_eq!(
            view.preview,
            Preview::Photo("data:image/jpeg;base64,AAAA".to_string())
        );
        assert_eq!(view.alt_text, "cats");
        assert!(!view.show_spinner);
        assert_eq!(view.share_label, "Sharing...");
        assert!(!view.share_enabled);
    }

    #[test]
    fn test_screen_from_route() {
        assert_eq!(Screen::from(Route::Home), Screen::Home);
        assert_eq!(Screen::from(Route::CreatePost), Screen::CreatePost);
    }
}
