//! The create-post form controller.
//!
//! [`CreatePostForm`] owns the draft and the two busy flags, and runs the
//! generate and share actions against an injected [`ImageApi`]. Outcomes are
//! reported through a [`Notifier`] and the final redirect through a
//! [`Navigator`], so the controller has no UI of its own.
//!
//! Each action comes in two shapes:
//!
//! - `begin_*` / `finish_*` for callers that run the request elsewhere (the
//!   GUI spawns it on a background thread and feeds the result back).
//! - An async method that does both around an inline `.await`.
//!
//! Both shapes share the same precondition checks and cleanup.

use crate::api::{GenerateRequest, ImageApi};
use crate::error::{AppError, Result};
use crate::image_processing::photo_data_uri;
use crate::navigation::{Navigator, Route};
use crate::notify::{Notifier, Toast, ToastStyle};
use crate::prompts;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

const MISSING_PROMPT_TITLE: &str = "Fill in the Blanks";
const MISSING_PROMPT_TEXT: &str = "Please provide proper prompt";
const MISSING_FIELDS_TITLE: &str = "Syntax Error";
const MISSING_FIELDS_TEXT: &str = "Please generate an image with proper details";
const FAILURE_TITLE: &str = "Error Occurred";
const PUBLISHED_TITLE: &str = "Success";
const PUBLISHED_TEXT: &str = "Your image has been published";

/// The in-progress post.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPost {
    pub name: String,
    pub prompt: String,
    /// Data URI of the generated image, empty until a generation succeeds.
    pub photo: String,
}

/// User-editable fields of a [`DraftPost`]. The photo is not one of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Prompt,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Prompt => "prompt",
        }
    }
}

impl FromStr for Field {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(Field::Name),
            "prompt" => Ok(Field::Prompt),
            other => Err(AppError::UnknownField(other.to_string())),
        }
    }
}

/// Everything the presentation needs to draw the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    draft: DraftPost,
    is_generating_image: bool,
    is_submitting: bool,
}

impl FormState {
    pub fn draft(&self) -> &DraftPost {
        &self.draft
    }

    pub fn is_generating_image(&self) -> bool {
        self.is_generating_image
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }
}

pub struct CreatePostForm<A: ?Sized, N, V> {
    state: FormState,
    api: Arc<A>,
    notifier: N,
    navigator: V,
    toast_style: ToastStyle,
}

impl<A, N, V> CreatePostForm<A, N, V>
where
    A: ImageApi + ?Sized,
    N: Notifier,
    V: Navigator,
{
    /// Creates a form with an empty draft.
    pub fn new(api: Arc<A>, notifier: N, navigator: V, toast_style: ToastStyle) -> Self {
        Self {
            state: FormState::default(),
            api,
            notifier,
            navigator,
            toast_style,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn draft(&self) -> &DraftPost {
        &self.state.draft
    }

    /// Shared handle to the API, for running requests off the UI thread.
    pub fn api(&self) -> Arc<A> {
        Arc::clone(&self.api)
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn navigator_mut(&mut self) -> &mut V {
        &mut self.navigator
    }

    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        tracing::trace!(field = field.as_str(), len = value.len(), "field updated");
        match field {
            Field::Name => self.state.draft.name = value,
            Field::Prompt => self.state.draft.prompt = value,
        }
    }

    /// Replaces the prompt with a random suggestion different from the current one.
    pub fn surprise_me(&mut self) {
        let suggestion = prompts::random_prompt(&self.state.draft.prompt);
        self.update_field(Field::Prompt, suggestion);
    }

    /// Checks the prompt and marks generation as running.
    ///
    /// Returns `None` after raising a notice when there is no prompt. In that
    /// case nothing should be sent.
    pub fn begin_generate(&mut self) -> Option<GenerateRequest> {
        if self.state.draft.prompt.is_empty() {
            tracing::debug!("generation skipped, prompt is empty");
            self.notifier
                .info(Toast::new(MISSING_PROMPT_TITLE, MISSING_PROMPT_TEXT, &self.toast_style));
            return None;
        }

        self.state.is_generating_image = true;
        tracing::debug!(prompt = %self.state.draft.prompt, "generating image");
        Some(GenerateRequest {
            prompt: self.state.draft.prompt.clone(),
        })
    }

    /// Applies the outcome of a generation request and clears the busy flag.
    pub fn finish_generate(&mut self, result: Result<String>) {
        match result {
            Ok(base64_photo) => {
                self.state.draft.photo = photo_data_uri(&base64_photo);
                tracing::info!(bytes = base64_photo.len(), "image generated");
            }
            Err(e) => {
                tracing::warn!(error = %e, "image generation failed");
                self.notifier
                    .error(Toast::new(FAILURE_TITLE, e.to_string(), &self.toast_style));
            }
        }
        self.state.is_generating_image = false;
    }

    pub async fn generate_image(&mut self) {
        let Some(request) = self.begin_generate() else {
            return;
        };
        let result = self.api.generate_image(&request).await;
        self.finish_generate(result);
    }

    /// Checks prompt and photo and marks submission as running.
    ///
    /// Returns the post to publish, or `None` after raising a notice.
    pub fn begin_submit(&mut self) -> Option<DraftPost> {
        let draft = &self.state.draft;
        if draft.prompt.is_empty() || draft.photo.is_empty() {
            tracing::debug!("submission skipped, prompt or photo missing");
            self.notifier
                .error(Toast::new(MISSING_FIELDS_TITLE, MISSING_FIELDS_TEXT, &self.toast_style));
            return None;
        }

        self.state.is_submitting = true;
        tracing::debug!(name = %draft.name, "sharing post");
        Some(draft.clone())
    }

    /// Applies the outcome of a submission, redirecting home on success.
    pub fn finish_submit(&mut self, result: Result<()>) {
        match result {
            Ok(()) => {
                tracing::info!("post published");
                self.notifier
                    .success(Toast::new(PUBLISHED_TITLE, PUBLISHED_TEXT, &self.toast_style));
                self.navigator.navigate(Route::Home);
            }
            Err(e) => {
                tracing::warn!(error = %e, "publishing failed");
                self.notifier
                    .error(Toast::new(FAILURE_TITLE, e.to_string(), &self.toast_style));
            }
        }
        self.state.is_submitting = false;
    }

    pub async fn submit(&mut self) {
        let Some(post) = self.begin_submit() else {
            return;
        };
        let result = self.api.create_post(&post).await;
        self.finish_submit(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ToastKind;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// API double that replays scripted results and records every call.
    #[derive(Default)]
    struct ScriptedApi {
        generate_results: Mutex<VecDeque<Result<String>>>,
        post_results: Mutex<VecDeque<Result<()>>>,
        generate_calls: Mutex<Vec<GenerateRequest>>,
        post_calls: Mutex<Vec<DraftPost>>,
    }

    impl ScriptedApi {
        fn with_photo(self, photo: &str) -> Self {
            self.generate_results
                .lock()
                .unwrap()
                .push_back(Ok(photo.to_string()));
            self
        }

        fn with_generate_error(self, err: AppError) -> Self {
            self.generate_results.lock().unwrap().push_back(Err(err));
            self
        }

        fn with_post_ok(self) -> Self {
            self.post_results.lock().unwrap().push_back(Ok(()));
            self
        }

        fn with_post_error(self, err: AppError) -> Self {
            self.post_results.lock().unwrap().push_back(Err(err));
            self
        }

        fn generate_calls(&self) -> Vec<GenerateRequest> {
            self.generate_calls.lock().unwrap().clone()
        }

        fn post_calls(&self) -> Vec<DraftPost> {
            self.post_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ImageApi for ScriptedApi {
        async fn generate_image(&self, request: &GenerateRequest) -> Result<String> {
            self.generate_calls.lock().unwrap().push(request.clone());
            self.generate_results
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected generate call")
        }

        async fn create_post(&self, post: &DraftPost) -> Result<()> {
            self.post_calls.lock().unwrap().push(post.clone());
            self.post_results
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected post call")
        }
    }

    #[derive(Default)]
    struct RecordingNotifier(Vec<(ToastKind, Toast)>);

    impl RecordingNotifier {
        fn titles(&self) -> Vec<(ToastKind, &str)> {
            self.0.iter().map(|(k, t)| (*k, t.title.as_str())).collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, kind: ToastKind, toast: Toast) {
            self.0.push((kind, toast));
        }
    }

    #[derive(Default)]
    struct RecordingNavigator(Vec<Route>);

    impl Navigator for RecordingNavigator {
        fn navigate(&mut self, route: Route) {
            self.0.push(route);
        }
    }

    type TestForm = CreatePostForm<ScriptedApi, RecordingNotifier, RecordingNavigator>;

    fn form(api: ScriptedApi) -> (TestForm, Arc<ScriptedApi>) {
        let api = Arc::new(api);
        let form = CreatePostForm::new(
            Arc::clone(&api),
            RecordingNotifier::default(),
            RecordingNavigator::default(),
            ToastStyle::default(),
        );
        (form, api)
    }

    #[test]
    fn test_update_field_has_no_cross_talk() {
        let (mut form, _) = form(ScriptedApi::default());
        form.update_field(Field::Name, "Alice");
        form.update_field(Field::Prompt, "cats");
        assert_eq!(
            form.draft(),
            &DraftPost {
                name: "Alice".to_string(),
                prompt: "cats".to_string(),
                photo: String::new(),
            }
        );
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("name".parse::<Field>().unwrap(), Field::Name);
        assert_eq!("prompt".parse::<Field>().unwrap(), Field::Prompt);
        assert!(matches!("photo".parse::<Field>(), Err(AppError::UnknownField(f)) if f == "photo"));
        for field in [Field::Name, Field::Prompt] {
            assert_eq!(field.as_str().parse::<Field>().unwrap(), field);
        }
    }

    #[test]
    fn test_surprise_me_changes_prompt() {
        let (mut form, _) = form(ScriptedApi::default());
        form.update_field(Field::Prompt, prompts::SURPRISE_PROMPTS[0]);
        form.surprise_me();
        let prompt = form.draft().prompt.clone();
        assert_ne!(prompt, prompts::SURPRISE_PROMPTS[0]);
        assert!(prompts::SURPRISE_PROMPTS.contains(&prompt.as_str()));
        assert!(form.draft().photo.is_empty());
    }

    #[tokio::test]
    async fn test_generate_without_prompt_skips_network() {
        let (mut form, api) = form(ScriptedApi::default());
        form.update_field(Field::Name, "Alice");
        form.generate_image().await;

        assert!(api.generate_calls().is_empty());
        assert_eq!(form.notifier().titles(), vec![(ToastKind::Info, "Fill in the Blanks")]);
        assert_eq!(form.notifier().0[0].1.text, "Please provide proper prompt");
        assert!(!form.state().is_generating_image());
        assert!(form.draft().photo.is_empty());
    }

    #[tokio::test]
    async fn test_generate_success_stores_data_uri() {
        let (mut form, api) = form(ScriptedApi::default().with_photo("Zm9v"));
        form.update_field(Field::Prompt, "cats");
        form.generate_image().await;

        assert_eq!(form.draft().photo, "data:image/jpeg;base64,Zm9v");
        assert_eq!(
            api.generate_calls(),
            vec![GenerateRequest {
                prompt: "cats".to_string()
            }]
        );
        assert!(form.notifier().0.is_empty());
        assert!(!form.state().is_generating_image());
    }

    #[tokio::test]
    async fn test_generate_failure_reports_raw_error() {
        let err = AppError::Status {
            status: 500,
            body: "billing hard limit reached".to_string(),
        };
        let (mut form, _) = form(ScriptedApi::default().with_generate_error(err));
        form.update_field(Field::Prompt, "cats");
        form.generate_image().await;

        assert_eq!(form.notifier().titles(), vec![(ToastKind::Error, "Error Occurred")]);
        assert_eq!(
            form.notifier().0[0].1.text,
            "Server responded with 500: billing hard limit reached"
        );
        assert!(form.draft().photo.is_empty());
        assert!(!form.state().is_generating_image());
    }

    #[tokio::test]
    async fn test_failed_regeneration_keeps_previous_photo() {
        let api = ScriptedApi::default()
            .with_photo("AAAA")
            .with_generate_error(AppError::malformed("no photo"));
        let (mut form, _) = form(api);
        form.update_field(Field::Prompt, "cats");
        form.generate_image().await;
        form.generate_image().await;

        assert_eq!(form.draft().photo, "data:image/jpeg;base64,AAAA");
        assert!(!form.state().is_generating_image());
    }

    #[test]
    fn test_busy_flag_set_while_generation_runs() {
        let (mut form, _) = form(ScriptedApi::default());
        form.update_field(Field::Prompt, "cats");

        let request = form.begin_generate().unwrap();
        assert_eq!(request.prompt, "cats");
        assert!(form.state().is_generating_image());

        form.finish_generate(Ok("AAAA".to_string()));
        assert!(!form.state().is_generating_image());
    }

    #[test]
    fn test_overlapping_generations_last_response_wins() {
        let (mut form, _) = form(ScriptedApi::default());
        form.update_field(Field::Prompt, "cats");
        form.begin_generate().unwrap();
        form.begin_generate().unwrap();

        form.finish_generate(Ok("second".to_string()));
        assert!(!form.state().is_generating_image());
        form.finish_generate(Ok("first".to_string()));

        assert_eq!(form.draft().photo, "data:image/jpeg;base64,first");
    }

    #[test]
    fn test_whitespace_prompt_counts_as_filled() {
        let (mut form, _) = form(ScriptedApi::default());
        form.update_field(Field::Prompt, " ");
        assert!(form.begin_generate().is_some());
    }

    #[tokio::test]
    async fn test_submit_without_photo_skips_network() {
        let (mut form, api) = form(ScriptedApi::default());
        form.update_field(Field::Name, "Alice");
        form.update_field(Field::Prompt, "cats");
        form.submit().await;

        assert!(api.post_calls().is_empty());
        assert_eq!(form.notifier().titles(), vec![(ToastKind::Error, "Syntax Error")]);
        assert_eq!(
            form.notifier().0[0].1.text,
            "Please generate an image with proper details"
        );
        assert!(form.navigator_mut().0.is_empty());
        assert!(!form.state().is_submitting());
    }

    #[tokio::test]
    async fn test_submit_without_prompt_skips_network() {
        let (mut form, api) = form(ScriptedApi::default().with_photo("AAAA"));
        form.update_field(Field::Prompt, "cats");
        form.generate_image().await;
        form.update_field(Field::Prompt, "");
        form.submit().await;

        assert!(api.post_calls().is_empty());
        assert_eq!(form.notifier().titles(), vec![(ToastKind::Error, "Syntax Error")]);
        assert!(!form.state().is_submitting());
    }

    #[tokio::test]
    async fn test_submit_failure_reports_and_stays() {
        let api = ScriptedApi::default()
            .with_photo("AAAA")
            .with_post_error(AppError::malformed("expected JSON"));
        let (mut form, _) = form(api);
        form.update_field(Field::Prompt, "cats");
        form.generate_image().await;
        form.submit().await;

        assert_eq!(form.notifier().titles(), vec![(ToastKind::Error, "Error Occurred")]);
        assert_eq!(form.notifier().0[0].1.text, "Malformed response: expected JSON");
        assert!(form.navigator_mut().0.is_empty());
        assert_eq!(form.draft().photo, "data:image/jpeg;base64,AAAA");
        assert!(!form.state().is_submitting());
    }

    #[test]
    fn test_busy_flag_set_while_submission_runs() {
        let (mut form, _) = form(ScriptedApi::default());
        form.update_field(Field::Prompt, "cats");
        form.begin_generate().unwrap();
        form.finish_generate(Ok("AAAA".to_string()));

        let post = form.begin_submit().unwrap();
        assert_eq!(post.photo, "data:image/jpeg;base64,AAAA");
        assert!(form.state().is_submitting());

        form.finish_submit(Err(AppError::malformed("nope")));
        assert!(!form.state().is_submitting());
    }

    #[tokio::test]
    async fn test_generate_then_share_scenario() {
        let api = ScriptedApi::default().with_photo("AAAA").with_post_ok();
        let (mut form, api) = form(api);
        form.update_field(Field::Name, "Alice");
        form.update_field(Field::Prompt, "dog in space");

        form.generate_image().await;
        assert_eq!(form.draft().photo, "data:image/jpeg;base64,AAAA");
        assert!(form.notifier().0.is_empty());
        assert!(!form.state().is_generating_image());

        form.submit().await;
        assert_eq!(
            api.post_calls(),
            vec![DraftPost {
                name: "Alice".to_string(),
                prompt: "dog in space".to_string(),
                photo: "data:image/jpeg;base64,AAAA".to_string(),
            }]
        );
        assert_eq!(form.notifier().titles(), vec![(ToastKind::Success, "Success")]);
        assert_eq!(form.notifier().0[0].1.text, "Your image has been published");
        assert_eq!(form.navigator_mut().0, vec![Route::Home]);
        assert!(!form.state().is_submitting());
    }

    #[tokio::test]
    async fn test_works_behind_trait_object() {
        let api: Arc<dyn ImageApi> = Arc::new(ScriptedApi::default().with_photo("Zm9v"));
        let mut form = CreatePostForm::new(
            api,
            RecordingNotifier::default(),
            RecordingNavigator::default(),
            ToastStyle::default(),
        );
        form.update_field(Field::Prompt, "cats");
        form.generate_image().await;
        assert_eq!(form.draft().photo, "data:image/jpeg;base64,Zm9v");
    }
}
