use crate::error::SdkError;
use crate::navigation::{NavigationAction, NavigationDecision, NavigationPolicy};
use crate::settings::WidgetSettings;
use crate::user::HelpLaneUser;
use crate::widget::widget_document;
use serde::{Deserialize, Serialize};
use url::Url;

pub const SCREEN_TITLE: &str = "Support";
pub const ERROR_TITLE: &str = "Connection Error";
pub const ERROR_MESSAGE: &str =
    "Unable to load chat. Please check your internet connection and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Document to load into the surface, resolved against `base_url`.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub html: String,
    pub base_url: Option<Url>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePhase {
    /// The document never started loading.
    Provisional,
    Committed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadFailure {
    pub phase: FailurePhase,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptAction {
    Retry,
    Close,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPrompt {
    pub title: &'static str,
    pub message: &'static str,
    pub actions: [PromptAction; 2],
}

impl Default for ErrorPrompt {
    fn default() -> Self {
        Self {
            title: ERROR_TITLE,
            message: ERROR_MESSAGE,
            actions: [PromptAction::Retry, PromptAction::Close],
        }
    }
}

/// The chat surface model: what gets loaded, and how load results, prompts
/// and navigation are handled. Rendering is left to a `PresentingSurface`.
#[derive(Debug, Clone)]
pub struct ChatScreen {
    brand_token: String,
    base_url: String,
    user: Option<HelpLaneUser>,
    policy: NavigationPolicy,
    state: LoadState,
    loading_indicator: bool,
    dismissed: bool,
}

impl ChatScreen {
    pub fn new(brand_token: String, base_url: String, user: Option<HelpLaneUser>) -> Self {
        let policy = NavigationPolicy::for_base_url(&base_url);
        Self {
            brand_token,
            base_url,
            user,
            policy,
            state: LoadState::Idle,
            loading_indicator: false,
            dismissed: false,
        }
    }

    pub fn title(&self) -> &'static str {
        SCREEN_TITLE
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.loading_indicator
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    pub fn document(&self) -> Result<String, SdkError> {
        let settings = WidgetSettings::new(&self.brand_token, &self.base_url, self.user.as_ref());
        widget_document(&settings)
    }

    /// Build the document and start the loading indicator.
    pub fn load(&mut self) -> Result<LoadRequest, SdkError> {
        let html = self.document()?;
        self.state = LoadState::Loading;
        self.loading_indicator = true;
        tracing::debug!(base_url = %self.base_url, "loading chat widget");
        Ok(LoadRequest {
            html,
            base_url: Url::parse(&self.base_url).ok(),
        })
    }

    pub fn did_finish(&mut self) {
        self.loading_indicator = false;
        self.state = LoadState::Loaded;
        tracing::debug!("chat widget loaded");
    }

    pub fn did_fail(&mut self, failure: &LoadFailure) -> ErrorPrompt {
        self.loading_indicator = false;
        self.state = LoadState::Failed;
        tracing::warn!(phase = ?failure.phase, reason = %failure.reason, "chat widget failed to load");
        ErrorPrompt::default()
    }

    /// Apply the user's choice from the error prompt. Retry returns the
    /// request to load again.
    pub fn resolve_prompt(&mut self, action: PromptAction) -> Result<Option<LoadRequest>, SdkError> {
        match action {
            PromptAction::Retry => self.load().map(Some),
            PromptAction::Close => {
                self.close();
                Ok(None)
            }
        }
    }

    pub fn close(&mut self) {
        self.loading_indicator = false;
        self.dismissed = true;
    }

    pub fn decide_navigation(&self, action: &NavigationAction) -> NavigationDecision {
        self.policy.decide(action)
    }
}
