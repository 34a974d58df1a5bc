use crate::chat::ChatScreen;
use crate::error::SdkError;
use crate::surface::{PresentationStyle, PresentingSurface};
use crate::user::HelpLaneUser;
use tracing::{error, info};

pub const DEFAULT_BASE_URL: &str = "https://api.helplane.io";

/// SDK entry point. Owned by the host application and passed to whatever
/// needs to open the chat.
#[derive(Debug, Clone)]
pub struct HelpLane {
    brand_token: Option<String>,
    base_url: String,
    user: Option<HelpLaneUser>,
}

impl Default for HelpLane {
    fn default() -> Self {
        Self {
            brand_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            user: None,
        }
    }
}

impl HelpLane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the brand token, and the API base URL when one is given.
    pub fn configure(&mut self, brand_token: impl Into<String>, base_url: Option<String>) {
        self.brand_token = Some(brand_token.into());
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
    }

    /// Replace the current user.
    pub fn identify(&mut self, user: HelpLaneUser) {
        self.user = Some(user);
    }

    pub fn clear_user(&mut self) {
        self.user = None;
    }

    pub fn brand_token(&self) -> Option<&str> {
        self.brand_token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn current_user(&self) -> Option<&HelpLaneUser> {
        self.user.as_ref()
    }

    /// Snapshot the current configuration into a chat screen, or `None` if no
    /// brand token has been configured.
    pub fn chat_screen(&self) -> Option<ChatScreen> {
        let brand_token = self.brand_token.clone()?;
        Some(ChatScreen::new(
            brand_token,
            self.base_url.clone(),
            self.user.clone(),
        ))
    }

    /// Present the chat widget. Without a brand token this only logs.
    pub async fn show(
        &self,
        surface: &dyn PresentingSurface,
        style: Option<PresentationStyle>,
    ) -> Result<(), SdkError> {
        let Some(mut screen) = self.chat_screen() else {
            error!("SDK not configured. Call HelpLane::configure first.");
            return Ok(());
        };
        let request = screen.load()?;
        let style = style.unwrap_or_default();
        info!(base_url = %self.base_url, ?style, identified = self.user.is_some(), "presenting chat");
        surface.present(screen, request, style).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{LoadRequest, LoadState};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSurface {
        presented: Mutex<Vec<(ChatScreen, LoadRequest, PresentationStyle)>>,
    }

    #[async_trait]
    impl PresentingSurface for RecordingSurface {
        async fn present(
            &self,
            screen: ChatScreen,
            request: LoadRequest,
            style: PresentationStyle,
        ) -> Result<(), SdkError> {
            self.presented.lock().unwrap().push((screen, request, style));
            Ok(())
        }
    }

    struct BrokenSurface;

    #[async_trait]
    impl PresentingSurface for BrokenSurface {
        async fn present(
            &self,
            _: ChatScreen,
            _: LoadRequest,
            _: PresentationStyle,
        ) -> Result<(), SdkError> {
            Err(SdkError::Surface("no window".into()))
        }
    }

    #[test]
    fn default_base_url_kept_without_override() {
        let mut sdk = HelpLane::new();
        sdk.configure("brand-a", None);
        assert_eq!(sdk.base_url(), DEFAULT_BASE_URL);
        assert_eq!(sdk.brand_token(), Some("brand-a"));

        sdk.configure("brand-b", Some("https://eu.helplane.io".into()));
        assert_eq!(sdk.base_url(), "https://eu.helplane.io");
        sdk.configure("brand-c", None);
        assert_eq!(sdk.base_url(), "https://eu.helplane.io");
        assert_eq!(sdk.brand_token(), Some("brand-c"));
    }

    #[test]
    fn configure_accepts_empty_token() {
        let mut sdk = HelpLane::new();
        sdk.configure("", None);
        assert_eq!(sdk.brand_token(), Some(""));
    }

    #[test]
    fn identify_replaces_and_clear_removes() {
        let mut sdk = HelpLane::new();
        sdk.identify(HelpLaneUser::new().with_email("a@example.com").with_tier("pro"));
        sdk.identify(HelpLaneUser::new().with_name("Bea"));
        let user = sdk.current_user().unwrap();
        assert_eq!(user.name.as_deref(), Some("Bea"));
        assert!(user.email.is_none());
        assert!(user.tier.is_none());

        sdk.clear_user();
        assert!(sdk.current_user().is_none());
    }

    #[tokio::test]
    async fn show_without_token_only_logs() {
        let (logs, _guard) = crate::test_support::capture_logs();
        let sdk = HelpLane::new();
        let surface = RecordingSurface::default();
        sdk.show(&surface, None).await.unwrap();
        assert!(surface.presented.lock().unwrap().is_empty());
        let out = logs.contents();
        assert!(
            out.contains("ERROR") && out.contains("SDK not configured. Call HelpLane::configure first."),
            "{out}"
        );
        assert!(!out.contains("presenting chat"), "{out}");
    }

    #[tokio::test]
    async fn show_presents_configured_screen() {
        let mut sdk = HelpLane::new();
        sdk.configure("brand-x", None);
        sdk.identify(HelpLaneUser::new().with_user_id("42"));
        let surface = RecordingSurface::default();
        sdk.show(&surface, Some(PresentationStyle::PageSheet))
            .await
            .unwrap();
        sdk.show(&surface, None).await.unwrap();

        let presented = surface.presented.lock().unwrap();
        assert_eq!(presented.len(), 2);
        assert_eq!(presented[0].2, PresentationStyle::PageSheet);
        assert_eq!(presented[1].2, PresentationStyle::FullScreen);
        let (screen, request, _) = &presented[0];
        assert_eq!(screen.state(), LoadState::Loading);
        assert!(screen.is_loading());
        assert!(request.html.contains(r#""brandToken":"brand-x""#));
        assert!(request.html.contains(r#""userID":"42""#));
    }

    #[tokio::test]
    async fn surface_errors_propagate() {
        let mut sdk = HelpLane::new();
        sdk.configure("brand-x", None);
        let err = sdk.show(&BrokenSurface, None).await.unwrap_err();
        assert!(matches!(err, SdkError::Surface(_)));
    }
}
