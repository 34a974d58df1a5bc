use crate::chat::{ChatScreen, LoadRequest};
use crate::error::SdkError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationStyle {
    #[default]
    FullScreen,
    PageSheet,
    FormSheet,
    OverFullScreen,
    Automatic,
}

impl FromStr for PresentationStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "full_screen" | "fullscreen" => Ok(Self::FullScreen),
            "page_sheet" => Ok(Self::PageSheet),
            "form_sheet" => Ok(Self::FormSheet),
            "over_full_screen" => Ok(Self::OverFullScreen),
            "automatic" => Ok(Self::Automatic),
            other => Err(format!("unknown presentation style: {other}")),
        }
    }
}

/// Anything that can render a chat screen: a native web view, the HTTP
/// preview surface, or a test double. `request` is the screen's first load,
/// already started; the surface reports its outcome back to the screen.
#[async_trait]
pub trait PresentingSurface: Send + Sync {
    async fn present(
        &self,
        screen: ChatScreen,
        request: LoadRequest,
        style: PresentationStyle,
    ) -> Result<(), SdkError>;
}
