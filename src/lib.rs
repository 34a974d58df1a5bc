//! HelpLane chat SDK.
//!
//! Configure a [`HelpLane`] with a brand token, optionally identify the user,
//! then [`HelpLane::show`] the chat on a [`PresentingSurface`]. The widget
//! itself is hosted remotely; this crate builds the document that boots it in
//! embedded mode. [`push`] correlates push payloads with HelpLane contacts.

pub mod chat;
pub mod config;
pub mod error;
pub mod helplane;
pub mod navigation;
pub mod push;
pub mod server;
pub mod settings;
pub mod surface;
pub mod user;
pub mod widget;

#[cfg(test)]
mod test_support;

pub use chat::{ChatScreen, ErrorPrompt, LoadFailure, LoadRequest, LoadState, PromptAction};
pub use error::SdkError;
pub use helplane::{DEFAULT_BASE_URL, HelpLane};
pub use navigation::{NavigationAction, NavigationDecision, NavigationPolicy};
pub use push::{PushCorrelation, PushEvent, PushEventSink};
pub use server::HttpSurface;
pub use surface::{PresentationStyle, PresentingSurface};
pub use user::HelpLaneUser;
