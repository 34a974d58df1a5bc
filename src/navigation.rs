use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationKind {
    LinkActivated,
    FormSubmitted,
    BackForward,
    Reload,
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NavigationAction {
    #[serde(default = "link_activated")]
    pub kind: NavigationKind,
    pub url: Option<Url>,
}

fn link_activated() -> NavigationKind {
    NavigationKind::LinkActivated
}

impl NavigationAction {
    pub fn link(url: Url) -> Self {
        Self {
            kind: NavigationKind::LinkActivated,
            url: Some(url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "url", rename_all = "snake_case")]
pub enum NavigationDecision {
    Allow,
    /// Cancel in the surface and hand the URL to the system handler.
    OpenExternally(Url),
}

/// Keeps the chat on the widget host and pushes every other clicked link out
/// to the system browser.
#[derive(Debug, Clone)]
pub struct NavigationPolicy {
    base_host: Option<String>,
}

impl NavigationPolicy {
    pub fn for_base_url(base_url: &str) -> Self {
        let base_host = Url::parse(base_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_owned));
        if base_host.is_none() {
            tracing::warn!(%base_url, "base url has no host; every clicked link will open externally");
        }
        Self { base_host }
    }

    pub fn decide(&self, action: &NavigationAction) -> NavigationDecision {
        if action.kind != NavigationKind::LinkActivated {
            return NavigationDecision::Allow;
        }
        let Some(url) = &action.url else {
            return NavigationDecision::Allow;
        };
        if url.host_str() != self.base_host.as_deref() {
            tracing::debug!(%url, "opening link outside the chat surface");
            return NavigationDecision::OpenExternally(url.clone());
        }
        NavigationDecision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn same_host_links_stay_in_surface() {
        let policy = NavigationPolicy::for_base_url("https://api.helplane.io");
        let action = NavigationAction::link(url("https://api.helplane.io/conversations/42"));
        assert_eq!(policy.decide(&action), NavigationDecision::Allow);
    }

    #[test]
    fn foreign_links_open_externally() {
        let policy = NavigationPolicy::for_base_url("https://api.helplane.io");
        let target = url("https://docs.example.com/faq");
        assert_eq!(
            policy.decide(&NavigationAction::link(target.clone())),
            NavigationDecision::OpenExternally(target)
        );
        let mail = url("mailto:help@example.com");
        assert_eq!(
            policy.decide(&NavigationAction::link(mail.clone())),
            NavigationDecision::OpenExternally(mail)
        );
    }

    #[test]
    fn non_link_navigation_is_allowed() {
        let policy = NavigationPolicy::for_base_url("https://api.helplane.io");
        let action = NavigationAction {
            kind: NavigationKind::Other,
            url: Some(url("https://cdn.example.net/asset.js")),
        };
        assert_eq!(policy.decide(&action), NavigationDecision::Allow);
    }

    #[test]
    fn ports_do_not_matter() {
        let policy = NavigationPolicy::for_base_url("http://localhost:3000");
        let action = NavigationAction::link(url("http://localhost:4000/x"));
        assert_eq!(policy.decide(&action), NavigationDecision::Allow);
    }

    #[test]
    fn unparsable_base_sends_links_out() {
        let policy = NavigationPolicy::for_base_url("not a url");
        let target = url("https://api.helplane.io/");
        assert_eq!(
            policy.decide(&NavigationAction::link(target.clone())),
            NavigationDecision::OpenExternally(target)
        );
    }
}
