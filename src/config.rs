use crate::surface::PresentationStyle;
use crate::user::HelpLaneUser;
use anyhow::Context;
use std::net::SocketAddr;

/// Runtime configuration for the preview host.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub brand_token: Option<String>,
    pub base_url: Option<String>,
    pub user: Option<HelpLaneUser>,
    pub style: PresentationStyle,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr: SocketAddr = lookup("BIND_ADDR")
            .unwrap_or_else(|| "127.0.0.1:8787".to_string())
            .parse()
            .context("failed to parse BIND_ADDR")?;

        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let brand_token = non_empty("HELPLANE_BRAND_TOKEN");
        let base_url = non_empty("HELPLANE_BASE_URL");

        let style = match non_empty("HELPLANE_STYLE") {
            Some(raw) => raw
                .parse()
                .map_err(anyhow::Error::msg)
                .context("failed to parse HELPLANE_STYLE")?,
            None => PresentationStyle::default(),
        };

        let mut user = HelpLaneUser::new();
        if let Some(v) = non_empty("HELPLANE_USER_ID") {
            user = user.with_user_id(v);
        }
        if let Some(v) = non_empty("HELPLANE_USER_EMAIL") {
            user = user.with_email(v);
        }
        if let Some(v) = non_empty("HELPLANE_USER_NAME") {
            user = user.with_name(v);
        }
        if let Some(v) = non_empty("HELPLANE_USER_PHONE") {
            user = user.with_phone(v);
        }
        if let Some(v) = non_empty("HELPLANE_USER_TIER") {
            user = user.with_tier(v);
        }
        if let Some(raw) = non_empty("HELPLANE_USER_META") {
            let meta: serde_json::Value =
                serde_json::from_str(&raw).context("HELPLANE_USER_META is not valid JSON")?;
            user = user
                .with_meta(&meta)
                .context("HELPLANE_USER_META rejected")?;
        }
        let user = (!user.is_empty()).then_some(user);

        Ok(Self {
            bind_addr,
            brand_token,
            base_url,
            user,
            style,
        })
    }
}
