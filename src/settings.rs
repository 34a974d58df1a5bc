use crate::error::SdkError;
use crate::user::HelpLaneUser;
use serde::Serialize;
use serde_json::{Map, Value};

/// Object assigned to `window.HelpLaneSettings` before the widget client loads.
/// User keys are only emitted when the field is set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSettings<'a> {
    pub brand_token: &'a str,
    pub base_url: &'a str,
    pub embedded: bool,
    #[serde(rename = "userID", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<&'a Map<String, Value>>,
}

impl<'a> WidgetSettings<'a> {
    pub fn new(brand_token: &'a str, base_url: &'a str, user: Option<&'a HelpLaneUser>) -> Self {
        Self {
            brand_token,
            base_url,
            embedded: true,
            user_id: user.and_then(|u| u.user_id.as_deref()),
            email: user.and_then(|u| u.email.as_deref()),
            name: user.and_then(|u| u.name.as_deref()),
            phone: user.and_then(|u| u.phone.as_deref()),
            tier: user.and_then(|u| u.tier.as_deref()),
            meta: user.and_then(|u| u.meta()),
        }
    }

    pub fn to_json(&self) -> Result<String, SdkError> {
        Ok(serde_json::to_string(self)?)
    }
}
