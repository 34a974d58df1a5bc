use crate::error::SdkError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity attached to chat sessions. Every field is optional; only the
/// fields that are set reach the widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HelpLaneUser {
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    /// Plan or tier, e.g. "free", "pro", "enterprise".
    pub tier: Option<String>,
    meta: Option<Map<String, Value>>,
}

impl HelpLaneUser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_tier(mut self, tier: impl Into<String>) -> Self {
        self.tier = Some(tier.into());
        self
    }

    /// Attach custom metadata. The value is converted to JSON here so a bad
    /// payload is rejected when it is supplied rather than when the widget
    /// document is rendered.
    pub fn with_meta<T: Serialize>(mut self, meta: &T) -> Result<Self, SdkError> {
        let value = serde_json::to_value(meta).map_err(SdkError::InvalidMeta)?;
        match value {
            Value::Object(map) => {
                self.meta = Some(map);
                Ok(self)
            }
            other => Err(SdkError::MetaNotObject(json_kind(&other))),
        }
    }

    pub fn meta(&self) -> Option<&Map<String, Value>> {
        self.meta.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.user_id.is_none()
            && self.email.is_none()
            && self.name.is_none()
            && self.phone.is_none()
            && self.tier.is_none()
            && self.meta.is_none()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn meta_accepts_maps_and_structs() {
        let mut meta = HashMap::new();
        meta.insert("plan_seats", 12);
        let user = HelpLaneUser::new().with_meta(&meta).unwrap();
        assert_eq!(user.meta().unwrap()["plan_seats"], json!(12));

        #[derive(Serialize)]
        struct Account {
            company: &'static str,
            trial: bool,
        }
        let user = HelpLaneUser::new()
            .with_meta(&Account {
                company: "Acme",
                trial: true,
            })
            .unwrap();
        assert_eq!(
            Value::Object(user.meta().cloned().unwrap()),
            json!({"company": "Acme", "trial": true})
        );
    }

    #[test]
    fn meta_rejects_non_objects() {
        let err = HelpLaneUser::new().with_meta(&vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, SdkError::MetaNotObject("array")));
        let err = HelpLaneUser::new().with_meta(&"plain").unwrap_err();
        assert!(matches!(err, SdkError::MetaNotObject("string")));
    }

    #[test]
    fn meta_rejects_unserializable_keys() {
        let mut meta = BTreeMap::new();
        meta.insert((1, 2), "tuple keys are not valid JSON object keys");
        let err = HelpLaneUser::new().with_meta(&meta).unwrap_err();
        assert!(matches!(err, SdkError::InvalidMeta(_)));
    }

    #[test]
    fn builder_sets_fields() {
        let user = HelpLaneUser::new()
            .with_user_id("u-1")
            .with_email("jo@example.com")
            .with_tier("pro");
        assert_eq!(user.user_id.as_deref(), Some("u-1"));
        assert_eq!(user.email.as_deref(), Some("jo@example.com"));
        assert_eq!(user.tier.as_deref(), Some("pro"));
        assert!(user.name.is_none());
        assert!(!user.is_empty());
        assert!(HelpLaneUser::new().is_empty());
    }
}
