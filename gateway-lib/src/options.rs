//! Optional upload form fields

use serde::Deserialize;
use serde::Serialize;

/// Optional fields sent alongside the file.
///
/// Only fields that are set are added to the form.
///
/// # Example
///
/// ```
/// use gateway_lib::UploadOptions;
///
/// let options = UploadOptions::new()
///     .user_id("alice")
///     .save_to_memory(true);
/// assert_eq!(options.form_fields().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_to_memory: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

impl UploadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn privacy_level(mut self, level: impl Into<String>) -> Self {
        self.privacy_level = Some(level.into());
        self
    }

    pub fn save_to_memory(mut self, save: bool) -> Self {
        self.save_to_memory = Some(save);
        self
    }

    pub fn conversation_id(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }

    /// The set fields as `(name, value)` form pairs, in a stable order.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(user_id) = &self.user_id {
            fields.push(("user_id", user_id.clone()));
        }
        if let Some(level) = &self.privacy_level {
            fields.push(("privacy_level", level.clone()));
        }
        if let Some(save) = self.save_to_memory {
            fields.push(("save_to_memory", save.to_string()));
        }
        if let Some(conversation_id) = &self.conversation_id {
            fields.push(("conversation_id", conversation_id.clone()));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_options_have_no_fields() {
        assert!(UploadOptions::new().form_fields().is_empty());
    }

    #[test]
    fn test_all_fields_in_order() {
        let options = UploadOptions::new()
            .conversation_id("c-1")
            .save_to_memory(false)
            .privacy_level("private")
            .user_id("u-1");
        assert_eq!(
            options.form_fields(),
            vec![
                ("user_id", "u-1".to_string()),
                ("privacy_level", "private".to_string()),
                ("save_to_memory", "false".to_string()),
                ("conversation_id", "c-1".to_string()),
            ]
        );
    }
}
