use async_graphql::{Enum, SimpleObject};
use serde::Serialize;

#[derive(Enum, Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

/// One-shot notice shown after a mutation.
#[derive(SimpleObject, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
    /// Page the form flow returns to, if not the home page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
            redirect_to: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
            redirect_to: None,
        }
    }

    pub fn with_redirect(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = Some(path.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.level == FlashLevel::Success
    }
}

/// Home page view, optionally carrying the notice from the last mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomePage {
    pub flash: Option<Flash>,
}

impl From<Flash> for HomePage {
    fn from(flash: Flash) -> Self {
        Self { flash: Some(flash) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_redirect_keeps_notice() {
        let flash = Flash::success("Venue successfully edited").with_redirect("/venues/3");

        assert!(flash.is_success());
        assert_eq!(flash.message, "Venue successfully edited");
        assert_eq!(flash.redirect_to.as_deref(), Some("/venues/3"));
    }

    #[test]
    fn test_redirect_only_serialized_when_set() {
        let plain = serde_json::to_value(Flash::error("nope")).unwrap();
        assert_eq!(plain, serde_json::json!({ "level": "error", "message": "nope" }));

        let redirected = serde_json::to_value(Flash::error("nope").with_redirect("/artists/1")).unwrap();
        assert_eq!(redirected["redirect_to"], "/artists/1");
    }
}
