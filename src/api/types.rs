use serde::{Deserialize, Serialize};

/// Longest multi-select label before truncation.
pub const MAX_LABEL_LEN: usize = 80;

/// A repository owned by (or accessible to) the authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "private", default)]
    pub is_private: bool,
    #[serde(rename = "html_url", default)]
    pub url: String,
}

impl Repository {
    pub fn visibility(&self) -> &'static str {
        if self.is_private {
            "Private"
        } else {
            "Public"
        }
    }

    /// Label shown in the selection list: `name (Visibility) - description`.
    pub fn label(&self) -> String {
        let description = self
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or("No description");
        let label = format!("{} ({}) - {}", self.name, self.visibility(), description);
        truncate_label(&label, MAX_LABEL_LEN)
    }
}

fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let kept: String = label.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// The account the access token belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub login: String,
    #[serde(rename = "name", default)]
    pub display_name: Option<String>,
}

impl Identity {
    /// Display name when set, login otherwise.
    pub fn display(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.login)
    }
}
