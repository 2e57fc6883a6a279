//! Skill store records and install status.

use serde::{Deserialize, Serialize};

/// A skill offered by the store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreSkill {
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub desc: String,
}

impl StoreSkill {
    /// Cart entry for this skill.
    #[must_use]
    pub fn reference(&self) -> SkillRef {
        SkillRef {
            skill: self.name.clone(),
            author: self.author.clone(),
        }
    }
}

/// Entry of the install cart, as posted to `/skills/installSkills/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillRef {
    pub skill: String,
    pub author: String,
}

/// Status reported by `/skills/checkInstallStatus/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStatus {
    Installed,
    Updated,
    Failed,
    Unknown,
    /// Any other in-progress status, e.g. `downloading`.
    Pending(String),
}

impl InstallStatus {
    /// Whether polling should stop on this status without success.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::Unknown)
    }
}

impl From<&str> for InstallStatus {
    fn from(value: &str) -> Self {
        match value.trim().trim_matches('"') {
            "installed" => Self::Installed,
            "updated" => Self::Updated,
            "failed" => Self::Failed,
            "unknown" => Self::Unknown,
            other => Self::Pending(other.to_string()),
        }
    }
}

/// Per-skill actions that post `id = "{action}_{skill}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillAction {
    Toggle,
    Update,
    Delete,
    Reload,
}

impl SkillAction {
    /// Endpoint under `/skills/`.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Toggle => "toggleSkill",
            Self::Update => "updateSkill",
            Self::Delete => "deleteSkill",
            Self::Reload => "reloadSkill",
        }
    }

    /// Form `id` value identifying the skill.
    #[must_use]
    pub fn form_id(self, skill: &str) -> String {
        let prefix = match self {
            Self::Toggle => "toggle",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Reload => "reload",
        };
        format!("{prefix}_{skill}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_install_status() {
        assert_eq!(InstallStatus::from("installed"), InstallStatus::Installed);
        assert_eq!(InstallStatus::from("\"updated\""), InstallStatus::Updated);
        assert!(InstallStatus::from("unknown").is_failure());
        assert_eq!(
            InstallStatus::from("downloading"),
            InstallStatus::Pending("downloading".to_string())
        );
    }

    #[test]
    fn should_build_action_form_ids() {
        assert_eq!(SkillAction::Toggle.form_id("Weather"), "toggle_Weather");
        assert_eq!(SkillAction::Reload.endpoint(), "reloadSkill");
    }

    #[test]
    fn should_build_cart_entry_from_store_skill() {
        let skill: StoreSkill =
            serde_json::from_str(r#"{"name": "Weather", "author": "Psycho"}"#).unwrap();
        assert_eq!(
            skill.reference(),
            SkillRef {
                skill: "Weather".to_string(),
                author: "Psycho".to_string()
            }
        );
    }
}
