//! Per-directory project settings.
//!
//! The project file is a plain `KEY: value` list, one pair per line. Blank
//! lines and lines starting with `#` are skipped. Keys are trimmed and
//! upper-cased, and only keys from the caller's recognized set are kept.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Key naming the project to track time against. Required.
pub const PROJECT_KEY: &str = "PROJECT";
/// Key naming the client that owns the project. Optional.
pub const CLIENT_KEY: &str = "CLIENT";

/// Keys understood in a project file.
pub const RECOGNIZED_KEYS: &[&str] = &[PROJECT_KEY, CLIENT_KEY];

/// Errors raised while reading project settings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// A non-comment line had no `:` between key and value.
    #[error("line {line} is missing a ':' separator: {content:?}")]
    MissingSeparator { line: usize, content: String },
    /// A required key was absent or had an empty value.
    #[error("required setting {key} is missing")]
    MissingKey { key: &'static str },
}

/// Parses `KEY: value` lines, keeping only keys listed in `recognized`.
///
/// The value is everything after the first colon, trimmed, so values may
/// themselves contain colons. Later lines overwrite earlier ones.
pub fn parse_settings(
    text: &str,
    recognized: &[&str],
) -> Result<BTreeMap<String, String>, SettingsError> {
    let mut settings = BTreeMap::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            return Err(SettingsError::MissingSeparator {
                line: idx + 1,
                content: line.to_string(),
            });
        };

        let key = key.trim().to_uppercase();
        if recognized.contains(&key.as_str()) {
            settings.insert(key, value.trim().to_string());
        } else {
            tracing::debug!(%key, line = idx + 1, "ignoring unrecognized setting");
        }
    }
    Ok(settings)
}

/// The project (and optional client) a timer is tracked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSettings {
    pub project: String,
    pub client: Option<String>,
}

impl ProjectSettings {
    /// Parses a project file's contents.
    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        Self::from_map(&parse_settings(text, RECOGNIZED_KEYS)?)
    }

    /// Builds settings from an already-parsed key map.
    ///
    /// An empty `CLIENT` value is treated as no client.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, SettingsError> {
        let project = map
            .get(PROJECT_KEY)
            .filter(|value| !value.is_empty())
            .cloned()
            .ok_or(SettingsError::MissingKey { key: PROJECT_KEY })?;
        let client = map.get(CLIENT_KEY).filter(|value| !value.is_empty()).cloned();
        Ok(Self { project, client })
    }

    /// The `"<client> - <project>"` string the API exposes as
    /// `client_project_name`, if a client is configured.
    pub fn composite_name(&self) -> Option<String> {
        self.client
            .as_ref()
            .map(|client| format!("{client} - {}", self.project))
    }
}

impl fmt::Display for ProjectSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.client {
            Some(client) => write!(f, "project {} under the client {client}", self.project),
            None => write!(f, "project {}", self.project),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let text = "# my project\n\nPROJECT: Website\n   \n# CLIENT: Nope\n";
        let map = parse_settings(text, RECOGNIZED_KEYS).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["PROJECT"], "Website");
    }

    #[test]
    fn parse_uppercases_keys_and_trims_values() {
        let text = "  project :   Website  \nclient:Acme";
        let settings = ProjectSettings::parse(text).unwrap();
        assert_eq!(settings.project, "Website");
        assert_eq!(settings.client.as_deref(), Some("Acme"));
    }

    #[test]
    fn parse_drops_unrecognized_keys() {
        let map = parse_settings("PROJECT: Website\nCOLOR: blue", RECOGNIZED_KEYS).unwrap();
        assert!(!map.contains_key("COLOR"));
    }

    #[test]
    fn parse_keeps_colons_inside_values() {
        let settings = ProjectSettings::parse("PROJECT: Ops: on-call").unwrap();
        assert_eq!(settings.project, "Ops: on-call");
    }

    #[test]
    fn parse_rejects_line_without_separator() {
        let err = ProjectSettings::parse("PROJECT: Website\nCLIENT Acme").unwrap_err();
        assert_eq!(
            err,
            SettingsError::MissingSeparator {
                line: 2,
                content: "CLIENT Acme".to_string(),
            }
        );
    }

    #[test]
    fn missing_project_is_an_error() {
        let err = ProjectSettings::parse("CLIENT: Acme").unwrap_err();
        assert_eq!(err, SettingsError::MissingKey { key: PROJECT_KEY });
    }

    #[test]
    fn empty_project_is_an_error() {
        let err = ProjectSettings::parse("PROJECT:").unwrap_err();
        assert_eq!(err, SettingsError::MissingKey { key: PROJECT_KEY });
    }

    #[test]
    fn empty_client_means_no_client() {
        let settings = ProjectSettings::parse("PROJECT: Website\nCLIENT:  ").unwrap();
        assert_eq!(settings.client, None);
        assert_eq!(settings.composite_name(), None);
    }

    #[test]
    fn composite_name_joins_client_and_project() {
        let settings = ProjectSettings {
            project: "Website".to_string(),
            client: Some("Acme".to_string()),
        };
        assert_eq!(settings.composite_name().as_deref(), Some("Acme - Website"));
    }

    #[test]
    fn display_names_client_when_present() {
        let settings = ProjectSettings {
            project: "Website".to_string(),
            client: Some("Acme".to_string()),
        };
        assert_eq!(
            settings.to_string(),
            "project Website under the client Acme"
        );
    }
}
