// Application settings
// Loaded from ~/.config/jdhub/settings.toml (override with JDHUB_CONFIG)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "JDHUB_CONFIG";

/// Template download settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Output file name when `-o` is not given
    pub file_name: String,

    /// Sample-row names used when the reference snapshot has none
    pub location: String,
    pub department: String,
    pub team: String,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            file_name: "user_import_template.xlsx".into(),
            location: "Back Office".into(),
            department: "IT".into(),
            team: "Development".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Reference snapshot used when neither `--reference` nor
    /// `JDHUB_REFERENCE` is set. Relative paths resolve against the
    /// settings file's directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_path: Option<PathBuf>,

    pub template: TemplateSettings,
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jdhub")
            .join("settings.toml")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`. A missing file is silent; an unreadable or
    /// malformed one is logged and replaced by defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Self::default();
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read settings, using defaults");
                return Self::default();
            }
        };

        match Self::from_toml(&contents) {
            Ok(mut settings) => {
                settings.resolve_relative(path.parent());
                settings
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    fn resolve_relative(&mut self, base: Option<&Path>) {
        if let (Some(path), Some(base)) = (&self.reference_path, base) {
            if path.is_relative() {
                self.reference_path = Some(base.join(path));
            }
        }
    }

    /// Get the config file path for display
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.template.file_name, "user_import_template.xlsx");
        assert_eq!(settings.template.team, "Development");
        assert!(settings.reference_path.is_none());
    }

    #[test]
    fn partial_template_table_keeps_other_defaults() {
        let settings = Settings::from_toml(
            r#"
            reference_path = "/srv/jdhub/reference.json"

            [template]
            location = "Head Office"
            "#,
        )
        .unwrap();
        assert_eq!(settings.reference_path, Some(PathBuf::from("/srv/jdhub/reference.json")));
        assert_eq!(settings.template.location, "Head Office");
        assert_eq!(settings.template.department, "IT");
    }

    #[test]
    fn malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "reference_path = [").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load_from(&dir.path().join("nope.toml")), Settings::default());
    }

    #[test]
    fn relative_reference_resolves_against_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "reference_path = \"reference.json\"\n").unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.reference_path, Some(dir.path().join("reference.json")));
    }
}
