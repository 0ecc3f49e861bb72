use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Applicant profile and filter preferences.
///
/// Stored as JSON, usually generated once from `WBM_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BotConfig {
    pub first_name: String,
    pub last_name: String,
    /// `m` or `f`
    #[serde(default = "BotConfig::default_sex")]
    pub sex: String,
    pub emails: Vec<String>,

    pub street: String,
    pub zip_code: String,
    pub city: String,
    pub phone: String,

    /// Whether the applicant holds a WBS
    #[serde(default)]
    pub wbs: bool,
    /// DD/MM/YYYY
    #[serde(default)]
    pub wbs_date: Option<String>,
    #[serde(default)]
    pub wbs_num: Option<String>,
    #[serde(default = "BotConfig::default_wbs_rooms")]
    pub wbs_rooms: String,
    #[serde(default)]
    pub wbs_special_housing_needs: bool,

    /// Lower-cased keywords; a listing mentioning any of them is skipped
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default = "BotConfig::default_rent_below")]
    pub flat_rent_below: f64,
    #[serde(default)]
    pub flat_size_above: f64,
    #[serde(default)]
    pub flat_rooms_above: u32,

    #[serde(default)]
    pub discord_notifications: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications_email: Option<String>,
}

impl BotConfig {
    fn default_sex() -> String {
        "m".to_string()
    }

    fn default_wbs_rooms() -> String {
        "1".to_string()
    }

    fn default_rent_below() -> f64 {
        800.0
    }

    /// Load a config previously written by [`BotConfig::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write pretty JSON, creating the parent directory if needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Build the config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = EnvReader { lookup };

        Ok(Self {
            first_name: env.required("WBM_FIRST_NAME")?,
            last_name: env.required("WBM_LAST_NAME")?,
            sex: env.or("WBM_SEX", "m"),
            emails: split_list(&env.required("WBM_EMAILS")?),

            street: env.required("WBM_STREET")?,
            zip_code: env.required("WBM_ZIP_CODE")?,
            city: env.required("WBM_CITY")?,
            phone: env.required("WBM_PHONE")?,

            wbs: parse_bool(&env.or("WBM_WBS", "no")),
            wbs_date: env.optional("WBM_WBS_DATE"),
            wbs_num: env.optional("WBM_WBS_NUM"),
            wbs_rooms: env.or("WBM_WBS_ROOMS", "1"),
            wbs_special_housing_needs: parse_bool(&env.or("WBM_WBS_SPECIAL_HOUSING_NEEDS", "no")),

            exclude: split_list(&env.or("WBM_EXCLUDE", ""))
                .into_iter()
                .map(|keyword| keyword.to_lowercase())
                .collect(),
            flat_rent_below: env.number("WBM_FLAT_RENT_BELOW", "800")?,
            flat_size_above: env.number("WBM_FLAT_SIZE_ABOVE", "0")?,
            flat_rooms_above: env.number("WBM_FLAT_ROOMS_ABOVE", "0")?,

            discord_notifications: parse_bool(&env.or("WBM_DISCORD_NOTIFICATIONS", "false")),
            notifications_email: env.optional("WBM_NOTIFICATIONS_EMAIL"),
        })
    }
}

struct EnvReader<F> {
    lookup: F,
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.optional(key).ok_or(ConfigError::MissingVar(key))
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    fn number<T: std::str::FromStr>(&self, key: &'static str, default: &str) -> Result<T, ConfigError> {
        let value = self.or(key, default);
        value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value })
    }
}

/// Comma separated list, trimmed, empty entries dropped
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "yes" | "true" | "1" | "on"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn required_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("WBM_FIRST_NAME", "Erika"),
            ("WBM_LAST_NAME", "Mustermann"),
            ("WBM_EMAILS", "erika@example.org, , second@example.org"),
            ("WBM_STREET", "Heidestr. 17"),
            ("WBM_ZIP_CODE", "51147"),
            ("WBM_CITY", "Köln"),
            ("WBM_PHONE", "0123456"),
        ])
    }

    fn from_map(vars: &HashMap<&'static str, &'static str>) -> Result<BotConfig, ConfigError> {
        BotConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn defaults_apply_for_optional_vars() {
        let config = from_map(&required_vars()).unwrap();

        assert_eq!(config.emails, vec!["erika@example.org", "second@example.org"]);
        assert_eq!(config.sex, "m");
        assert!(!config.wbs);
        assert_eq!(config.wbs_rooms, "1");
        assert!(config.exclude.is_empty());
        assert_eq!(config.flat_rent_below, 800.0);
        assert_eq!(config.flat_size_above, 0.0);
        assert_eq!(config.flat_rooms_above, 0);
        assert!(!config.discord_notifications);
        assert_eq!(config.notifications_email, None);
    }

    #[test]
    fn parses_lists_and_flags() {
        let mut vars = required_vars();
        vars.insert("WBM_EXCLUDE", "Senioren, WBS ,Dachgeschoss");
        vars.insert("WBM_WBS", "Yes");
        vars.insert("WBM_DISCORD_NOTIFICATIONS", "on");
        vars.insert("WBM_FLAT_RENT_BELOW", "1200.5");
        vars.insert("WBM_FLAT_ROOMS_ABOVE", "2");

        let config = from_map(&vars).unwrap();

        assert_eq!(config.exclude, vec!["senioren", "wbs", "dachgeschoss"]);
        assert!(config.wbs);
        assert!(config.discord_notifications);
        assert_eq!(config.flat_rent_below, 1200.5);
        assert_eq!(config.flat_rooms_above, 2);
    }

    #[test]
    fn missing_required_var_is_reported() {
        let mut vars = required_vars();
        vars.remove("WBM_PHONE");

        let err = from_map(&vars).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("WBM_PHONE")));
    }

    #[test]
    fn invalid_threshold_is_reported() {
        let mut vars = required_vars();
        vars.insert("WBM_FLAT_SIZE_ABOVE", "big");

        let err = from_map(&vars).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "WBM_FLAT_SIZE_ABOVE", .. }
        ));
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configs").join("wbm_config.json");
        let config = from_map(&required_vars()).unwrap();

        config.save(&path).unwrap();
        assert_eq!(BotConfig::load(&path).unwrap(), config);
    }
}
