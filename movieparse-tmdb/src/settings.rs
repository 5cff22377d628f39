use std::path::PathBuf;

use movieparse_core::ConfigError;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Everything needed to talk to TMDB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmdbSettings {
    pub api_key: String,
    pub language: String,
    pub base_url: String,
}

/// Values given on the command line. These beat every other source.
#[derive(Debug, Clone, Default)]
pub struct SettingOverrides {
    pub api_key: Option<String>,
    pub language: Option<String>,
}

/// Where a setting's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingSource {
    /// Passed as a command-line flag.
    CommandLine,
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Built-in default value.
    Default,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for SettingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CommandLine => write!(f, "command line"),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each setting.
#[derive(Debug)]
pub struct SettingSources {
    pub api_key: SettingSource,
    pub language: SettingSource,
    pub base_url: SettingSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    tmdb: Option<TmdbConfig>,
}

/// The `[tmdb]` table of the config file.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
pub struct TmdbConfig {
    pub api_key: Option<String>,
    pub language: Option<String>,
    pub base_url: Option<String>,
}

impl TmdbSettings {
    /// Load settings from overrides, the environment and the config file.
    ///
    /// Priority: command line > env vars > config file > defaults.
    /// Required: api_key.
    pub fn load(overrides: SettingOverrides) -> Result<Self, ConfigError> {
        let env_key = std::env::var(API_KEY_ENV).ok();
        Self::resolve(overrides, env_key, load_config_file())
    }

    /// Merge explicit sources. Empty strings count as unset.
    pub fn resolve(
        overrides: SettingOverrides,
        env_key: Option<String>,
        config: Option<TmdbConfig>,
    ) -> Result<Self, ConfigError> {
        let config = config.unwrap_or_default();

        let api_key = non_empty(overrides.api_key)
            .or_else(|| non_empty(env_key))
            .or_else(|| non_empty(config.api_key))
            .ok_or_else(|| ConfigError::MissingApiKey(config_path_display()))?;

        let language = non_empty(overrides.language)
            .or_else(|| non_empty(config.language))
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        let base_url = non_empty(config.base_url)
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            language,
            base_url,
        })
    }
}

/// Determine where each setting is coming from.
pub fn setting_sources(
    overrides: &SettingOverrides,
    env_key: Option<&str>,
    config: Option<&TmdbConfig>,
) -> SettingSources {
    let is_set = |v: Option<&String>| v.is_some_and(|s| !s.trim().is_empty());

    let api_key = if is_set(overrides.api_key.as_ref()) {
        SettingSource::CommandLine
    } else if env_key.is_some_and(|k| !k.trim().is_empty()) {
        SettingSource::EnvVar(API_KEY_ENV)
    } else if is_set(config.and_then(|c| c.api_key.as_ref())) {
        SettingSource::ConfigFile
    } else {
        SettingSource::Missing
    };

    let language = if is_set(overrides.language.as_ref()) {
        SettingSource::CommandLine
    } else if is_set(config.and_then(|c| c.language.as_ref())) {
        SettingSource::ConfigFile
    } else {
        SettingSource::Default
    };

    let base_url = if is_set(config.and_then(|c| c.base_url.as_ref())) {
        SettingSource::ConfigFile
    } else {
        SettingSource::Default
    };

    SettingSources {
        api_key,
        language,
        base_url,
    }
}

/// Return the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("movieparse").join("config.toml"))
}

fn config_path_display() -> String {
    config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "the movieparse config file".to_string())
}

/// Read the `[tmdb]` table, if the config file exists and parses.
pub fn load_config_file() -> Option<TmdbConfig> {
    let path = config_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    match parse_config(&content) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring {}: {e}", path.display());
            None
        }
    }
}

/// Parse config file contents.
pub fn parse_config(content: &str) -> Result<Option<TmdbConfig>, ConfigError> {
    let config: ConfigFile = toml::from_str(content).map_err(|e| ConfigError::file(e.to_string()))?;
    Ok(config.tmdb)
}

/// Show only the last four characters of a key.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>, language: Option<&str>) -> TmdbConfig {
        TmdbConfig {
            api_key: api_key.map(String::from),
            language: language.map(String::from),
            base_url: None,
        }
    }

    #[test]
    fn command_line_beats_env_and_file() {
        let overrides = SettingOverrides {
            api_key: Some("cli".into()),
            language: Some("de-DE".into()),
        };
        let s = TmdbSettings::resolve(overrides, Some("env".into()), Some(config(Some("file"), Some("fr-FR"))))
            .unwrap();
        assert_eq!(s.api_key, "cli");
        assert_eq!(s.language, "de-DE");
    }

    #[test]
    fn env_beats_file() {
        let s = TmdbSettings::resolve(
            SettingOverrides::default(),
            Some("env".into()),
            Some(config(Some("file"), None)),
        )
        .unwrap();
        assert_eq!(s.api_key, "env");
        assert_eq!(s.language, DEFAULT_LANGUAGE);
        assert_eq!(s.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn empty_values_count_as_missing() {
        let err = TmdbSettings::resolve(
            SettingOverrides {
                api_key: Some("  ".into()),
                language: None,
            },
            Some(String::new()),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(_)));
    }

    #[test]
    fn parses_config_table() {
        let c = parse_config(
            "[tmdb]\napi_key = \"abc\"\nbase_url = \"http://localhost:8080/3/\"\n",
        )
        .unwrap()
        .unwrap();
        let s = TmdbSettings::resolve(SettingOverrides::default(), None, Some(c)).unwrap();
        assert_eq!(s.api_key, "abc");
        assert_eq!(s.base_url, "http://localhost:8080/3");
    }

    #[test]
    fn invalid_config_is_an_error() {
        assert!(parse_config("[tmdb\napi_key=").is_err());
    }

    #[test]
    fn sources_report_origin() {
        let c = config(Some("file"), Some("fr-FR"));
        let s = setting_sources(&SettingOverrides::default(), Some("env"), Some(&c));
        assert_eq!(s.api_key, SettingSource::EnvVar(API_KEY_ENV));
        assert_eq!(s.language, SettingSource::ConfigFile);
        assert_eq!(s.base_url, SettingSource::Default);
    }

    #[test]
    fn mask_keeps_last_four() {
        assert_eq!(mask_key("abcdef123456"), "********3456");
        assert_eq!(mask_key("abc"), "***");
    }
}
