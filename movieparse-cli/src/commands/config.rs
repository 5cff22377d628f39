use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use movieparse_tmdb::settings::{API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_LANGUAGE};
use movieparse_tmdb::{SettingOverrides, SettingSource, mask_key};

use crate::error::CliError;

/// Show current settings and their sources.
pub(crate) fn run_config_show() {
    let path = movieparse_tmdb::config_path();

    log::info!(
        "{}",
        "TMDB Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    log::info!("");

    let env_key = std::env::var(API_KEY_ENV).ok();
    let config = movieparse_tmdb::load_config_file();
    let sources = movieparse_tmdb::setting_sources(
        &SettingOverrides::default(),
        env_key.as_deref(),
        config.as_ref(),
    );

    let api_key = match sources.api_key {
        SettingSource::EnvVar(_) => env_key.clone(),
        SettingSource::ConfigFile => config.as_ref().and_then(|c| c.api_key.clone()),
        _ => None,
    }
    .map(|k| mask_key(&k));

    let language = match sources.language {
        SettingSource::ConfigFile => config.as_ref().and_then(|c| c.language.clone()),
        _ => Some(DEFAULT_LANGUAGE.to_string()),
    };

    let base_url = match sources.base_url {
        SettingSource::ConfigFile => config.as_ref().and_then(|c| c.base_url.clone()),
        _ => Some(DEFAULT_BASE_URL.to_string()),
    };

    let fields = [
        ("api_key", &sources.api_key, api_key),
        ("language", &sources.language, language),
        ("base_url", &sources.base_url, base_url),
    ];

    for (name, source, value) in fields {
        let source_str = format!("({})", source);
        let label = format!("{}:", name);
        match value {
            Some(v) => {
                log::info!(
                    "  {} {} {}",
                    label.if_supports_color(Stdout, |t| t.cyan()),
                    v,
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
            None => {
                log::info!(
                    "  {} {} {}",
                    label.if_supports_color(Stdout, |t| t.cyan()),
                    "not set".if_supports_color(Stdout, |t| t.yellow()),
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    let path = movieparse_tmdb::config_path()
        .ok_or_else(|| CliError::other("Could not determine config directory"))?;
    println!("{}", path.display());
    Ok(())
}
