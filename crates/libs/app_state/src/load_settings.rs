use crate::{AppConstants, AppSettings, RawSettings};
use color_eyre::eyre::Result;
use config::builder::DefaultState;
use config::ConfigBuilder;
use std::path::Path;
use std::sync::OnceLock;
use tracing::info;

const SETTINGS_PATH: &str = "config/settings.yaml";

/// Load settings from `config/settings.yaml`, with `.env` and `APP__*` overrides on top.
pub fn load_app_settings() -> Result<AppSettings> {
    load_settings_from_path(Path::new(SETTINGS_PATH), Some(Path::new(".env")))
}

pub fn load_settings_from_path(
    settings_path: &Path,
    dotenv_path: Option<&Path>,
) -> Result<AppSettings> {
    // Need to load from dotenv to get it to overwrite the db url from env.
    if let Some(dotenv_path) = dotenv_path {
        dotenv::from_path(dotenv_path).ok();
    }
    let config_path = settings_path.canonicalize()?;
    info!("Loading settings from {}", config_path.display());

    let builder = config::Config::builder()
        .add_source(config::File::from(config_path))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

    Ok(build_raw_settings(builder)?.into())
}

pub fn load_constants_from_path(settings_path: &Path) -> Result<AppConstants> {
    let config_path = settings_path.canonicalize()?;
    let builder = config::Config::builder().add_source(config::File::from(config_path));
    Ok(build_raw_settings(builder)?.into())
}

fn build_raw_settings(builder: ConfigBuilder<DefaultState>) -> Result<RawSettings> {
    Ok(builder.build()?.try_deserialize::<RawSettings>()?)
}

/// Process-wide constants. Tests may `set` this before first use.
pub static CONSTANTS: OnceLock<AppConstants> = OnceLock::new();

#[must_use]
pub fn constants() -> &'static AppConstants {
    CONSTANTS.get_or_init(|| {
        load_constants_from_path(Path::new(SETTINGS_PATH)).expect("Cannot load app constants.")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    const SETTINGS_YAML: &str = include_str!("../../../../config/settings.yaml");

    fn parse(yaml: &str) -> RawSettings {
        let builder =
            config::Config::builder().add_source(config::File::from_str(yaml, FileFormat::Yaml));
        build_raw_settings(builder).expect("settings should parse")
    }

    #[test]
    fn shipped_settings_parse() {
        let raw = parse(SETTINGS_YAML);
        let settings: AppSettings = raw.clone().into();
        let constants: AppConstants = raw.into();

        assert_eq!(settings.dispatch.closest_jobs_limit, 10);
        assert!((settings.dispatch.multi_job_rating_threshold - 4.5).abs() < f64::EPSILON);
        assert_eq!(settings.dispatch.zip_distance_cap, 50);
        assert_eq!(settings.payouts.stripe_weekly.flat_cents, 25);
        assert!((settings.payouts.cash_app_same_day.percent - 1.5).abs() < f64::EPSILON);
        assert_eq!(settings.reconciliation.window_days, 7);
        assert_eq!(settings.reconciliation.tolerance_cents, 1);
        assert_eq!(constants.timezone, chrono_tz::America::New_York);
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let yaml = SETTINGS_YAML.replace("America/New_York", "Mars/Olympus_Mons");
        let builder = config::Config::builder()
            .add_source(config::File::from_str(&yaml, FileFormat::Yaml));
        assert!(build_raw_settings(builder).is_err());
    }
}
