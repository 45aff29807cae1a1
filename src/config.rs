use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cinemateket_core::listing::{DEFAULT_LOCATION, DEFAULT_TIMEZONE};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

static DEFAULT_OUTPUT_PATH: &str = "events.ics";
static ENV_PREFIX: &str = "CINEMATEKET";

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

/// Configuration at ~/.config/cinemateket-ics/config.toml
///
/// Every key can also be set through a `CINEMATEKET_`-prefixed environment
/// variable, e.g. `CINEMATEKET_OUTPUT`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Where `convert` writes the calendar when no --output is given
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Venue for listings that don't name one
    #[serde(default = "default_location")]
    pub location: String,

    /// Zone for listings that don't name one
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl AppConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("cinemateket-ics");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config file, writing a commented template on first run.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path)
    }

    /// Load from `path`, falling back to defaults for anything it leaves out.
    ///
    /// The file is read as TOML whatever its extension.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: &Path, env: Environment) -> Result<Self> {
        let mut config: AppConfig = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(env)
            .build()
            .with_context(|| format!("Could not read config file {}", path.display()))?
            .try_deserialize()
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        let output = shellexpand::tilde(&config.output.to_string_lossy()).into_owned();
        config.output = PathBuf::from(output);
        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> Result<()> {
        let contents = format!(
            "\
# cinemateket-ics configuration

# Where `convert` writes the calendar:
# output = \"{DEFAULT_OUTPUT_PATH}\"

# Venue used when a listing has no `location`:
# location = \"{DEFAULT_LOCATION}\"

# Timezone used when a listing has no `timezone`:
# timezone = \"{DEFAULT_TIMEZONE}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Could not create config directory")?;
        }

        std::fs::write(path, contents).context("Could not write config file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.output, PathBuf::from("events.ics"));
        assert_eq!(config.location, DEFAULT_LOCATION);
        assert_eq!(config.timezone, DEFAULT_TIMEZONE);
    }

    #[test]
    fn default_template_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        AppConfig::create_default_config(&path).unwrap();
        let config = AppConfig::load_from(&path).unwrap();

        assert_eq!(config.output, PathBuf::from("events.ics"));
        assert_eq!(config.timezone, DEFAULT_TIMEZONE);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "location = \"Bio 2\"\ntimezone = \"UTC\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.location, "Bio 2");
        assert_eq!(config.timezone, "UTC");
        assert_eq!(config.output, PathBuf::from("events.ics"));
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "location = \"Bio 2\"\ntimezone = \"UTC\"\n").unwrap();

        let vars = config::Map::from([(
            "CINEMATEKET_TIMEZONE".to_string(),
            "Europe/Oslo".to_string(),
        )]);
        let env = Environment::with_prefix(ENV_PREFIX).source(Some(vars));

        let config = AppConfig::load_with_env(&path, env).unwrap();
        assert_eq!(config.timezone, "Europe/Oslo");
        assert_eq!(config.location, "Bio 2");
    }

    #[test]
    fn file_without_extension_is_read_as_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("myconf");
        std::fs::write(&path, "output = \"screenings.ics\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.output, PathBuf::from("screenings.ics"));
    }
}
