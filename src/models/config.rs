//! Configuration model loaded from external sources.

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

fn default_lookup_debounce_ms() -> u64 {
    500
}

fn default_directory_file() -> String {
    "config/directory.json".to_string()
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
/// Settings of the booking wizard and its dry-run binary.
pub struct WizardConfig {
    /// Quiet period before a registration lookup hits the provider.
    #[serde(default = "default_lookup_debounce_ms")]
    pub lookup_debounce_ms: u64,
    /// JSON export of the directory (missions, passengers, chauffeurs, clients).
    #[serde(default = "default_directory_file")]
    pub directory_file: String,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            lookup_debounce_ms: default_lookup_debounce_ms(),
            directory_file: default_directory_file(),
        }
    }
}

impl WizardConfig {
    /// Reads `{dir}/default.yaml`, the optional `{dir}/{app_env}.yaml` and `APP_*` variables.
    pub fn load(dir: &Path, app_env: &str) -> Result<Self, ConfigError> {
        let default_file = dir.join("default.yaml");
        let env_file = dir.join(format!("{app_env}.yaml"));

        Config::builder()
            .add_source(File::new(&default_file.to_string_lossy(), FileFormat::Yaml))
            .add_source(File::new(&env_file.to_string_lossy(), FileFormat::Yaml).required(false))
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn lookup_debounce(&self) -> Duration {
        Duration::from_millis(self.lookup_debounce_ms)
    }
}
