use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;

fn default_foci_column() -> String {
    "NumFoci".to_string()
}

fn default_plot() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Experiment root directory. CLI argument takes precedence.
    pub root_path: Option<String>,
    /// Positive threshold. CLI argument takes precedence.
    pub threshold: Option<u32>,
    /// Measurement column used for classification.
    #[serde(default = "default_foci_column")]
    pub foci_column: String,
    /// Render the summary plot after writing combined results.
    #[serde(default = "default_plot")]
    pub plot: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root_path: None,
            threshold: None,
            foci_column: default_foci_column(),
            plot: default_plot(),
        }
    }
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}
