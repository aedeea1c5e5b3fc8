//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/floorcalc/floorcalc.toml`
//! 3. Explicit config: `--config <FILE>`
//! 4. Environment variables: `FLOORCALC_*` prefix, `__` between sections
//!    (e.g. `FLOORCALC_PRICES__DELIVERY=700`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{CurrencyFormatter, PriceTable};

/// Currency display settings (single locale).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CurrencySettings {
    /// Symbol appended after the amount
    pub symbol: String,
    /// Thousands separator (default: no-break space)
    pub group_separator: String,
    /// Minimum digits in the leading group before grouping applies
    pub min_grouping_digits: usize,
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            symbol: "Kč".into(),
            group_separator: "\u{a0}".into(),
            min_grouping_digits: 1,
        }
    }
}

impl CurrencySettings {
    pub fn formatter(&self) -> CurrencyFormatter {
        CurrencyFormatter::new(
            self.symbol.clone(),
            self.group_separator.clone(),
            self.min_grouping_digits,
        )
    }
}

/// Unified configuration for floorcalc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    /// Unit prices per cost category
    pub prices: PriceTable,
    /// Currency formatting
    pub currency: CurrencySettings,
}

/// Get the XDG config directory for floorcalc.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "floorcalc").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("floorcalc.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a user-supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; must exist
    ///
    /// Each layer only overrides the keys it sets. Prices are validated after
    /// merging, so an invalid value from any layer is reported.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut builder = Config::builder();

        // 1. Global config (optional)
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        // 2. Explicit config (required)
        if let Some(path) = explicit {
            let path = expand_path(path);
            if !path.exists() {
                return Err(ApplicationError::ConfigNotFound(path));
            }
            debug!("load: explicit config {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        // 3. Environment variables (explicit overrides)
        builder = builder.add_source(
            Environment::with_prefix("FLOORCALC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // Defaults come from #[serde(default)]
        let config = builder.build().map_err(config_err)?;
        let settings: Self = config.try_deserialize().map_err(config_err)?;

        settings.prices.validate()?;
        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# floorcalc configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/floorcalc/floorcalc.toml
#   Explicit: floorcalc --config <FILE>
#   Env:      FLOORCALC_PRICES__<KEY>, FLOORCALC_CURRENCY__<KEY>
#
# Prices are whole currency units; negative values are rejected.

[prices]
# Per m² of floor area
# old_floor_removal = 40
# disposal = 30
# subfloor_sanding = 150
# subfloor_vacuuming = 20
# installation = 240
# flooring_material = 649

# Per metre of baseboard
# baseboard_installation = 120
# baseboard_material = 249

# Per transition strip
# transition_installation = 150
# transition_material = 160

# Flat fees
# delivery = 600
# handling = 900

[currency]
# symbol = "Kč"
# group_separator = " "
# min_grouping_digits = 1
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
