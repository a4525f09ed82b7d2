//! Configuration file support for renalcalc.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/renalcalc/config.toml`.
//! It describes the solutions the unit actually stocks and the dosing
//! parameters of the local protocol; defaults match the reference protocol.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub solutions: SolutionsConfig,

    #[serde(default)]
    pub heparin: HeparinConfig,

    #[serde(default)]
    pub dosing: DosingConfig,
}

/// Composition of the stocked replacement/dialysate solutions
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SolutionsConfig {
    /// Replacement bag volume (L)
    #[serde(default = "default_bag_volume_l")]
    pub bag_volume_l: f64,

    /// Sodium of the standard bags (mEq/L)
    #[serde(default = "default_bag_sodium")]
    pub bag_sodium_meq_l: f64,

    /// Bicarbonate base of the Prismasol bath (mmol/L)
    #[serde(default = "default_prismasol_bicarbonate")]
    pub prismasol_bicarbonate_mmol_l: f64,

    /// Bicarbonate base of the Biphozyl bath (mmol/L)
    #[serde(default = "default_biphozyl_bicarbonate")]
    pub biphozyl_bicarbonate_mmol_l: f64,

    /// Sodium content of NaCl 20% (mEq/mL)
    #[serde(default = "default_nacl20_meq_per_ml")]
    pub nacl20_meq_per_ml: f64,

    /// Sodium of hypertonic 3% saline (mEq/L)
    #[serde(default = "default_nacl3_sodium")]
    pub nacl3_sodium_meq_l: f64,
}

impl Default for SolutionsConfig {
    fn default() -> Self {
        Self {
            bag_volume_l: default_bag_volume_l(),
            bag_sodium_meq_l: default_bag_sodium(),
            prismasol_bicarbonate_mmol_l: default_prismasol_bicarbonate(),
            biphozyl_bicarbonate_mmol_l: default_biphozyl_bicarbonate(),
            nacl20_meq_per_ml: default_nacl20_meq_per_ml(),
            nacl3_sodium_meq_l: default_nacl3_sodium(),
        }
    }
}

/// Systemic heparin dosing parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HeparinConfig {
    /// Loading bolus, lower bound (UI/kg)
    #[serde(default = "default_bolus_min")]
    pub bolus_ui_per_kg_min: f64,

    /// Loading bolus, upper bound (UI/kg)
    #[serde(default = "default_bolus_max")]
    pub bolus_ui_per_kg_max: f64,

    /// Continuous infusion after an increase step (UI/kg/h)
    #[serde(default = "default_increased_rate")]
    pub increased_ui_per_kg_h: f64,

    /// Continuous infusion after a decrease step (UI/kg/h)
    #[serde(default = "default_reduced_rate")]
    pub reduced_ui_per_kg_h: f64,

    /// aPTT ratio the titration aims for
    #[serde(default = "default_target_apttr")]
    pub target_apttr: f64,
}

impl Default for HeparinConfig {
    fn default() -> Self {
        Self {
            bolus_ui_per_kg_min: default_bolus_min(),
            bolus_ui_per_kg_max: default_bolus_max(),
            increased_ui_per_kg_h: default_increased_rate(),
            reduced_ui_per_kg_h: default_reduced_rate(),
            target_apttr: default_target_apttr(),
        }
    }
}

/// Effluent dose targets for continuous therapy
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DosingConfig {
    /// Effluent dose target, lower bound (mL/kg/h)
    #[serde(default = "default_effluent_target_min")]
    pub effluent_target_ml_kg_h_min: f64,

    /// Effluent dose target, upper bound (mL/kg/h)
    #[serde(default = "default_effluent_target_max")]
    pub effluent_target_ml_kg_h_max: f64,
}

impl Default for DosingConfig {
    fn default() -> Self {
        Self {
            effluent_target_ml_kg_h_min: default_effluent_target_min(),
            effluent_target_ml_kg_h_max: default_effluent_target_max(),
        }
    }
}

// Default value functions
fn default_bag_volume_l() -> f64 {
    5.0
}

fn default_bag_sodium() -> f64 {
    140.0
}

fn default_prismasol_bicarbonate() -> f64 {
    32.0
}

fn default_biphozyl_bicarbonate() -> f64 {
    22.0
}

fn default_nacl20_meq_per_ml() -> f64 {
    3.4
}

fn default_nacl3_sodium() -> f64 {
    513.0
}

fn default_bolus_min() -> f64 {
    25.0
}

fn default_bolus_max() -> f64 {
    30.0
}

fn default_increased_rate() -> f64 {
    10.0
}

fn default_reduced_rate() -> f64 {
    5.0
}

fn default_target_apttr() -> f64 {
    1.5
}

fn default_effluent_target_min() -> f64 {
    25.0
}

fn default_effluent_target_max() -> f64 {
    30.0
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME")
                .expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("renalcalc").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject configurations no formula can work with
    fn validate(&self) -> Result<()> {
        if self.solutions.bag_volume_l <= 0.0 {
            return Err(Error::Config("bag_volume_l must be positive".into()));
        }
        if self.solutions.bag_sodium_meq_l <= 0.0 {
            return Err(Error::Config("bag_sodium_meq_l must be positive".into()));
        }
        if self.heparin.bolus_ui_per_kg_min > self.heparin.bolus_ui_per_kg_max {
            return Err(Error::Config(
                "heparin bolus lower bound exceeds upper bound".into(),
            ));
        }
        if self.dosing.effluent_target_ml_kg_h_min > self.dosing.effluent_target_ml_kg_h_max {
            return Err(Error::Config(
                "effluent target lower bound exceeds upper bound".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.solutions.bag_volume_l, 5.0);
        assert_eq!(config.solutions.prismasol_bicarbonate_mmol_l, 32.0);
        assert_eq!(config.solutions.biphozyl_bicarbonate_mmol_l, 22.0);
        assert_eq!(config.heparin.target_apttr, 1.5);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(
            config.solutions.nacl3_sodium_meq_l,
            parsed.solutions.nacl3_sodium_meq_l
        );
        assert_eq!(
            config.dosing.effluent_target_ml_kg_h_max,
            parsed.dosing.effluent_target_ml_kg_h_max
        );
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[solutions]
biphozyl_bicarbonate_mmol_l = 23.0
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.solutions.biphozyl_bicarbonate_mmol_l, 23.0);
        assert_eq!(config.solutions.prismasol_bicarbonate_mmol_l, 32.0); // default
    }

    #[test]
    fn test_load_from_rejects_inverted_bolus_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[heparin]\nbolus_ui_per_kg_min = 40.0\nbolus_ui_per_kg_max = 30.0\n",
        )
        .unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut config = Config::default();
        config.solutions.bag_volume_l = 4.5;
        config.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.solutions.bag_volume_l, 4.5);
    }
}
