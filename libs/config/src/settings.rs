//! Engine Configuration Module
//!
//! Loads [`AmmConfig`] from a base TOML file, an optional environment
//! overlay and `AMM_`-prefixed environment variables, in that order of
//! precedence (later wins). Every field has a default, so a missing base
//! file yields the standard 0.3% fee and 0.5% slippage configuration.

use crate::defaults;
use amm::slippage::BPS_DENOMINATOR;
use amm::{FeeSchedule, SlippageBand, SlippageTolerance};
use anyhow::{ensure, Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Complete engine configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AmmConfig {
    pub pricing: PricingConfig,
    pub slippage: SlippageConfig,
    pub snapshot: SnapshotConfig,
}

/// Fee applied by the pricing engine
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct PricingConfig {
    pub fee_numerator: u32,
    pub fee_denominator: u32,
}

/// Default tolerance and the band outside which the UI warns
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct SlippageConfig {
    pub default_bps: u32,
    pub warn_low_bps: u32,
    pub warn_high_bps: u32,
    pub max_custom_bps: u32,
}

/// Pool snapshot input
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Snapshot JSON file; `$VAR` and `~` are expanded on load
    pub path: Option<String>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            fee_numerator: defaults::pricing::FEE_NUMERATOR,
            fee_denominator: defaults::pricing::FEE_DENOMINATOR,
        }
    }
}

impl Default for SlippageConfig {
    fn default() -> Self {
        Self {
            default_bps: defaults::slippage::DEFAULT_BPS,
            warn_low_bps: defaults::slippage::WARN_LOW_BPS,
            warn_high_bps: defaults::slippage::WARN_HIGH_BPS,
            max_custom_bps: defaults::slippage::MAX_CUSTOM_BPS,
        }
    }
}

impl AmmConfig {
    /// Load configuration from files with environment overrides
    ///
    /// An explicit `base_path` must exist; without one the default
    /// `config/amm.toml` is used when present.
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        let mut sources = ConfigSources::new();
        if let Some(base) = base_path {
            sources = sources.base_file(base);
        }
        if let Some(env) = environment {
            sources = sources.environment(env);
        }
        sources.load()
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        self.fee_schedule()?;
        self.default_slippage()?;

        let slippage = &self.slippage;
        ensure!(
            slippage.warn_low_bps <= slippage.warn_high_bps,
            "slippage.warn_low_bps ({}) exceeds slippage.warn_high_bps ({})",
            slippage.warn_low_bps,
            slippage.warn_high_bps
        );
        ensure!(
            slippage.warn_high_bps <= BPS_DENOMINATOR && slippage.max_custom_bps <= BPS_DENOMINATOR,
            "slippage band must stay within {} bps",
            BPS_DENOMINATOR
        );
        Ok(())
    }

    pub fn fee_schedule(&self) -> Result<FeeSchedule> {
        FeeSchedule::new(self.pricing.fee_numerator, self.pricing.fee_denominator)
            .context("Invalid [pricing] fee")
    }

    pub fn default_slippage(&self) -> Result<SlippageTolerance> {
        SlippageTolerance::from_bps(self.slippage.default_bps)
            .context("Invalid slippage.default_bps")
    }

    pub fn slippage_band(&self) -> SlippageBand {
        SlippageBand {
            warn_low_bps: self.slippage.warn_low_bps,
            warn_high_bps: self.slippage.warn_high_bps,
            max_custom_bps: self.slippage.max_custom_bps,
        }
    }

    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.snapshot.path.as_ref().map(PathBuf::from)
    }

    /// Expand environment variables in string values
    pub fn expand_env_vars(&mut self) -> Result<()> {
        if let Some(path) = &self.snapshot.path {
            let expanded = shellexpand::full(path).context("Failed to expand snapshot path")?;
            self.snapshot.path = Some(expanded.into_owned());
        }
        Ok(())
    }

    /// Effective configuration rendered back as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Source locations for a configuration load
#[derive(Debug, Clone)]
pub struct ConfigSources {
    base: PathBuf,
    base_required: bool,
    environments_dir: PathBuf,
    environment: Option<String>,
    env_prefix: String,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            base: PathBuf::from(defaults::paths::BASE_CONFIG),
            base_required: false,
            environments_dir: PathBuf::from(defaults::paths::ENVIRONMENTS_DIR),
            environment: None,
            env_prefix: defaults::paths::ENV_PREFIX.to_string(),
        }
    }
}

impl ConfigSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `path` as the base file; it becomes mandatory
    pub fn base_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.base = path.into();
        self.base_required = true;
        self
    }

    pub fn environments_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.environments_dir = dir.into();
        self
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn load(&self) -> Result<AmmConfig> {
        if self.base.exists() {
            info!("Loading base config: {:?}", self.base);
        } else {
            debug!("Base config {:?} not found, using defaults", self.base);
        }

        let mut builder = Config::builder()
            .add_source(File::from(self.base.as_path()).required(self.base_required));

        // Add environment-specific overrides if specified
        if let Some(env) = &self.environment {
            let env_file = self.environments_dir.join(format!("{}.toml", env));

            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator(defaults::paths::ENV_SEPARATOR)
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        let mut amm_config: AmmConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        amm_config.expand_env_vars()?;
        amm_config.validate()?;

        debug!(
            fee_numerator = amm_config.pricing.fee_numerator,
            fee_denominator = amm_config.pricing.fee_denominator,
            default_slippage_bps = amm_config.slippage.default_bps,
            "Configuration loaded"
        );
        Ok(amm_config)
    }
}

/// Convenience function to load configuration with defaults
pub fn load_config(environment: Option<&str>) -> Result<AmmConfig> {
    AmmConfig::load(None, environment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    // Each test uses its own prefix so real AMM_ variables never leak in
    fn isolated(prefix: &str) -> ConfigSources {
        ConfigSources::new().env_prefix(prefix)
    }

    #[test]
    fn test_missing_base_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = isolated("AMM_TEST_DEFAULTS")
            .environments_dir(dir.path())
            .load()
            .unwrap();

        assert_eq!(config, AmmConfig::default());
        assert_eq!(config.fee_schedule().unwrap(), FeeSchedule::STANDARD);
        assert_eq!(config.default_slippage().unwrap().bps(), 50);
        assert_eq!(config.slippage_band(), SlippageBand::default());
    }

    #[test]
    fn test_explicit_base_must_exist() {
        let dir = tempdir().unwrap();
        let result = isolated("AMM_TEST_REQUIRED")
            .base_file(dir.path().join("absent.toml"))
            .load();
        assert!(result.is_err());
    }

    #[test]
    fn test_load_base_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("amm.toml");

        let config_content = r#"
[pricing]
fee_numerator = 9975
fee_denominator = 10000

[slippage]
default_bps = 100
"#;

        fs::write(&config_path, config_content).unwrap();

        let config = isolated("AMM_TEST_BASE").base_file(&config_path).load().unwrap();

        assert_eq!(config.pricing.fee_numerator, 9975);
        assert_eq!(config.pricing.fee_denominator, 10000);
        assert_eq!(config.slippage.default_bps, 100);
        // untouched fields keep their defaults
        assert_eq!(config.slippage.warn_high_bps, 500);
        assert_eq!(config.snapshot.path, None);
    }

    #[test]
    fn test_environment_override() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("amm.toml");
        let env_dir = dir.path().join("environments");
        fs::create_dir(&env_dir).unwrap();

        fs::write(&config_path, "[slippage]\ndefault_bps = 100\nwarn_high_bps = 400\n").unwrap();
        fs::write(env_dir.join("staging.toml"), "[slippage]\ndefault_bps = 30\n").unwrap();

        let config = isolated("AMM_TEST_OVERLAY")
            .base_file(&config_path)
            .environments_dir(&env_dir)
            .environment("staging")
            .load()
            .unwrap();

        assert_eq!(config.slippage.default_bps, 30);
        assert_eq!(config.slippage.warn_high_bps, 400);

        // an unknown environment falls back to the base file
        let config = isolated("AMM_TEST_OVERLAY")
            .base_file(&config_path)
            .environments_dir(&env_dir)
            .environment("production")
            .load()
            .unwrap();
        assert_eq!(config.slippage.default_bps, 100);
    }

    #[test]
    fn test_environment_variables_win() {
        let dir = tempdir().unwrap();
        std::env::set_var("AMM_TEST_VARS_PRICING__FEE_NUMERATOR", "9970");
        std::env::set_var("AMM_TEST_VARS_PRICING__FEE_DENOMINATOR", "10000");

        let config = isolated("AMM_TEST_VARS")
            .environments_dir(dir.path())
            .load()
            .unwrap();

        assert_eq!(config.fee_schedule().unwrap(), FeeSchedule::from_bps(30).unwrap());
    }

    #[test]
    fn test_snapshot_path_expansion() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("amm.toml");
        std::env::set_var("AMM_TEST_SNAPSHOT_DIR", "/var/lib/pools");
        fs::write(&config_path, "[snapshot]\npath = \"$AMM_TEST_SNAPSHOT_DIR/polygon.json\"\n").unwrap();

        let config = isolated("AMM_TEST_SNAPSHOT").base_file(&config_path).load().unwrap();
        assert_eq!(config.snapshot_path(), Some(PathBuf::from("/var/lib/pools/polygon.json")));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AmmConfig::default();
        config.pricing.fee_numerator = 0;
        assert!(config.validate().is_err());

        let mut config = AmmConfig::default();
        config.pricing.fee_numerator = 1001;
        assert!(config.validate().is_err());

        let mut config = AmmConfig::default();
        config.slippage.default_bps = 10_001;
        assert!(config.validate().is_err());

        let mut config = AmmConfig::default();
        config.slippage.warn_low_bps = 600;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_file_fails_to_load() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("amm.toml");
        fs::write(&config_path, "[pricing]\nfee_numerator = 2000\n").unwrap();

        let result = isolated("AMM_TEST_INVALID").base_file(&config_path).load();
        assert!(result.is_err());
    }

    #[test]
    fn test_toml_rendering_reloads() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("amm.toml");

        let mut config = AmmConfig::default();
        config.slippage.default_bps = 75;
        config.snapshot.path = Some("/data/pools.json".to_string());
        fs::write(&config_path, config.to_toml_string().unwrap()).unwrap();

        let reloaded = isolated("AMM_TEST_RENDER").base_file(&config_path).load().unwrap();
        assert_eq!(reloaded, config);
    }
}
