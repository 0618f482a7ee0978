//! Difficulty tier table
//!
//! Levels 1 to 10 each map to a strategy, a search depth and a time budget.
//! The built-in table can be replaced from a TOML file:
//!
//! ```toml
//! [[tiers]]
//! strategy = "random"
//!
//! [[tiers]]
//! strategy = "deep_search"
//! depth = 4
//! time_budget_ms = 2000
//! ```

use std::path::Path;
use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 10;

/// How a tier picks its move once the immediate win/block check found nothing.
///
/// Variants are declared weakest first; the derived ordering is tier strength.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Uniform random empty cell
    Random,
    /// Coin flip between random and centre / potential-line preference
    Positional,
    /// One-ply heuristic scoring of the ordered moves
    Shallow,
    /// Iterative-deepening negamax
    DeepSearch,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Random => "random",
            Strategy::Positional => "positional",
            Strategy::Shallow => "shallow",
            Strategy::DeepSearch => "deep search",
        }
    }

    /// Whether the tier runs against the clock.
    pub fn is_timed(self) -> bool {
        matches!(self, Strategy::Shallow | Strategy::DeepSearch)
    }
}

/// One difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TierConfig {
    pub strategy: Strategy,
    /// Maximum search depth in plies (unused by the untimed strategies)
    #[serde(default)]
    pub depth: u8,
    #[serde(default)]
    pub time_budget_ms: u64,
}

impl TierConfig {
    pub const fn new(strategy: Strategy, depth: u8, time_budget_ms: u64) -> Self {
        Self {
            strategy,
            depth,
            time_budget_ms,
        }
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }
}

/// Engine configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tier for level `i + 1` at index `i`
    pub tiers: Vec<TierConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        use Strategy::*;
        EngineConfig {
            tiers: vec![
                TierConfig::new(Random, 0, 0),
                TierConfig::new(Positional, 0, 0),
                TierConfig::new(Positional, 0, 0),
                TierConfig::new(Shallow, 1, 1500),
                TierConfig::new(Shallow, 1, 1500),
                TierConfig::new(Shallow, 1, 1500),
                TierConfig::new(DeepSearch, 4, 2000),
                TierConfig::new(DeepSearch, 5, 2000),
                TierConfig::new(DeepSearch, 6, 2000),
                TierConfig::new(DeepSearch, 7, 2000),
            ],
        }
    }
}

impl EngineConfig {
    /// Tier for `level`, or `None` outside 1 to 10.
    pub fn tier(&self, level: u8) -> Option<&TierConfig> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            return None;
        }
        self.tiers.get(usize::from(level - 1))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate the tier table.
    ///
    /// The table must be total and never get weaker as the level rises.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tiers.len() != usize::from(MAX_LEVEL) {
            return Err(ConfigError::Validation(format!(
                "expected {MAX_LEVEL} tiers, found {}",
                self.tiers.len()
            )));
        }

        for (i, tier) in self.tiers.iter().enumerate() {
            let level = i + 1;
            if tier.strategy.is_timed() && tier.time_budget_ms == 0 {
                return Err(ConfigError::Validation(format!(
                    "level {level}: time_budget_ms must be > 0 for {}",
                    tier.strategy.name()
                )));
            }
            if tier.strategy == Strategy::DeepSearch && tier.depth == 0 {
                return Err(ConfigError::Validation(format!(
                    "level {level}: depth must be >= 1 for deep search"
                )));
            }
        }

        for (i, pair) in self.tiers.windows(2).enumerate() {
            let (lower, upper) = (&pair[0], &pair[1]);
            let level = i + 2;
            if upper.strategy < lower.strategy {
                return Err(ConfigError::Validation(format!(
                    "level {level}: {} is weaker than level {}'s {}",
                    upper.strategy.name(),
                    level - 1,
                    lower.strategy.name()
                )));
            }
            if lower.strategy == Strategy::DeepSearch
                && upper.strategy == Strategy::DeepSearch
                && upper.depth < lower.depth
            {
                return Err(ConfigError::Validation(format!(
                    "level {level}: depth {} is below level {}'s depth {}",
                    upper.depth,
                    level - 1,
                    lower.depth
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_table_is_valid_and_total() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        for level in MIN_LEVEL..=MAX_LEVEL {
            assert!(config.tier(level).is_some(), "level {level}");
        }
        assert!(config.tier(0).is_none());
        assert!(config.tier(11).is_none());
    }

    #[test]
    fn test_default_table_values() {
        let config = EngineConfig::default();
        assert_eq!(config.tier(1).unwrap().strategy, Strategy::Random);
        assert_eq!(config.tier(3).unwrap().strategy, Strategy::Positional);
        assert_eq!(
            *config.tier(5).unwrap(),
            TierConfig::new(Strategy::Shallow, 1, 1500)
        );
        let depths: Vec<u8> = (7..=10).map(|l| config.tier(l).unwrap().depth).collect();
        assert_eq!(depths, vec![4, 5, 6, 7]);
        assert_eq!(config.tier(10).unwrap().time_budget(), Duration::from_secs(2));
    }

    #[test]
    fn test_validate_rejects_wrong_tier_count() {
        let mut config = EngineConfig::default();
        config.tiers.pop();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_weaker_higher_tier() {
        let mut config = EngineConfig::default();
        config.tiers[8] = TierConfig::new(Strategy::Shallow, 1, 1500);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_shrinking_depth() {
        let mut config = EngineConfig::default();
        config.tiers[9].depth = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_budget_search() {
        let mut config = EngineConfig::default();
        config.tiers[6].time_budget_ms = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.tiers[6].depth = 0;
        config.tiers[7].depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut text = String::new();
        for _ in 0..3 {
            text.push_str("[[tiers]]\nstrategy = \"random\"\n\n");
        }
        for _ in 0..3 {
            text.push_str("[[tiers]]\nstrategy = \"shallow\"\ndepth = 1\ntime_budget_ms = 300\n\n");
        }
        for depth in [2, 3, 3, 4] {
            text.push_str(&format!(
                "[[tiers]]\nstrategy = \"deep_search\"\ndepth = {depth}\ntime_budget_ms = 500\n\n"
            ));
        }
        file.write_all(text.as_bytes()).unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.tiers.len(), 10);
        assert_eq!(config.tier(2).unwrap().strategy, Strategy::Random);
        assert_eq!(config.tier(2).unwrap().time_budget_ms, 0);
        assert_eq!(
            *config.tier(10).unwrap(),
            TierConfig::new(Strategy::DeepSearch, 4, 500)
        );
    }

    #[test]
    fn test_load_rejects_invalid_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[[tiers]]\nstrategy = \"random\"\n").unwrap();
        assert!(matches!(
            EngineConfig::load(file.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[[tiers]]\nstrategy = \"genius\"\n").unwrap();
        assert!(matches!(
            EngineConfig::load(file.path()),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_strategy_strength_order() {
        assert!(Strategy::Random < Strategy::Positional);
        assert!(Strategy::Positional < Strategy::Shallow);
        assert!(Strategy::Shallow < Strategy::DeepSearch);
    }
}
