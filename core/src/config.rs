use serde::{Deserialize, Serialize};

/// Where and how saved games are written and resumed.
///
/// Every field has a default, so a config file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    /// Directory for `.game.json` files.
    pub save_dir: String,
    /// SQLite catalogue of saved games.
    pub db_path: String,
    /// Resume loaded games without checking their constraints.
    pub ignore_constraints: bool,
    /// Indent saved JSON files.
    pub pretty_json: bool,
    /// Seats in games made by the `demo` command.
    pub demo_players: usize,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            save_dir:           "./saves".into(),
            db_path:            "./saves/saved_games.db".into(),
            ignore_constraints: false,
            pretty_json:        true,
            demo_players:       4,
        }
    }
}

impl SaveConfig {
    /// Load from a JSON file.
    /// In tests, use SaveConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        if config.demo_players == 0 {
            anyhow::bail!("{path}: demo_players must be at least 1");
        }
        log::debug!("config loaded from {path}: {config:?}");
        Ok(config)
    }

    /// Config for unit tests: in-memory database, compact JSON.
    pub fn default_test() -> Self {
        Self {
            save_dir:    std::env::temp_dir().join("savegame-tests").display().to_string(),
            db_path:     ":memory:".into(),
            pretty_json: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: SaveConfig =
            serde_json::from_str(r#"{ "ignore_constraints": true }"#).expect("parse");
        assert!(config.ignore_constraints);
        assert_eq!(config.save_dir, "./saves");
        assert_eq!(config.demo_players, 4);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = SaveConfig::load("/nonexistent/savegame.json").unwrap_err();
        assert!(err.to_string().contains("Cannot read"), "got: {err}");
    }
}
