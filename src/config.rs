use crate::engines::ShakmatyEngine;
use crate::error::LuminaError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_PATH_ENV: &str = "LUMINA_CONFIG_PATH";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Starting position; the standard one when absent.
    pub start_fen: Option<String>,
    /// Seed for random moves; entropy when absent.
    pub seed: Option<u64>,
}

impl Config {
    /// A missing file is not an error, it just means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, LuminaError> {
        match path {
            Some(p) if p.exists() => {
                let content = fs::read_to_string(p).map_err(|source| LuminaError::ConfigRead {
                    path: p.to_path_buf(),
                    source,
                })?;
                Self::from_yaml(&content)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, LuminaError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn build_engine(&self) -> Result<ShakmatyEngine, LuminaError> {
        match &self.start_fen {
            Some(fen) => ShakmatyEngine::from_fen(fen),
            None => Ok(ShakmatyEngine::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::RulesEngine;

    #[test]
    fn test_parse_yaml() {
        let config = Config::from_yaml("start-fen: \"8/8/8/8/8/8/8/K6k w - - 0 1\"\nseed: 17\n").unwrap();
        assert_eq!(config.start_fen.as_deref(), Some("8/8/8/8/8/8/8/K6k w - - 0 1"));
        assert_eq!(config.seed, Some(17));
        assert!(config.build_engine().unwrap().is_insufficient_material());
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.build_engine().unwrap().legal_moves().len(), 20);
        assert_eq!(Config::load(None).unwrap(), Config::default());
        assert_eq!(Config::load(Some(Path::new("/nonexistent/lumina.yaml"))).unwrap(), Config::default());
    }

    #[test]
    fn test_errors() {
        assert!(matches!(Config::from_yaml("seed: [1, 2]"), Err(LuminaError::ConfigParse(_))));
        assert!(matches!(Config::from_yaml("colour: blue"), Err(LuminaError::ConfigParse(_))));
        let config = Config {
            start_fen: Some("rnbqkbnr/pppppppp w".to_string()),
            seed: None,
        };
        assert!(matches!(config.build_engine(), Err(LuminaError::InvalidFen(_))));
    }
}
