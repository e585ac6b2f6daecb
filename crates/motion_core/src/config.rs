use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::EngineError;

/// Reads and parses a TOML configuration file into `T`. Shared by every
/// config shape in the workspace (today: `challenge::ChallengeConfig`) so
/// there is exactly one "file not found vs. parse error" distinction to
/// get right.
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, EngineError> {
    if !path.exists() {
        return Err(EngineError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = fs::read_to_string(path).map_err(|source| EngineError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| EngineError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}
