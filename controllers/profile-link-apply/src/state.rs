//! YAML configuration and state files.

use crate::error::RunnerError;
use profile_link::ResourceState;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Load the desired resource configuration.
pub fn load_config(path: &Path) -> Result<Value, RunnerError> {
    let raw = read(path)?;
    serde_yaml::from_str(&raw).map_err(|source| RunnerError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Load recorded state; a missing file is an empty state.
pub fn load_state(path: &Path) -> Result<ResourceState, RunnerError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No state file at {}, starting empty", path.display());
            return Ok(ResourceState::default());
        }
        Err(source) => {
            return Err(RunnerError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if raw.trim().is_empty() {
        return Ok(ResourceState::default());
    }
    serde_yaml::from_str(&raw).map_err(|source| RunnerError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Write recorded state, replacing the previous file.
pub fn save_state(path: &Path, state: &ResourceState) -> Result<(), RunnerError> {
    let raw = serde_yaml::to_string(state).map_err(|source| RunnerError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, raw).map_err(|source| RunnerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote state to {}", path.display());
    Ok(())
}

fn read(path: &Path) -> Result<String, RunnerError> {
    fs::read_to_string(path).map_err(|source| RunnerError::Io {
        path: path.to_path_buf(),
        source,
    })
}
