use std::path::Path;

use serde_yaml::{Mapping, Value};

use super::error::AppError;
use crate::SimulationConfig;

fn read_yaml(path: &Path) -> Result<Value, AppError> {
    let text = std::fs::read_to_string(path).map_err(AppError::io(path))?;
    serde_yaml::from_str(&text).map_err(|source| AppError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes every key of `overwrite` into `base`. Nested mappings are merged
/// key by key, everything else replaces the value in `base`.
pub fn merge_yaml(base: &mut Mapping, overwrite: Mapping) {
    for (k, v) in overwrite {
        match (base.get_mut(&k), v) {
            (Some(Value::Mapping(base_inner)), Value::Mapping(overwrite_inner)) => {
                merge_yaml(base_inner, overwrite_inner);
            }
            (_, v) => {
                base.insert(k, v);
            }
        }
    }
}

pub fn parse_config(mut config: Value, overwrite: Option<Value>) -> Result<SimulationConfig, AppError> {
    if let Some(overwrite) = overwrite {
        let base = config
            .as_mapping_mut()
            .ok_or_else(|| AppError::Config("configuration is not a mapping".to_string()))?;
        match overwrite {
            Value::Mapping(overwrite) => merge_yaml(base, overwrite),
            Value::Null => {}
            _ => return Err(AppError::Config("overwrite configuration is not a mapping".to_string())),
        }
    }

    let config: SimulationConfig =
        serde_yaml::from_value(config).map_err(|e| AppError::Config(format!("{}", e)))?;
    config.simulation.validate()?;
    Ok(config)
}

/// Loads a configuration file and applies the optional overwrite file on top.
pub fn load_config(path: &Path, overwrite_path: Option<&Path>) -> Result<SimulationConfig, AppError> {
    let config = read_yaml(path)?;
    let overwrite = overwrite_path.map(read_yaml).transpose()?;
    parse_config(config, overwrite)
}

pub fn write_default_config(path: &Path) -> Result<(), AppError> {
    let yaml = serde_yaml::to_string(&SimulationConfig::default()).map_err(|source| AppError::Serialize {
        what: "default configuration",
        source,
    })?;
    std::fs::write(path, yaml).map_err(AppError::io(path))
}
