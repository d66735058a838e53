use crate::error::{CoincheError, Result};
use crate::types::config::CoincheConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "coinche.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".coinche/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/coinche/config.toml";

pub fn load_config(root: &Path) -> Result<Option<CoincheConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

/// Merges every config layer that exists, lowest precedence first. `None` when no layer exists.
pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<CoincheConfig>> {
    let layers: Vec<PathBuf> = global_path
        .map(Path::to_path_buf)
        .into_iter()
        .chain([root.join(DEFAULT_CONFIG_FILE), root.join(DEFAULT_LOCAL_FILE)])
        .filter(|path| path.is_file())
        .collect();
    if layers.is_empty() {
        return Ok(None);
    }

    let mut merged = Value::Table(Map::new());
    for layer in &layers {
        debug!(path = %layer.display(), "merging config layer");
        merge_toml(&mut merged, read_toml_value(layer)?);
    }

    let cfg: CoincheConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| CoincheError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(Some(cfg))
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| CoincheError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
