//! Application service — configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::DemConfig;

/// Load configuration, falling back to defaults when no file exists.
pub fn load_config(store: &impl ConfigStore) -> Result<DemConfig> {
    Ok(store.load()?.unwrap_or_default())
}

/// Validate and persist a single setting. Returns the updated configuration.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<DemConfig> {
    let mut config = load_config(store)?;
    config.set(key, value)?;
    store.save(&config)?;
    Ok(config)
}
