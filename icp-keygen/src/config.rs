//! Environment-driven configuration

use anyhow::Context;
use icp_identity::KeygenConfig;

/// Build the generator configuration from the environment.
///
/// `ICP_KEYGEN_CONFIG` names a JSON file loaded first; `ICP_KEYGEN_ALGORITHM`
/// and `ICP_KEYGEN_LABEL` override individual fields on top of it.
pub fn from_env() -> anyhow::Result<KeygenConfig> {
    let mut config = match std::env::var("ICP_KEYGEN_CONFIG") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {}", path))?;
            KeygenConfig::from_json(&json).with_context(|| format!("parsing config file {}", path))?
        }
        Err(_) => KeygenConfig::default(),
    };

    if let Ok(algorithm) = std::env::var("ICP_KEYGEN_ALGORITHM") {
        config.default_algorithm = algorithm
            .parse()
            .context("ICP_KEYGEN_ALGORITHM")?;
    }

    if let Ok(label) = std::env::var("ICP_KEYGEN_LABEL") {
        config.default_label = label;
    }

    config.validate()?;
    Ok(config)
}
