use serde::de::DeserializeOwned;

/// Semantic validation for configs loaded from disk.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Loads a YAML config file. A missing file yields the default config;
/// anything present must parse and validate.
pub fn load_yaml_config<T>(path: &str) -> Result<T, String>
where
    T: DeserializeOwned + Default + Validate,
{
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(format!("Failed to read config file {}: {}", path, e)),
    };

    let config: T = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("Failed to parse config file {}: {}", path, e))?;

    config
        .validate()
        .map_err(|e| format!("Config validation error: {}", e))?;

    Ok(config)
}
