use serde::{Deserialize, Serialize};

use snake_engine::MapSize;
use snake_engine::config::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub map_size: MapSize,
    pub tick_interval_ms: u64,
    /// Fixed session seed; omit for a random one per round.
    pub seed: Option<u64>,
    /// Show the cycle counter on the score bar.
    pub debug_overlay: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            map_size: MapSize::Small,
            tick_interval_ms: 100,
            seed: None,
            debug_overlay: false,
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<(), String> {
        if self.tick_interval_ms < 20 {
            return Err("tick_interval_ms must be at least 20".to_string());
        }
        if self.tick_interval_ms > 1000 {
            return Err("tick_interval_ms must not exceed 1000".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_engine::config::load_yaml_config;

    fn temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .subsec_nanos();
        path.push(format!("snake_tui_config_test_{}_{}.yaml", std::process::id(), nanos));
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_default_config_validates() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config: AppConfig = load_yaml_config("/nonexistent/snake.yaml").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_config_file_is_loaded() {
        let path = temp_file_path();
        std::fs::write(
            &path,
            "map_size: Large\ntick_interval_ms: 80\nseed: 7\ndebug_overlay: true\n",
        )
        .unwrap();
        let config: AppConfig = load_yaml_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.map_size, MapSize::Large);
        assert_eq!(config.tick_interval_ms, 80);
        assert_eq!(config.seed, Some(7));
        assert!(config.debug_overlay);
    }

    #[test]
    fn test_out_of_range_tick_interval_is_rejected() {
        let config = AppConfig {
            tick_interval_ms: 5,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            tick_interval_ms: 5_000,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
