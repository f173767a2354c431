use std::env;
use tracing::warn;

/// Service-level defaults for the optimization engine. Per-practice settings
/// fetched from the store override these at request time.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub max_overbook_pct: f64,
    pub min_no_show_threshold: f64,
    pub buffer_minutes: i32,
    pub strategy: String,
    pub avg_booking_value: f64,
    pub fill_rate: f64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            max_overbook_pct: env_f64("OPTIMIZER_MAX_OVERBOOK_PCT", 0.15),
            min_no_show_threshold: env_f64("OPTIMIZER_MIN_NO_SHOW_THRESHOLD", 0.10),
            buffer_minutes: env_i32("OPTIMIZER_BUFFER_MINUTES", 5),
            strategy: env::var("OPTIMIZER_STRATEGY").unwrap_or_else(|_| "balanced".to_string()),
            avg_booking_value: env_f64("OPTIMIZER_AVG_BOOKING_VALUE", 150.0),
            fill_rate: env_f64("OPTIMIZER_FILL_RATE", 0.7),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.max_overbook_pct >= 0.0
            && (0.0..=1.0).contains(&self.fill_rate)
            && matches!(self.strategy.as_str(), "conservative" | "balanced" | "aggressive")
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} is not a valid number, using default {}", key, default);
            default
        }),
        Err(_) => default,
    }
}

fn env_i32(key: &str, default: i32) -> i32 {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} is not a valid integer, using default {}", key, default);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() {
        let config = AppConfig::from_env();
        assert_eq!(config.buffer_minutes, 5);
        assert!((config.max_overbook_pct - 0.15).abs() < f64::EPSILON);
        assert!(config.is_configured());
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let config = AppConfig {
            strategy: "reckless".to_string(),
            ..AppConfig::from_env()
        };
        assert!(!config.is_configured());
    }
}
