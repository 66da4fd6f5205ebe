use std::time::Duration;

use crate::error::ConfigError;
use crate::seed::MAIN_SERIES;
use crate::standings::ticker::DEFAULT_TICK_INTERVAL;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TICKS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Print the dashboard and run a number of ticks in the terminal
    Cli { ticks: u32 },
    /// Serve the JSON API
    Web { port: u16 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub mode: RunMode,
    pub tick_interval: Duration,
    pub rng_seed: Option<u64>,
    pub series: String,
}

impl AppConfig {
    /// Reads the process arguments and environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_parts(&args, |key| std::env::var(key).ok())
    }

    /// `args` excludes the program name: `web [port]` or `[ticks]`.
    pub fn from_parts(args: &[String], env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mode = match args.first().map(String::as_str) {
            Some("web") => {
                let port = match args.get(1) {
                    Some(p) => p.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(p.clone()))?,
                    None => DEFAULT_PORT,
                };
                RunMode::Web { port }
            }
            Some(ticks) => RunMode::Cli {
                ticks: ticks
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| ConfigError::InvalidTicks(ticks.to_string()))?,
            },
            None => RunMode::Cli { ticks: DEFAULT_TICKS },
        };

        let tick_interval = match env("SIMS_TICK_MS") {
            Some(ms) => match ms.trim().parse::<u64>() {
                Ok(n) if n > 0 => Duration::from_millis(n),
                _ => return Err(ConfigError::InvalidTickInterval(ms)),
            },
            None => DEFAULT_TICK_INTERVAL,
        };

        let rng_seed = env("SIMS_RNG_SEED")
            .map(|s| s.trim().parse::<u64>().map_err(|_| ConfigError::InvalidSeed(s.clone())))
            .transpose()?;

        let series = env("SIMS_SERIES")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| MAIN_SERIES.to_string());

        Ok(AppConfig {
            mode,
            tick_interval,
            rng_seed,
            series,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_parts(&[], no_env).unwrap();
        assert_eq!(config.mode, RunMode::Cli { ticks: DEFAULT_TICKS });
        assert_eq!(config.tick_interval, Duration::from_millis(3000));
        assert_eq!(config.rng_seed, None);
        assert_eq!(config.series, MAIN_SERIES);
    }

    #[test]
    fn test_web_mode() {
        let config = AppConfig::from_parts(&args(&["web"]), no_env).unwrap();
        assert_eq!(config.mode, RunMode::Web { port: DEFAULT_PORT });

        let config = AppConfig::from_parts(&args(&["web", "9000"]), no_env).unwrap();
        assert_eq!(config.mode, RunMode::Web { port: 9000 });

        assert_eq!(
            AppConfig::from_parts(&args(&["web", "99999"]), no_env),
            Err(ConfigError::InvalidPort("99999".to_string()))
        );
    }

    #[test]
    fn test_tick_count() {
        let config = AppConfig::from_parts(&args(&["12"]), no_env).unwrap();
        assert_eq!(config.mode, RunMode::Cli { ticks: 12 });
        assert!(matches!(
            AppConfig::from_parts(&args(&["serve"]), no_env),
            Err(ConfigError::InvalidTicks(_))
        ));
    }

    #[test]
    fn test_environment_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SIMS_TICK_MS", "250"),
            ("SIMS_RNG_SEED", "42"),
            ("SIMS_SERIES", "Intramurals"),
        ]
        .into_iter()
        .collect();
        let config = AppConfig::from_parts(&[], |k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.rng_seed, Some(42));
        assert_eq!(config.series, "Intramurals");
    }

    #[test]
    fn test_bad_environment_values() {
        let zero = AppConfig::from_parts(&[], |k| (k == "SIMS_TICK_MS").then(|| "0".to_string()));
        assert_eq!(zero, Err(ConfigError::InvalidTickInterval("0".to_string())));

        let seed = AppConfig::from_parts(&[], |k| (k == "SIMS_RNG_SEED").then(|| "-1".to_string()));
        assert_eq!(seed, Err(ConfigError::InvalidSeed("-1".to_string())));
    }
}
