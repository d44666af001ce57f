// src/config.rs
use crate::domain::errors::{AppError, AppResult};
use dotenv::dotenv;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::application::dto::format::DEFAULT_EXPLORER_URL;
use crate::infrastructure::wallet::{PLACEHOLDER_ADDRESS, PLACEHOLDER_BALANCE};

/// Marketplace configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Simulated latency of the wallet and ledger
    pub simulation: SimulationConfig,

    /// Notification behaviour
    pub notifications: NotificationConfig,

    /// Simulated wallet account
    pub wallet: WalletConfig,

    /// Where the session flag is persisted
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Wallet connect delay in milliseconds
    pub connect_delay_ms: u64,

    /// Purchase settlement delay in milliseconds
    pub purchase_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Visible duration in milliseconds
    pub ttl_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Account address handed out by the simulated wallet
    pub address: String,

    /// Balance reported for that account
    pub balance: Decimal,

    /// Block explorer used for links
    pub explorer_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file for persisted state; in-memory when unset
    pub path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (e.g., "info", "debug", "warn", "error")
    pub level: String,

    /// Log to file
    pub to_file: bool,

    /// Log file path
    pub file_path: Option<String>,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl SimulationConfig {
    pub fn connect_delay(&self) -> Duration {
        Duration::from_millis(self.connect_delay_ms)
    }

    pub fn purchase_delay(&self) -> Duration {
        Duration::from_millis(self.purchase_delay_ms)
    }
}

impl NotificationConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let defaults = Config::default();

        let simulation = SimulationConfig {
            connect_delay_ms: env_or("CONNECT_DELAY_MS", defaults.simulation.connect_delay_ms),
            purchase_delay_ms: env_or("PURCHASE_DELAY_MS", defaults.simulation.purchase_delay_ms),
        };

        let notifications = NotificationConfig {
            ttl_ms: env_or("NOTIFICATION_TTL_MS", defaults.notifications.ttl_ms),
        };

        let wallet = WalletConfig {
            address: env::var("WALLET_ADDRESS").unwrap_or(defaults.wallet.address),
            balance: env_or("WALLET_BALANCE", defaults.wallet.balance),
            explorer_url: env::var("EXPLORER_URL").unwrap_or(defaults.wallet.explorer_url),
        };

        let storage = StorageConfig {
            path: env::var("STORAGE_PATH").ok().filter(|p| !p.is_empty()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            to_file: env_or("LOG_TO_FILE", false),
            file_path: env::var("LOG_FILE_PATH").ok(),
        };

        let config = Config {
            simulation,
            notifications,
            wallet,
            storage,
            logging,
        };
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let mut file = File::open(path).map_err(|e| {
            AppError::Config(format!("Failed to open config file: {}", e))
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| {
            AppError::Config(format!("Failed to read config file: {}", e))
        })?;

        let config: Config = serde_json::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> AppResult<()> {
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            AppError::Config(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, contents).map_err(|e| {
            AppError::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.wallet.balance.is_sign_negative() {
            return Err(AppError::Config(format!(
                "Wallet balance must not be negative: {}",
                self.wallet.balance
            )));
        }

        if self.notifications.ttl_ms == 0 {
            return Err(AppError::Config(
                "Notification TTL must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self) -> AppResult<()> {
        let mut builder = env_logger::Builder::new();

        // Set log level
        let log_level = match self.logging.level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            _ => log::LevelFilter::Info,
        };

        builder.filter_level(log_level);

        // Configure output
        if self.logging.to_file {
            if let Some(file_path) = &self.logging.file_path {
                let file = File::create(file_path).map_err(|e| {
                    AppError::Config(format!("Failed to create log file: {}", e))
                })?;

                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
        }

        builder
            .try_init()
            .map_err(|e| AppError::Config(format!("Failed to initialize logging: {}", e)))?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                connect_delay_ms: 1000,
                purchase_delay_ms: 2000,
            },
            notifications: NotificationConfig { ttl_ms: 5000 },
            wallet: WalletConfig {
                address: PLACEHOLDER_ADDRESS.to_string(),
                balance: PLACEHOLDER_BALANCE,
                explorer_url: DEFAULT_EXPLORER_URL.to_string(),
            },
            storage: StorageConfig { path: None },
            logging: LoggingConfig {
                level: "info".to_string(),
                to_file: false,
                file_path: None,
            },
        }
    }
}
