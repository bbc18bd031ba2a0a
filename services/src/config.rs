use seawatch_utils::version_info::RuntimeEnv;
use serde::Deserialize;
use std::env::vars;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub enum Env {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "prod")]
    Prod,
    #[serde(rename = "test")]
    Test,
}

impl From<&Env> for RuntimeEnv {
    fn from(env: &Env) -> Self {
        match env {
            Env::Local => RuntimeEnv::Local,
            Env::Prod => RuntimeEnv::Prod,
            Env::Test => RuntimeEnv::Test,
        }
    }
}

impl Display for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Env::Local => write!(f, "local"),
            Env::Prod => write!(f, "prod"),
            Env::Test => write!(f, "test"),
        }
    }
}

// The final, validated configuration struct.
#[derive(Debug, Clone)]
pub struct Config {
    env: Env,
    logs_dir: PathBuf,
    server_addr: String,
    port: u16,
}

// An intermediate struct for deserializing environment variables where
// everything except `ENV` may be omitted.
#[derive(Deserialize)]
struct RawConfig {
    env: Env,
    logs_dir: Option<PathBuf>,
    server_addr: Option<String>,
    port: Option<u16>,
}

impl Config {
    /// Create a test configuration with default values.
    ///
    /// This function is available for both unit tests and integration
    /// tests. It should not be used in production code.
    pub fn new_for_test() -> Self {
        Self {
            env: Env::Local,
            logs_dir: PathBuf::from("logs"),
            server_addr: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }

    pub fn environment(&self) -> &Env {
        &self.env
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    pub fn server_addr(&self) -> &str {
        &self.server_addr
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_local(&self) -> bool {
        matches!(self.env, Env::Local)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self.env, Env::Prod)
    }

    /// Initializes configuration by reading from environment variables
    /// and applying environment-aware defaults.
    pub fn init() -> anyhow::Result<Self> {
        info!("Loading configuration from environment variables");

        // First, deserialize into a temporary struct that allows for optional fields
        let raw_config: RawConfig = serde_env::from_iter(vars())?;
        Self::from_raw(raw_config)
    }

    fn from_raw(raw_config: RawConfig) -> anyhow::Result<Self> {
        let RawConfig {
            env,
            logs_dir,
            server_addr,
            port,
        } = raw_config;

        // Apply the default logic for `server_addr` based on the environment
        let server_addr = match server_addr {
            Some(addr) => {
                info!("Using provided SERVER_ADDR: {}", addr);
                addr
            }
            None => {
                let default_addr = match env {
                    Env::Local => "127.0.0.1",
                    _ => "0.0.0.0",
                };
                info!(
                    "SERVER_ADDR not set, defaulting to {} for {} environment",
                    default_addr, env
                );
                default_addr.to_owned()
            }
        };

        let port = match port {
            Some(port) => port,
            None if matches!(env, Env::Local) => {
                info!("PORT not set, defaulting to 8080 for local environment");
                8080
            }
            None => anyhow::bail!("PORT must be set for {} environment", env),
        };

        // The log directory defaults next to the binary for local and test
        // runs; production deployments must point at their mounted volume.
        let logs_dir = match logs_dir {
            Some(dir) => dir,
            None if matches!(env, Env::Local | Env::Test) => {
                info!("LOGS_DIR not set, defaulting to ./logs for {} environment", env);
                PathBuf::from("logs")
            }
            None => anyhow::bail!("LOGS_DIR must be set for {} environment", env),
        };

        Ok(Config {
            env,
            logs_dir,
            server_addr,
            port,
        })
    }
}
