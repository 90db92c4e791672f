pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::{CatError, Result};
use crate::utils::validation::{self, Validate};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub const DEFAULT_LISTEN_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 8080));
pub const DEFAULT_FACT_BASE_URL: &str = "https://catfact.ninja";
pub const DEFAULT_IMAGE_URL: &str = "https://api.thecatapi.com/v1/images/search";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
const MAX_TIMEOUT_SECONDS: u64 = 300;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "catserver")]
#[command(about = "Serves a random fact paired with a random image")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:8080
    #[arg(long, env = "CATSERVER_LISTEN_ADDR")]
    pub listen_addr: Option<String>,

    /// Base URL of the fact provider; `/facts` is appended
    #[arg(long, env = "CATSERVER_FACT_BASE_URL")]
    pub fact_base_url: Option<String>,

    /// Full URL of the image provider search endpoint
    #[arg(long, env = "CATSERVER_IMAGE_URL")]
    pub image_url: Option<String>,

    /// Timeout for each outbound provider call
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

/// Resolved settings. Precedence: command line, then TOML file, then defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub listen_addr: SocketAddr,
    pub fact_base_url: String,
    pub image_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR,
            fact_base_url: DEFAULT_FACT_BASE_URL.to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: format!("catserver/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

fn parse_listen_addr(field: &str, value: &str) -> Result<SocketAddr> {
    value
        .parse()
        .map_err(|e| CatError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

impl Settings {
    /// Layers the values present in `config` over `self`.
    pub fn merge_toml(mut self, config: &TomlConfig) -> Result<Self> {
        if let Some(addr) = &config.server.listen_addr {
            self.listen_addr = parse_listen_addr("server.listen_addr", addr)?;
        }
        if let Some(base_url) = &config.fact.base_url {
            self.fact_base_url = base_url.clone();
        }
        if let Some(url) = &config.image.url {
            self.image_url = url.clone();
        }
        if let Some(timeout) = config.http.timeout_seconds {
            self.timeout_seconds = timeout;
        }
        if let Some(user_agent) = &config.http.user_agent {
            self.user_agent = user_agent.clone();
        }
        Ok(self)
    }

    #[cfg(feature = "cli")]
    pub fn merge_cli(mut self, cli: &CliConfig) -> Result<Self> {
        if let Some(addr) = &cli.listen_addr {
            self.listen_addr = parse_listen_addr("listen_addr", addr)?;
        }
        if let Some(base_url) = &cli.fact_base_url {
            self.fact_base_url = base_url.clone();
        }
        if let Some(url) = &cli.image_url {
            self.image_url = url.clone();
        }
        if let Some(timeout) = cli.timeout_seconds {
            self.timeout_seconds = timeout;
        }
        Ok(self)
    }

    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let mut settings = Settings::default();
        if let Some(path) = &cli.config {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            settings = settings.merge_toml(&TomlConfig::from_file(path)?)?;
        }
        settings.merge_cli(cli)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("fact_base_url", &self.fact_base_url)?;
        validation::validate_url("image_url", &self.image_url)?;
        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, MAX_TIMEOUT_SECONDS)?;
        validation::validate_non_empty_string("user_agent", &self.user_agent)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }

    fn fact_base_url(&self) -> &str {
        &self.fact_base_url
    }

    fn image_url(&self) -> &str {
        &self.image_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
