pub mod toml_config;

pub use toml_config::ServiceConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "film-ticket-box")]
#[command(about = "Cinema registry and seat booking HTTP service")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Persist the catalog under this directory
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Keep everything in memory, even if the config file enables storage
    #[arg(long)]
    pub no_persist: bool,

    #[arg(long)]
    pub max_width: Option<u32>,

    #[arg(long)]
    pub max_height: Option<u32>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the config file (if any) and applies the command line overrides.
    pub fn resolve(&self) -> Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::from_file(path)?,
            None => ServiceConfig::default(),
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(data_dir) = &self.data_dir {
            config.storage.enabled = true;
            config.storage.data_dir = data_dir.clone();
        }
        if self.no_persist {
            config.storage.enabled = false;
        }
        if let Some(max_width) = self.max_width {
            config.validation.max_width = max_width;
        }
        if let Some(max_height) = self.max_height {
            config.validation.max_height = max_height;
        }
        config.logging.verbose |= self.verbose;
        config.logging.json |= self.json_logs;

        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;

    #[test]
    fn test_cli_overrides_defaults() {
        let cli = CliConfig::parse_from([
            "film-ticket-box",
            "--port",
            "9999",
            "--data-dir",
            "/tmp/cinemas",
            "--max-width",
            "12",
            "-v",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:9999");
        assert_eq!(config.data_dir(), Some("/tmp/cinemas"));
        assert_eq!(config.max_width(), 12);
        assert_eq!(config.max_height(), 9);
        assert!(config.logging.verbose);
    }

    #[test]
    fn test_no_persist_wins() {
        let cli = CliConfig::parse_from(["film-ticket-box", "--data-dir", "./d", "--no-persist"]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.data_dir(), None);
    }
}
