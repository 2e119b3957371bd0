// Configuration - layered defaults, optional TOML file, environment
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub data: DataSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Embedded,
    Csv,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    pub source: DataSource,
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub filter: String,
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8501)?
        .set_default("data.source", "embedded")?
        .set_default("data.dir", "data")?
        .set_default("log.filter", "info")?)
}

/// Defaults, then `config/dashboard.toml` if present, then `DASHBOARD__*`
/// environment variables (e.g. `DASHBOARD__SERVER__PORT=9000`)
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = builder()?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: AppConfig = builder().unwrap().build().unwrap().try_deserialize().unwrap();

        assert_eq!(config.server.port, 8501);
        assert_eq!(config.server.bind_address(), "127.0.0.1:8501");
        assert_eq!(config.data.source, DataSource::Embedded);
        assert_eq!(config.data.dir, PathBuf::from("data"));
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let toml = "[server]\nport = 9000\n\n[data]\nsource = \"csv\"\ndir = \"/srv/econ\"\n";
        let config: AppConfig = builder()
            .unwrap()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.data.source, DataSource::Csv);
        assert_eq!(config.data.dir, PathBuf::from("/srv/econ"));
    }
}
