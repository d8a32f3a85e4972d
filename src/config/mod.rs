// Configuration module entry point
// Loads and validates the immutable startup configuration

mod types;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

// Re-export public types
pub use types::{Config, LoggingConfig, PerformanceConfig, ServeConfig, ServerConfig};

/// Default TCP port, used when neither config nor CLI provide one
pub const DEFAULT_PORT: u16 = 8000;

impl Config {
    /// Load configuration from the default locations
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("spa-serve")
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// Layering: built-in defaults, then an optional config file, then
    /// `SERVE_*` environment variables. Nested keys use a double
    /// underscore (`SERVE_SERVER__PORT` sets `server.port`) so snake_case
    /// key names stay unambiguous.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SERVE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("serve.root", "build/web")?
            .set_default("serve.fallback", "index.html")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    /// Apply a positional port argument on top of the loaded configuration.
    ///
    /// An unparsable value is recovered locally: the configured port is
    /// kept and a warning string is returned for the caller to log.
    pub fn apply_port_arg(&mut self, arg: Option<&str>) -> Option<String> {
        let raw = arg?;
        match raw.parse::<u16>() {
            Ok(port) => {
                self.server.port = port;
                None
            }
            Err(_) => Some(format!(
                "Invalid port: {raw}. Using default port {}",
                self.server.port
            )),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// The directory whose contents are exposed over HTTP
    pub fn serve_root(&self) -> &Path {
        Path::new(&self.serve.root)
    }

    /// Full path of the fallback document
    pub fn fallback_path(&self) -> PathBuf {
        self.serve_root().join(&self.serve.fallback)
    }

    /// Verify the serve root exists before binding any socket.
    ///
    /// A missing build directory is a fatal configuration error; the
    /// message names the path so the operator knows what to build.
    pub fn ensure_serve_root(&self) -> Result<(), String> {
        if self.serve_root().is_dir() {
            Ok(())
        } else {
            Err(format!(
                "Serve directory not found: {}",
                self.serve_root().display()
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(root: &str) -> Config {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: DEFAULT_PORT,
                workers: None,
            },
            serve: ServeConfig {
                root: root.to_string(),
                fallback: "index.html".to_string(),
            },
            logging: LoggingConfig {
                access_log: true,
                access_log_file: None,
                error_log_file: None,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
            },
        }
    }

    #[test]
    fn test_port_arg_valid() {
        let mut cfg = test_config(".");
        assert!(cfg.apply_port_arg(Some("3000")).is_none());
        assert_eq!(cfg.server.port, 3000);
    }

    #[test]
    fn test_port_arg_invalid_keeps_default() {
        let mut cfg = test_config(".");
        let warning = cfg.apply_port_arg(Some("eighty"));
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("eighty"));
        assert_eq!(cfg.server.port, DEFAULT_PORT);
    }

    #[test]
    fn test_port_arg_absent() {
        let mut cfg = test_config(".");
        assert!(cfg.apply_port_arg(None).is_none());
        assert_eq!(cfg.server.port, DEFAULT_PORT);
    }

    #[test]
    fn test_env_overrides_nested_keys() {
        // Only this test touches SERVE_* vars, so no cross-test races
        std::env::set_var("SERVE_SERVER__PORT", "9123");
        let cfg = Config::load_from("no-such-config-file").unwrap();
        std::env::remove_var("SERVE_SERVER__PORT");
        assert_eq!(cfg.server.port, 9123);
    }

    #[test]
    fn test_missing_serve_root_is_fatal() {
        let cfg = test_config("definitely/not/a/real/build/dir");
        let err = cfg.ensure_serve_root().unwrap_err();
        assert!(err.contains("definitely/not/a/real/build/dir"));
    }

    #[test]
    fn test_fallback_path_joins_root() {
        let cfg = test_config("build/web");
        assert_eq!(
            cfg.fallback_path(),
            Path::new("build/web").join("index.html")
        );
    }
}
