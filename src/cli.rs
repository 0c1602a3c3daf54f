use clap::Parser;
use std::path::PathBuf;
use threadscope_core::{AppConfig, CoreError};

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Ask a question, browse matching Reddit threads, and group subreddits into audiences"
)]
pub struct Args {
    /// TOML configuration file (defaults to ./threadscope.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base URL of the search backend, e.g. http://localhost:5000/api
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Give up on backend requests after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl Args {
    /// File and environment first, then flags on top.
    pub fn load_config(&self) -> Result<AppConfig, CoreError> {
        let mut config = AppConfig::load(self.config.as_deref())?;

        if let Some(url) = &self.backend_url {
            config.backend_url = url.clone();
        }
        if let Some(seconds) = self.timeout_secs {
            config.request_timeout_secs = Some(seconds);
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "threadscope",
            "--backend-url",
            "http://127.0.0.1:8080/api",
            "--timeout-secs",
            "5",
        ]);

        let config = args.load_config().unwrap();
        assert_eq!(config.backend_url, "http://127.0.0.1:8080/api");
        assert_eq!(config.request_timeout_secs, Some(5));
    }

    #[test]
    fn test_invalid_flag_value_is_rejected() {
        let args = Args::parse_from(["threadscope", "--backend-url", "localhost"]);
        assert!(args.load_config().is_err());
    }
}
