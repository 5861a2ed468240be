use crate::{
    app_lib::{AppConfig, config::default_session_dir},
    cli::commands::api,
    features::auth::{FileStorage, Gateway, SessionStorage, SessionStore},
};
use anyhow::{Context, Result};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing::debug;

/// Connection settings shared by every subcommand.
#[derive(Clone, Debug)]
pub struct GlobalArgs {
    pub api_url: String,
    pub session_dir: PathBuf,
    pub timeout: Duration,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String, session_dir: PathBuf, timeout: Duration) -> Self {
        Self {
            api_url,
            session_dir,
            timeout,
        }
    }

    /// # Errors
    /// Returns an error if no API URL was given on the command line or in the environment.
    pub fn from_options(options: api::Options) -> Result<Self> {
        let api_url = options
            .api_url
            .context("missing required argument: --api-url (or CIVICLINK_API_URL)")?;
        Ok(Self::new(
            api_url,
            options.session_dir.unwrap_or_else(default_session_dir),
            Duration::from_secs(options.timeout_seconds),
        ))
    }

    #[must_use]
    pub fn config(&self) -> AppConfig {
        AppConfig::new(self.api_url.clone())
            .with_session_dir(self.session_dir.clone())
            .with_timeout(self.timeout)
    }

    /// Opens the saved session from the session directory.
    ///
    /// # Errors
    /// Returns an error if the config is invalid or the session files cannot be read.
    pub fn open_session(&self) -> Result<Arc<SessionStore>> {
        let config = self.config();
        let storage: Arc<dyn SessionStorage> = Arc::new(FileStorage::new(&config.session_dir));
        debug!(session_dir = %config.session_dir.display(), "opening session");
        let session = SessionStore::open(config, storage).context("failed to open session")?;
        Ok(Arc::new(session))
    }

    /// # Errors
    /// Returns an error if the session cannot be opened.
    pub fn gateway(&self) -> Result<Gateway> {
        Ok(Gateway::new(self.open_session()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use tempfile::TempDir;

    #[test]
    fn test_global_args() -> Result<()> {
        let tmp = TempDir::new()?;
        let args = GlobalArgs::new(
            "https://api.civiclink.lk".to_string(),
            tmp.path().to_path_buf(),
            Duration::from_secs(5),
        );
        let config = args.config();
        assert_eq!(config.api_base_url, "https://api.civiclink.lk");
        assert_eq!(config.session_dir, tmp.path());
        assert_eq!(config.timeout, Duration::from_secs(5));

        let session = args.open_session()?;
        assert!(!session.is_authenticated());
        Ok(())
    }

    #[test]
    fn test_missing_api_url() -> Result<()> {
        let err = GlobalArgs::from_options(api::Options {
            api_url: None,
            session_dir: None,
            timeout_seconds: 10,
        })
        .err()
        .ok_or_else(|| anyhow!("expected error"))?;
        assert!(err.to_string().contains("--api-url"));
        Ok(())
    }

    #[test]
    fn test_invalid_api_url() -> Result<()> {
        let tmp = TempDir::new()?;
        let args = GlobalArgs::new(
            "ftp://files.civiclink.lk".to_string(),
            tmp.path().to_path_buf(),
            Duration::from_secs(5),
        );
        assert!(args.open_session().is_err());
        Ok(())
    }
}
