//! Server settings loaded via OrthoConfig and the assembled server config.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use foodshare::outbound::persistence::DbPool;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
/// Minimum master key length accepted by [`Key::derive_from`].
const SESSION_KEY_MIN_LEN: usize = 32;

/// Errors raised while turning settings into a runnable configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The bind address did not parse as `host:port`.
    #[error("invalid bind address `{value}`: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// The SameSite policy was not one of `strict`, `lax` or `none`.
    #[error("invalid SameSite policy `{0}`; expected strict, lax or none")]
    SameSite(String),
    /// The session key file could not be read and no fallback is allowed.
    #[error("failed to read session key at {path}: {source}")]
    SessionKeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file holds too few bytes to derive a key.
    #[error("session key at {path} must hold at least {min} bytes", min = SESSION_KEY_MIN_LEN)]
    SessionKeyTooShort { path: PathBuf },
}

/// Runtime settings for the HTTP server.
///
/// Values come from `FOODSHARE_*` environment variables, configuration files
/// and command-line flags.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FOODSHARE")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; in-memory stores are used when absent.
    pub database_url: Option<String>,
    /// File holding the session master key.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: Option<bool>,
    /// SameSite policy for the session cookie.
    pub same_site: Option<String>,
    /// Fall back to a generated session key when the key file is missing.
    pub allow_ephemeral_key: Option<bool>,
    /// Seed the demo donor, NGO and admin accounts at startup.
    pub seed_demo_accounts: Option<bool>,
}

impl ServerSettings {
    /// Parse the bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    /// Parse the SameSite policy, defaulting to `Lax`.
    pub fn same_site(&self) -> Result<SameSite, SettingsError> {
        match self.same_site.as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("lax") => Ok(SameSite::Lax),
            Some("strict") => Ok(SameSite::Strict),
            Some("none") => Ok(SameSite::None),
            Some(_) => Err(SettingsError::SameSite(
                self.same_site.clone().unwrap_or_default(),
            )),
        }
    }

    pub fn allow_ephemeral_key(&self) -> bool {
        self.allow_ephemeral_key.unwrap_or(false)
    }

    pub fn seed_demo_accounts(&self) -> bool {
        self.seed_demo_accounts.unwrap_or(true)
    }

    /// Load the session key from [`Self::session_key_file`].
    ///
    /// Debug builds, or release builds with `allow_ephemeral_key`, fall back
    /// to a generated key when the file cannot be read. Sessions then do not
    /// survive a restart.
    pub fn session_key(&self) -> Result<Key, SettingsError> {
        let path = self.session_key_file();
        match read_key(&path) {
            Ok(key) => Ok(key),
            Err(SettingsError::SessionKeyRead { path, source })
                if cfg!(debug_assertions) || self.allow_ephemeral_key() =>
            {
                warn!(path = %path.display(), error = %source, "using temporary session key");
                Ok(Key::generate())
            }
            Err(err) => Err(err),
        }
    }
}

fn read_key(path: &Path) -> Result<Key, SettingsError> {
    let bytes = Zeroizing::new(std::fs::read(path).map_err(|source| {
        SettingsError::SessionKeyRead {
            path: path.to_path_buf(),
            source,
        }
    })?);
    if bytes.len() < SESSION_KEY_MIN_LEN {
        return Err(SettingsError::SessionKeyTooShort {
            path: path.to_path_buf(),
        });
    }
    Ok(Key::derive_from(&bytes))
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) seed_demo_accounts: bool,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            seed_demo_accounts: false,
        }
    }

    /// Attach a database connection pool for the Diesel repositories.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Seed the demo accounts into the user directory at startup.
    #[must_use]
    pub fn with_demo_accounts(mut self, enabled: bool) -> Self {
        self.seed_demo_accounts = enabled;
        self
    }
}
