use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::error::AuthError;
use super::token::TokenRecord;

/// File name used when no path is configured, relative to the working directory.
pub const DEFAULT_TOKEN_FILE: &str = "tsToken.json";

/// Storage abstraction for the single persisted token record.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<TokenRecord>, AuthError>;
    fn save(&self, record: &TokenRecord) -> Result<(), AuthError>;
    fn clear(&self) -> Result<(), AuthError>;

    /// Load, treating every failure as "no token yet".
    fn read(&self) -> Option<TokenRecord> {
        match self.load() {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!(error = %error, "token store read failed, treating as absent");
                None
            }
        }
    }

    /// Save, reporting failure as `false`.
    fn write(&self, record: &TokenRecord) -> bool {
        match self.save(record) {
            Ok(()) => true,
            Err(error) => {
                tracing::error!(error = %error, "token store write failed");
                false
            }
        }
    }
}

/// JSON file-backed token store.
///
/// # Example
/// ```no_run
/// use tsauth::auth::{FileTokenStore, TokenStore};
///
/// let store = FileTokenStore::new("tsToken.json");
/// if let Some(record) = store.read() {
///     println!("{}", record.access_token);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<TokenRecord>, AuthError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(AuthError::Storage(format!(
                    "{}: {err}",
                    self.path.display()
                )))
            }
        };
        let record: TokenRecord = serde_json::from_str(&raw).map_err(|err| {
            AuthError::Storage(format!("{}: {err}", self.path.display()))
        })?;
        Ok(Some(record))
    }

    fn save(&self, record: &TokenRecord) -> Result<(), AuthError> {
        let serialized = serde_json::to_vec_pretty(record)?;
        atomic_write(&self.path, &serialized)
    }

    fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AuthError::Storage(err.to_string())),
        }
    }
}

fn atomic_write(path: &Path, data: &[u8]) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file_name = path.file_name().ok_or_else(|| {
        AuthError::Storage(format!("token path {} has no file name", path.display()))
    })?;

    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let temp_path = path.with_file_name(format!(
        ".{}.tmp-{}-{nonce}",
        file_name.to_string_lossy(),
        std::process::id()
    ));

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let write_result = (|| -> std::io::Result<()> {
        let mut temp_file = options.open(&temp_path)?;
        temp_file.write_all(data)?;
        temp_file.sync_all()?;
        Ok(())
    })();

    if let Err(err) = write_result {
        let _ = fs::remove_file(&temp_path);
        return Err(AuthError::Storage(format!("{}: {err}", path.display())));
    }

    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(AuthError::Storage(format!("{}: {err}", path.display())));
    }

    #[cfg(unix)]
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;

    Ok(())
}
