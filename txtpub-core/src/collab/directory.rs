//! Default directory providers

use std::path::{Path, PathBuf};

/// Suggests a directory to start browsing from
pub trait DirectoryProvider: Send + Sync {
    /// Best-effort starting directory, `None` if there is no suggestion
    fn default_dir(&self) -> Option<PathBuf>;
}

/// Never suggests anything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDirectory;

impl DirectoryProvider for NoDirectory {
    fn default_dir(&self) -> Option<PathBuf> {
        None
    }
}

/// The user's documents directory
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentsDirectory;

impl DirectoryProvider for DocumentsDirectory {
    fn default_dir(&self) -> Option<PathBuf> {
        let user_dirs = directories::UserDirs::new()?;
        let documents = user_dirs
            .document_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| user_dirs.home_dir().join("Documents"));
        documents.is_dir().then_some(documents)
    }
}

/// A directory recorded under `key` in a JSON settings file.
///
/// Keys are looked up literally first (editor settings use dotted keys such
/// as `"reader.fileDir"`), then as a dot-separated path into nested objects.
#[derive(Debug, Clone)]
pub struct SettingsFileDirectory {
    path: PathBuf,
    key: String,
}

impl SettingsFileDirectory {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    fn lookup<'a>(&self, settings: &'a serde_json::Value) -> Option<&'a str> {
        if let Some(value) = settings.get(&self.key) {
            return value.as_str();
        }
        self.key
            .split('.')
            .try_fold(settings, |node, part| node.get(part))
            .and_then(serde_json::Value::as_str)
    }
}

impl DirectoryProvider for SettingsFileDirectory {
    fn default_dir(&self) -> Option<PathBuf> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), error = %err, "settings file not readable");
                return None;
            }
        };
        let settings: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), error = %err, "settings file is not valid JSON");
                return None;
            }
        };

        let dir = PathBuf::from(self.lookup(&settings)?);
        if dir.is_dir() {
            Some(dir)
        } else {
            tracing::debug!(dir = %dir.display(), "configured directory does not exist");
            None
        }
    }
}

/// Tries each provider in order and returns the first suggestion
#[derive(Default)]
pub struct FirstAvailable {
    providers: Vec<Box<dyn DirectoryProvider>>,
}

impl FirstAvailable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider to the chain
    pub fn with(mut self, provider: impl DirectoryProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }
}

impl DirectoryProvider for FirstAvailable {
    fn default_dir(&self) -> Option<PathBuf> {
        self.providers.iter().find_map(|provider| provider.default_dir())
    }
}
