//! CLI configuration and directory layout

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use maidease_client::ClientConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable prefix, e.g. `MAIDEASE_BASE_URL`
const ENV_PREFIX: &str = "MAIDEASE";

const CONFIG_FILE: &str = "config.toml";
const SESSION_FILE: &str = "session.json";

/// Where the CLI keeps its configuration, session and logs
#[derive(Debug, Clone)]
pub struct Dirs {
    project_dirs: Option<ProjectDirs>,
    /// Replaces both directories when set
    override_dir: Option<PathBuf>,
}

impl Dirs {
    pub fn new(override_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = override_dir {
            return Self {
                project_dirs: None,
                override_dir: Some(dir),
            };
        }

        let project_dirs = ProjectDirs::from("com", "MaidEase", "maidease");
        if project_dirs.is_none() {
            warn!("Failed to determine platform-specific directories, will use fallback");
        }
        Self {
            project_dirs,
            override_dir: None,
        }
    }

    pub fn config_dir(&self) -> PathBuf {
        if let Some(dir) = &self.override_dir {
            return dir.clone();
        }
        match &self.project_dirs {
            Some(dirs) => dirs.config_dir().to_path_buf(),
            None => PathBuf::from("./.maidease"),
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.override_dir {
            return dir.clone();
        }
        match &self.project_dirs {
            Some(dirs) => dirs.data_dir().to_path_buf(),
            None => PathBuf::from("./.maidease"),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir().join(CONFIG_FILE)
    }

    pub fn session_file(&self) -> PathBuf {
        self.data_dir().join(SESSION_FILE)
    }
}

/// Load client settings
///
/// Layers, lowest first: built-in defaults, the config file, `MAIDEASE_*`
/// environment variables. An explicit `path` must exist; the default file is
/// optional.
pub fn load(dirs: &Dirs, path: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    let mut builder = Config::builder();

    // Start with defaults
    builder = builder.add_source(Config::try_from(&ClientConfig::default())?);

    match path {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path));
        }
        None => {
            let default_file = dirs.config_file();
            builder = builder.add_source(File::from(default_file).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    builder.build()?.try_deserialize()
}
