use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::sanitize::{
    FilenameRules, FolderRules, INVALID_CHARACTERS, INVALID_FILENAME_CHARACTERS, MAX_NAME_LENGTH,
};

/// Sanitization settings (optional `[sanitize]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizeConfig {
    /// Text substituted for each illegal character.
    pub replacement: String,
    /// Characters replaced in file names.
    pub filename_illegal_chars: String,
    /// Characters replaced in folder names. `/` and `\` are always separators.
    pub folder_illegal_chars: String,
    /// Separator for local folder paths (None = platform separator).
    pub separator: Option<char>,
    /// Maximum folder path length, in characters.
    pub max_folder_length: usize,
    /// Fail instead of truncating folder paths longer than `max_folder_length`.
    pub strict_path_length: bool,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            replacement: "_".to_string(),
            filename_illegal_chars: INVALID_FILENAME_CHARACTERS.to_string(),
            folder_illegal_chars: INVALID_CHARACTERS.to_string(),
            separator: None,
            max_folder_length: MAX_NAME_LENGTH,
            strict_path_length: false,
        }
    }
}

impl SanitizeConfig {
    pub fn filename_rules(&self) -> FilenameRules {
        FilenameRules {
            replacement: self.replacement.clone(),
            illegal_chars: self.filename_illegal_chars.clone(),
        }
    }

    pub fn folder_rules(&self) -> FolderRules {
        FolderRules {
            replacement: self.replacement.clone(),
            illegal_chars: self
                .folder_illegal_chars
                .chars()
                .filter(|c| *c != '/' && *c != '\\')
                .collect(),
            separator: self.separator.unwrap_or(std::path::MAIN_SEPARATOR),
            max_length: self.max_folder_length,
        }
    }
}

/// Optional overrides for the data directories (`[paths]` in config.toml).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub root: Option<PathBuf>,
    pub data_root: Option<PathBuf>,
    pub raw: Option<PathBuf>,
    pub working: Option<PathBuf>,
    pub outputs: Option<PathBuf>,
    pub logs: Option<PathBuf>,
}

/// Resolved data directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub root: PathBuf,
    pub data_root: PathBuf,
    pub raw: PathBuf,
    pub working: PathBuf,
    pub outputs: PathBuf,
    pub logs: PathBuf,
}

impl DataPaths {
    /// Names accepted by [`DataPaths::get`].
    pub const NAMES: [&'static str; 6] = ["root", "data_root", "raw", "working", "outputs", "logs"];

    /// Fill unset paths: `root` defaults to `base`, `data_root` to `root/data`,
    /// and the rest to subfolders of `data_root`.
    pub fn resolve(cfg: &PathsConfig, base: &Path) -> Self {
        let root = cfg.root.clone().unwrap_or_else(|| base.to_path_buf());
        let data_root = cfg.data_root.clone().unwrap_or_else(|| root.join("data"));
        Self {
            raw: cfg.raw.clone().unwrap_or_else(|| data_root.join("raw")),
            working: cfg.working.clone().unwrap_or_else(|| data_root.join("working")),
            outputs: cfg.outputs.clone().unwrap_or_else(|| data_root.join("outputs")),
            logs: cfg.logs.clone().unwrap_or_else(|| data_root.join("logs")),
            root,
            data_root,
        }
    }

    fn named(&self, name: &str) -> Option<&Path> {
        match name {
            "root" => Some(&self.root),
            "data_root" => Some(&self.data_root),
            "raw" => Some(&self.raw),
            "working" => Some(&self.working),
            "outputs" => Some(&self.outputs),
            "logs" => Some(&self.logs),
            _ => None,
        }
    }

    /// Path called `name`, optionally joined with `subfolder`. Unknown names
    /// fall back to `root`.
    pub fn get(&self, name: &str, subfolder: Option<&str>) -> PathBuf {
        let base = match self.named(name) {
            Some(p) => p,
            None => {
                tracing::error!("no path `{}` found, defaulting to `root`", name);
                &self.root
            }
        };
        match subfolder {
            Some(sub) => base.join(sub),
            None => base.to_path_buf(),
        }
    }

    /// Create every directory except `root`.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.data_root, &self.raw, &self.working, &self.outputs, &self.logs] {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        Ok(())
    }
}

/// Object store connection settings. Secrets come from the environment only
/// and are never written to config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible services.
    pub endpoint_url: Option<String>,
    pub force_path_style: bool,
    #[serde(skip)]
    pub access_key_id: Option<String>,
    #[serde(skip)]
    pub secret_access_key: Option<String>,
    #[serde(skip)]
    pub session_token: Option<String>,
}

/// Global configuration loaded from `~/.config/s3mirror/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub sanitize: SanitizeConfig,
    #[serde(default)]
    pub aws: AwsConfig,
    /// Free-form project settings.
    #[serde(default)]
    pub settings: BTreeMap<String, String>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            paths: PathsConfig::default(),
            sanitize: SanitizeConfig::default(),
            aws: AwsConfig::default(),
            settings: BTreeMap::new(),
        }
    }
}

impl MirrorConfig {
    /// Apply environment overrides read through `lookup`.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = |name: &str| lookup(name).filter(|v| !v.is_empty()).map(PathBuf::from);
        if let Some(p) = path("ROOT_PATH") {
            self.paths.root = Some(p);
        }
        if let Some(p) = path("DATA_ROOT_PATH") {
            self.paths.data_root = Some(p);
        }
        if let Some(p) = path("RAW_PATH") {
            self.paths.raw = Some(p);
        }
        if let Some(p) = path("WORKING_PATH") {
            self.paths.working = Some(p);
        }
        if let Some(p) = path("OUTPUTS_PATH") {
            self.paths.outputs = Some(p);
        }
        if let Some(p) = path("LOGS_PATH") {
            self.paths.logs = Some(p);
        }
        if let Some(level) = lookup("LOG_LEVEL").filter(|v| !v.is_empty()) {
            self.log_level = level;
        }

        self.aws.access_key_id = lookup("AWS_ACCESS_KEY_ID").or(self.aws.access_key_id.take());
        self.aws.secret_access_key =
            lookup("AWS_SECRET_ACCESS_KEY").or(self.aws.secret_access_key.take());
        self.aws.session_token = lookup("AWS_SESSION_TOKEN").or(self.aws.session_token.take());
        if let Some(region) = lookup("AWS_REGION").or_else(|| lookup("AWS_DEFAULT_REGION")) {
            self.aws.region = Some(region);
        }
        if let Some(endpoint) = lookup("AWS_ENDPOINT_URL") {
            self.aws.endpoint_url = Some(endpoint);
        }
    }

    /// Apply overrides from the process environment, after loading `.env`
    /// from the working directory if present.
    pub fn apply_env(&mut self) {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("could not load .env: {}", e),
        }
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// Data directories resolved against `base` (usually the working directory).
    pub fn data_paths(&self, base: &Path) -> DataPaths {
        DataPaths::resolve(&self.paths, base)
    }

    pub fn get_setting(&self, name: &str) -> Option<&str> {
        self.settings.get(name).map(String::as_str)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("s3mirror")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MirrorConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] with an explicit config file path.
pub fn load_or_init_at(path: &Path) -> Result<MirrorConfig> {
    if !path.exists() {
        let default_cfg = MirrorConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: MirrorConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn default_config_values() {
        let cfg = MirrorConfig::default();
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.sanitize.replacement, "_");
        assert_eq!(cfg.sanitize.max_folder_length, 255);
        assert!(!cfg.sanitize.strict_path_length);
        assert!(cfg.settings.is_empty());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = MirrorConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: MirrorConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.log_level, cfg.log_level);
        assert_eq!(parsed.sanitize, cfg.sanitize);
        assert_eq!(parsed.paths, cfg.paths);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            log_level = "debug"

            [paths]
            raw = "/srv/mirror/raw"

            [sanitize]
            replacement = "-"
            separator = "/"
            max_folder_length = 120
            strict_path_length = true

            [aws]
            region = "eu-west-2"

            [settings]
            project = "quarterly"
        "#;
        let cfg: MirrorConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.paths.raw.as_deref(), Some(Path::new("/srv/mirror/raw")));
        assert_eq!(cfg.sanitize.replacement, "-");
        assert_eq!(cfg.sanitize.separator, Some('/'));
        assert_eq!(cfg.sanitize.max_folder_length, 120);
        assert!(cfg.sanitize.strict_path_length);
        assert_eq!(cfg.sanitize.filename_illegal_chars, INVALID_FILENAME_CHARACTERS);
        assert_eq!(cfg.aws.region.as_deref(), Some("eu-west-2"));
        assert_eq!(cfg.get_setting("project"), Some("quarterly"));
        assert_eq!(cfg.get_setting("missing"), None);
    }

    #[test]
    fn secrets_are_not_serialized() {
        let mut cfg = MirrorConfig::default();
        cfg.aws.secret_access_key = Some("hunter2".to_string());
        let toml = toml::to_string_pretty(&cfg).unwrap();
        assert!(!toml.contains("hunter2"));
    }

    #[test]
    fn env_overrides_paths_and_credentials() {
        let mut cfg = MirrorConfig::default();
        cfg.apply_env_with(lookup(&[
            ("ROOT_PATH", "/projects/demo"),
            ("RAW_PATH", "/mnt/raw"),
            ("LOG_LEVEL", "warn"),
            ("AWS_ACCESS_KEY_ID", "AKIA123"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
            ("AWS_REGION", "us-east-1"),
        ]));
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.aws.access_key_id.as_deref(), Some("AKIA123"));
        assert_eq!(cfg.aws.secret_access_key.as_deref(), Some("secret"));
        assert!(cfg.aws.session_token.is_none());
        assert_eq!(cfg.aws.region.as_deref(), Some("us-east-1"));

        let paths = cfg.data_paths(Path::new("/ignored"));
        assert_eq!(paths.root, PathBuf::from("/projects/demo"));
        assert_eq!(paths.data_root, PathBuf::from("/projects/demo/data"));
        assert_eq!(paths.raw, PathBuf::from("/mnt/raw"));
        assert_eq!(paths.logs, PathBuf::from("/projects/demo/data/logs"));
    }

    #[test]
    fn data_paths_default_layout() {
        let paths = DataPaths::resolve(&PathsConfig::default(), Path::new("/work"));
        assert_eq!(paths.root, PathBuf::from("/work"));
        assert_eq!(paths.raw, PathBuf::from("/work/data/raw"));
        assert_eq!(paths.working, PathBuf::from("/work/data/working"));
        assert_eq!(paths.outputs, PathBuf::from("/work/data/outputs"));
    }

    #[test]
    fn data_paths_get_with_subfolder_and_unknown_name() {
        let paths = DataPaths::resolve(&PathsConfig::default(), Path::new("/work"));
        assert_eq!(
            paths.get("outputs", Some("2024")),
            PathBuf::from("/work/data/outputs/2024")
        );
        assert_eq!(paths.get("nope", None), PathBuf::from("/work"));
    }

    #[test]
    fn ensure_dirs_creates_everything_but_root() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::resolve(&PathsConfig::default(), dir.path());
        paths.ensure_dirs().unwrap();
        for name in ["data_root", "raw", "working", "outputs", "logs"] {
            assert!(paths.get(name, None).is_dir(), "{name} missing");
        }
    }

    #[test]
    fn folder_rules_never_treat_separators_as_illegal() {
        let cfg = SanitizeConfig {
            folder_illegal_chars: "/\\:#".to_string(),
            separator: Some('\\'),
            ..SanitizeConfig::default()
        };
        let rules = cfg.folder_rules();
        assert_eq!(rules.illegal_chars, ":#");
        assert_eq!(rules.separator, '\\');
    }

    #[test]
    fn load_or_init_writes_default_then_reads_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let first = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        let second = load_or_init_at(&path).unwrap();
        assert_eq!(first.sanitize, second.sanitize);
        assert_eq!(second.log_level, "info");
    }
}
