use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file looked up in the current directory
const DEFAULT_CONFIG_FILE: &str = "hierarchy.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub prover: ProverConfig,
    #[serde(default)]
    pub diagram: DiagramConfig,
}

/// General settings
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// External prover invocation
#[derive(Debug, Clone, Deserialize)]
pub struct ProverConfig {
    /// Executable compiling the query script, e.g. `coqc`
    #[serde(default = "default_program")]
    pub program: String,
    /// Arguments placed before the load paths and the script path
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Libraries imported when none are given on the command line
    #[serde(default = "default_libs")]
    pub libs: Vec<String>,
}

impl Default for ProverConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            timeout_secs: default_timeout_secs(),
            libs: default_libs(),
        }
    }
}

/// DOT output settings
#[derive(Debug, Clone, Deserialize)]
pub struct DiagramConfig {
    #[serde(default = "default_graph_name")]
    pub graph_name: String,
    /// Label each edge with its witness
    #[serde(default)]
    pub label_witnesses: bool,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            graph_name: default_graph_name(),
            label_witnesses: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_program() -> String {
    "coqc".to_string()
}

fn default_args() -> Vec<String> {
    vec!["-w".to_string(), "none".to_string()]
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_libs() -> Vec<String> {
    vec!["mathcomp.all.all".to_string()]
}

fn default_graph_name() -> String {
    "structures".to_string()
}

impl Config {
    /// Load configuration
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in HIERARCHY_CONFIG environment variable (must exist)
    /// 2. ./hierarchy.toml in current directory
    ///
    /// Falls back to built-in defaults when neither is present.
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignore errors - file is optional)
        let _ = dotenv::dotenv();

        let config_path = match std::env::var("HIERARCHY_CONFIG") {
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            }
        };

        let config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse a config file without validating it
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.prover.program.trim().is_empty() {
            anyhow::bail!("prover.program must not be empty");
        }

        if self.prover.timeout_secs == 0 {
            anyhow::bail!("prover.timeout_secs must be greater than 0");
        }

        if self.prover.libs.is_empty() {
            anyhow::bail!("prover.libs must name at least one library");
        }

        let name = &self.diagram.graph_name;
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            anyhow::bail!(
                "diagram.graph_name must be a non-empty DOT identifier, got {:?}",
                name
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serialize config tests that mutate process-wide cwd and env so they don't race.
    static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

    const TEST_CONFIG: &str = r#"
[general]
log_level = "debug"

[prover]
program = "/opt/coq/bin/coqc"
timeout_secs = 30
libs = ["mathcomp.ssreflect.all_ssreflect", "mathcomp.algebra.all_algebra"]

[diagram]
graph_name = "algebra"
label_witnesses = true
"#;

    /// Restores cwd when dropped (e.g. on panic).
    struct CwdGuard(std::path::PathBuf);
    impl Drop for CwdGuard {
        fn drop(&mut self) {
            let _ = std::env::set_current_dir(&self.0);
        }
    }

    fn with_config_env(config_path: Option<&Path>, f: impl FnOnce()) {
        let original = std::env::var("HIERARCHY_CONFIG").ok();
        match config_path {
            Some(p) => std::env::set_var("HIERARCHY_CONFIG", p),
            None => std::env::remove_var("HIERARCHY_CONFIG"),
        }
        f();
        std::env::remove_var("HIERARCHY_CONFIG");
        if let Some(val) = original {
            std::env::set_var("HIERARCHY_CONFIG", val);
        }
    }

    #[test]
    fn test_config_load_from_env_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("custom.toml");
        fs::write(&config_path, TEST_CONFIG).unwrap();
        with_config_env(Some(&config_path), || {
            let config = Config::load();
            assert!(config.is_ok(), "Config::load() failed: {:?}", config.err());
            let config = config.unwrap();
            assert_eq!(config.general.log_level, "debug");
            assert_eq!(config.prover.program, "/opt/coq/bin/coqc");
            assert_eq!(config.prover.timeout_secs, 30);
            assert_eq!(config.prover.libs.len(), 2);
            // Unset keys keep their defaults
            assert_eq!(config.prover.args, vec!["-w", "none"]);
            assert_eq!(config.diagram.graph_name, "algebra");
            assert!(config.diagram.label_witnesses);
        });
    }

    #[test]
    fn test_config_defaults_without_file() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let original_dir = std::env::current_dir().unwrap();
        let _cwd = CwdGuard(original_dir);
        std::env::set_current_dir(temp_dir.path()).unwrap();
        with_config_env(None, || {
            let config = Config::load().unwrap();
            assert_eq!(config.prover.program, "coqc");
            assert_eq!(config.prover.libs, vec!["mathcomp.all.all"]);
            assert_eq!(config.diagram.graph_name, "structures");
            assert!(!config.diagram.label_witnesses);
        });
    }

    #[test]
    fn test_config_default_file_in_cwd() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILE), TEST_CONFIG).unwrap();
        let original_dir = std::env::current_dir().unwrap();
        let _cwd = CwdGuard(original_dir);
        std::env::set_current_dir(temp_dir.path()).unwrap();
        with_config_env(None, || {
            let config = Config::load().unwrap();
            assert_eq!(config.diagram.graph_name, "algebra");
        });
    }

    #[test]
    fn test_config_rejects_zero_timeout() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.toml");
        fs::write(&config_path, "[prover]\ntimeout_secs = 0\n").unwrap();
        with_config_env(Some(&config_path), || {
            let err = Config::load().unwrap_err();
            assert!(err.to_string().contains("timeout_secs"));
        });
    }

    #[test]
    fn test_config_rejects_bad_graph_name() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.toml");
        fs::write(&config_path, "[diagram]\ngraph_name = \"my graph\"\n").unwrap();
        with_config_env(Some(&config_path), || {
            assert!(Config::load().is_err());
        });
    }

    #[test]
    fn test_config_invalid_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        with_config_env(Some(Path::new("nonexistent.toml")), || {
            let config = Config::load();
            assert!(config.is_err());
        });
    }
}
