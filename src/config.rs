use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory created by `ocreport init` inside a project.
pub const CONFIG_DIR_NAME: &str = ".ocreport";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_REPORT_PATH: &str = "sonar-reports/oclint.xml";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    pub path: PathBuf,
    pub base_dir: Option<PathBuf>,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_REPORT_PATH),
            base_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub format: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingSection {
    pub level: Option<String>,
}

/// Contents of `config.toml`. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub report: ReportSection,
    pub output: OutputSection,
    pub logging: LoggingSection,
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut cfg: Config = toml::from_str(s)?;
        if !matches!(cfg.output.format.as_str(), "text" | "json") {
            eprintln!(
                "warning: [output] format = \"{}\" is not one of text|json; using text",
                cfg.output.format
            );
            cfg.output.format = "text".to_string();
        }
        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn load_file(p: &Path) -> Result<Config> {
    let txt = fs::read_to_string(p).with_context(|| format!("reading config {}", p.display()))?;
    Config::from_toml_str(&txt).with_context(|| format!("parsing toml {}", p.display()))
}

/// Candidate config files in lookup order, after any explicit `--config`.
pub fn discovered_paths(project_dir: &Path) -> Vec<PathBuf> {
    let mut paths = vec![project_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)];
    if let Some(mut dir) = dirs_next::config_dir() {
        dir.push("ocreport");
        dir.push(CONFIG_FILE_NAME);
        paths.push(dir);
    }
    paths
}

/// Loads the effective configuration.
///
/// An explicit path must exist and parse. Discovered files that fail to parse
/// are reported on stderr and skipped.
pub fn load_config(explicit: Option<&Path>, project_dir: &Path) -> Result<Config> {
    if let Some(p) = explicit {
        return load_file(p);
    }

    for p in discovered_paths(project_dir) {
        if !p.is_file() {
            continue;
        }
        match load_file(&p) {
            Ok(cfg) => return Ok(cfg),
            Err(e) => eprintln!("warning: ignoring config {}: {:#}", p.display(), e),
        }
    }

    Ok(Config::default())
}
