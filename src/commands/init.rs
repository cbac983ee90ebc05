use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, CONFIG_DIR_NAME, CONFIG_FILE_NAME};

pub fn run_init(path: &Path, force: bool) -> Result<PathBuf> {
    let base = PathBuf::from(path);
    let dot = base.join(CONFIG_DIR_NAME);
    let cfg_path = dot.join(CONFIG_FILE_NAME);

    if cfg_path.exists() && !force {
        anyhow::bail!("{} already exists; use --force to overwrite", cfg_path.display());
    }

    fs::create_dir_all(&dot).with_context(|| format!("creating {}", dot.display()))?;

    let mut body = String::from("# ocreport configuration\n");
    body.push_str(&Config::default().to_toml_string()?);
    fs::write(&cfg_path, body).with_context(|| format!("writing {}", cfg_path.display()))?;

    println!("Initialized ocreport in {}", base.display());
    println!("Created: {}", cfg_path.display());
    Ok(cfg_path)
}
