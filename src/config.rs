//=====================================================
// File: config.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Interpreter configuration for ArcanaScript
// Objective: Load seed, loop ceiling, nesting limit and save directory from
//            TOML with environment overrides and sensible defaults
//=====================================================

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::interpreter::rng::DEFAULT_SEED;

/// File name looked up under `<config dir>/arcana/`.
pub const CONFIG_FILE: &str = "arcana.toml";
/// Environment variable that overrides the configured seed.
pub const SEED_ENV: &str = "ARCANA_SEED";

pub const DEFAULT_UNTIL_LIMIT: usize = 10_000;
pub const DEFAULT_MAX_NESTING: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// PRNG seed installed on every reset.
    pub seed: u32,
    /// Iteration ceiling for `until` loops.
    pub until_limit: usize,
    /// Deepest allowed block nesting.
    pub max_nesting: usize,
    /// Where `Scribe` writes files; the working directory when unset.
    pub save_dir: Option<PathBuf>,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            until_limit: DEFAULT_UNTIL_LIMIT,
            max_nesting: DEFAULT_MAX_NESTING,
            save_dir: None,
        }
    }
}

impl InterpreterConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("arcana").join(CONFIG_FILE))
    }

    /// An explicit path must exist; the default location is optional.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_path(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_path(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_seed_override(std::env::var(SEED_ENV).ok().as_deref())?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading configuration from {}", path.display()))?;
        let config: Self = toml::from_str(&data)
            .with_context(|| format!("parsing configuration {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let serialized = toml::to_string_pretty(self)?;
        fs::write(path, serialized)
            .with_context(|| format!("writing configuration to {}", path.display()))?;
        Ok(())
    }

    /// Applies an `ARCANA_SEED`-style override when one is present.
    pub fn apply_seed_override(&mut self, raw: Option<&str>) -> anyhow::Result<()> {
        if let Some(raw) = raw {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                self.seed = trimmed
                    .parse()
                    .with_context(|| format!("{} must be a 32-bit unsigned integer", SEED_ENV))?;
            }
        }
        Ok(())
    }

    pub fn save_dir_or_cwd(&self) -> PathBuf {
        self.save_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}


//=====================================================
// End of file
//=====================================================
