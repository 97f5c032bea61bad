// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ledger::{Labels, RecurringIncomeRule};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Fundledger", "fundledger"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub currency: String,
    pub labels: Labels,
    pub recurring_rule: RecurringIncomeRule,
    pub fiscal_year_start_month: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "ILS".into(),
            labels: Labels::default(),
            recurring_rule: RecurringIncomeRule::default(),
            fiscal_year_start_month: 1,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("config.json"))
}

/// Load settings from `explicit` or the platform config file. A missing
/// default file yields defaults; a missing explicit file is an error.
pub fn load_settings(explicit: Option<&str>) -> Result<Settings> {
    match explicit {
        Some(p) => read_settings(Path::new(p.trim())),
        None => {
            let path = config_path()?;
            if path.exists() {
                read_settings(&path)
            } else {
                Ok(Settings::default())
            }
        }
    }
}

fn read_settings(path: &Path) -> Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Read config at {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Parse config at {}", path.display()))?;
    if !(1..=12).contains(&settings.fiscal_year_start_month) {
        anyhow::bail!(
            "fiscal_year_start_month must be 1-12, got {}",
            settings.fiscal_year_start_month
        );
    }
    Ok(settings)
}
