use anyhow::{Context, Result};
use filler::{FontTable, FontWeight};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Service configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub template_path: PathBuf,
    /// Directory holding the `NotoSans-<Style>.ttf` cuts
    pub font_dir: PathBuf,
    /// `FONT_<class>` entries, replacing the default file for that weight
    pub font_overrides: BTreeMap<FontWeight, PathBuf>,
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{port}'"))?,
            None => 3000,
        };

        let mut font_overrides = BTreeMap::new();
        for weight in FontWeight::ALL {
            if let Some(path) = var(&format!("FONT_{}", weight.class())) {
                font_overrides.insert(weight, PathBuf::from(path));
            }
        }

        Ok(Config {
            port,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            template_path: var("TEMPLATE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("templates/base-adgips.pdf")),
            font_dir: var("FONT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public/fonts/static")),
            font_overrides,
            output_dir: var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
        })
    }

    /// Weight table: Noto Sans under `font_dir`, then per-weight overrides
    pub fn font_table(&self) -> FontTable {
        self.font_overrides
            .iter()
            .fold(FontTable::noto_sans(&self.font_dir), |table, (weight, path)| {
                table.with(*weight, path)
            })
    }
}
