//! Static game data: dex mods, the format list, and the startup-loaded [`Catalog`].

pub mod abilities;
pub mod dex;
pub mod items;
pub mod moves;
pub mod species;
pub mod stats;

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::format::{load_formats_file, FormatRegistry};

pub use dex::{Dex, Dexes};

pub const DEFAULT_DATA_DIR: &str = "data";

/// Env var overriding the data directory (defaults to [`DEFAULT_DATA_DIR`]).
pub const DATA_DIR_ENV: &str = "TEAMCHECK_DATA_DIR";

/// Read-only bundle of every dex mod and the format registry, loaded once and shared via `Arc`.
#[derive(Debug)]
pub struct Catalog {
    pub dexes: Arc<Dexes>,
    pub formats: Arc<FormatRegistry>,
}

impl Catalog {
    /// Load `<dir>/dex/*` and `<dir>/formats.yaml`. Any malformed file or format
    /// definition is an error.
    pub fn load(dir: impl AsRef<Path>) -> Result<Arc<Catalog>> {
        let dir = dir.as_ref();
        let dexes = Dexes::load(dir.join("dex"))?;
        let file = load_formats_file(dir.join("formats.yaml"))?;
        let formats = FormatRegistry::from_definitions(file.formats, file.aliases, &dexes)?;
        info!(
            data_dir = %dir.display(),
            mods = dexes.len(),
            formats = formats.len(),
            "catalog loaded"
        );
        Ok(Arc::new(Catalog {
            dexes: Arc::new(dexes),
            formats: Arc::new(formats),
        }))
    }

    /// Data directory from `TEAMCHECK_DATA_DIR`, else `data`.
    pub fn data_dir_from_env() -> String {
        std::env::var(DATA_DIR_ENV)
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
    }
}
