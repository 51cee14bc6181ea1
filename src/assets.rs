use std::path::{Path, PathBuf};

use iced::widget::image;
use thiserror::Error;

pub const STAR_ICON: &str = "star.png";
pub const RUN_ICON: &str = "run.png";

static STAR_PNG: &[u8] = include_bytes!("../assets/star.png");
static RUN_PNG: &[u8] = include_bytes!("../assets/run.png");

#[derive(Debug, Error)]
#[error("could not load asset `{path}`: {source}")]
pub struct AssetError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[derive(Debug, Clone)]
pub struct Icons {
    pub star: image::Handle,
    pub run: image::Handle,
}

impl Icons {
    pub fn embedded() -> Self {
        Self {
            star: image::Handle::from_bytes(STAR_PNG),
            run: image::Handle::from_bytes(RUN_PNG),
        }
    }

    /// Reads both icons from `dir`; a missing file is an error, not a fallback.
    pub fn from_dir(dir: &Path) -> Result<Self, AssetError> {
        Ok(Self {
            star: image::Handle::from_bytes(read_asset(dir, STAR_ICON)?),
            run: image::Handle::from_bytes(read_asset(dir, RUN_ICON)?),
        })
    }

    pub fn load(asset_dir: Option<&Path>) -> Result<Self, AssetError> {
        match asset_dir {
            Some(dir) => {
                tracing::info!(dir = %dir.display(), "loading icons");
                Self::from_dir(dir)
            }
            None => Ok(Self::embedded()),
        }
    }
}

fn read_asset(dir: &Path, name: &str) -> Result<Vec<u8>, AssetError> {
    let path = dir.join(name);
    std::fs::read(&path).map_err(|source| AssetError { path, source })
}
