use std::path::PathBuf;
use thiserror::Error;

/// Why a committed jump could not place the caret.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no comparison view shows the target document")]
    TargetNotFound,
    #[error("view group did not become active after {attempts} cycles")]
    GroupResolutionTimeout { attempts: usize },
    #[error("comparison side did not become active after {attempts} switches")]
    SideResolutionTimeout { attempts: usize },
    #[error("jump was cancelled before it completed")]
    Cancelled,
}

#[derive(Debug, Error)]
pub enum LeapError {
    #[error("search needs at least one of forward or backward")]
    NoDirection,
    #[error("failed to read config {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("could not determine the home directory")]
    HomeDirectory,
}

impl LeapError {
    pub(crate) fn read_config(path: PathBuf, source: std::io::Error) -> Self {
        Self::ReadConfig { path, source }
    }

    pub(crate) fn parse_config(path: PathBuf, source: toml::de::Error) -> Self {
        Self::ParseConfig { path, source }
    }
}

pub type Result<T> = std::result::Result<T, LeapError>;
