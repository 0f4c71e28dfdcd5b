use crate::error::LeapError;
use crate::error::Result;
use crate::options::SearchOptions;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use strum_macros::Display;
use strum_macros::EnumIter;
use strum_macros::EnumString;

const CONFIG_TOML_FILE: &str = "config.toml";

/// Commands a host binds to keys. Each one opens a search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum LeapCommand {
    #[strum(serialize = "leap.forwardSearch")]
    ForwardSearch,
    #[strum(serialize = "leap.backwardSearch")]
    BackwardSearch,
    #[strum(serialize = "leap.search")]
    Search,
}

impl LeapCommand {
    pub fn options(self) -> SearchOptions {
        match self {
            LeapCommand::ForwardSearch => SearchOptions::forward(),
            LeapCommand::BackwardSearch => SearchOptions::backward(),
            LeapCommand::Search => SearchOptions::bidirectional(),
        }
    }
}

/// User settings from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LeapConfig {
    pub all_editors: bool,
    pub case_sensitive: bool,
}

impl LeapConfig {
    /// Reads `path`; a missing file means defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(LeapError::read_config(path.to_path_buf(), err)),
        };
        toml::from_str(&contents).map_err(|err| LeapError::parse_config(path.to_path_buf(), err))
    }

    pub fn load_from_home() -> Result<Self> {
        Self::load(&find_leap_home()?.join(CONFIG_TOML_FILE))
    }

    pub fn options_for(&self, command: LeapCommand) -> SearchOptions {
        command
            .options()
            .with_all_editors(self.all_editors)
            .with_case_sensitive(self.case_sensitive)
    }
}

/// `$LEAP_HOME` when set and non-empty, otherwise `~/.leap`.
pub fn find_leap_home() -> Result<PathBuf> {
    match std::env::var("LEAP_HOME") {
        Ok(val) if !val.is_empty() => return Ok(PathBuf::from(val)),
        _ => {}
    }
    let mut home = dirs::home_dir().ok_or(LeapError::HomeDirectory)?;
    home.push(".leap");
    Ok(home)
}
