//! Command-line parsing for the runner.

use std::path::PathBuf;

use crate::app::RollTarget;

pub const USAGE: &str =
    "usage: spirit77-engine [--no-save] <data.json> <character name> [stat key | item name]\n\
     \n\
     With SPIRIT77_DATA_PATH set, <data.json> may be left out.\n\
     Without a stat or item, the character's derived sheet is printed.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub data_path: PathBuf,
    pub character: String,
    /// `None` prints the sheet instead of rolling
    pub target: Option<RollTarget>,
    pub save: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CliError {
    #[error("{usage}", usage = USAGE)]
    Usage,
    #[error("Unknown flag: {0}\n\n{usage}", usage = USAGE)]
    UnknownFlag(String),
}

impl Invocation {
    /// Parse arguments (without the program name).
    pub fn parse(
        args: impl IntoIterator<Item = String>,
        default_data_path: Option<PathBuf>,
    ) -> Result<Self, CliError> {
        let mut save = true;
        let mut positional = Vec::new();
        for arg in args {
            match arg.as_str() {
                "--no-save" => save = false,
                "-h" | "--help" => return Err(CliError::Usage),
                flag if flag.starts_with("--") => return Err(CliError::UnknownFlag(arg)),
                _ => positional.push(arg),
            }
        }

        let (data_path, character, target) = match (positional.as_slice(), default_data_path) {
            ([path, character, target], _) => (PathBuf::from(path), character, Some(target)),
            ([character, target], Some(path)) => (path, character, Some(target)),
            ([path, character], None) => (PathBuf::from(path), character, None),
            ([character], Some(path)) => (path, character, None),
            _ => return Err(CliError::Usage),
        };

        Ok(Self {
            data_path,
            character: character.clone(),
            target: target.map(|t| RollTarget::parse(t)),
            save,
        })
    }
}
