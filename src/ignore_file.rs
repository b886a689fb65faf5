use crate::error::Error;
use log::{debug, info};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub(crate) const OUTPUT_FILE_NAME: &str = ".gitignore";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WriteMode {
    Create,
    Overwrite,
    Append,
}

impl WriteMode {
    /// Labels offered when the file already exists.
    pub(crate) const CHOICES: [&'static str; 2] = ["append", "overwrite"];

    pub(crate) fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "append" => Some(WriteMode::Append),
            "overwrite" => Some(WriteMode::Overwrite),
            _ => None,
        }
    }
    pub(crate) fn message(&self) -> &'static str {
        match self {
            WriteMode::Create => "Created new .gitignore file.",
            WriteMode::Overwrite => "Replaced contents of existing .gitignore file.",
            WriteMode::Append => "Appended templates to existing .gitignore file.",
        }
    }
}

/// Writes `content` to `path` according to `mode`.
///
/// Appended content follows the existing bytes directly.
pub(crate) fn persist(path: &Path, mode: WriteMode, content: &[u8]) -> Result<(), Error> {
    let write_error = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut open_options = OpenOptions::new();
    match mode {
        WriteMode::Create => open_options.write(true).create_new(true),
        WriteMode::Overwrite => open_options.write(true).create(true).truncate(true),
        WriteMode::Append => open_options.append(true),
    };
    debug!("opening {} for {:?}", path.display(), mode);
    let mut file = open_options.open(path).map_err(write_error)?;
    file.write_all(content).map_err(write_error)?;
    file.flush().map_err(write_error)?;
    info!("wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
