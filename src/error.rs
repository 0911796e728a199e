use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the metadata core.
///
/// Tag-library and plain IO failures pass through untouched; the core assumes
/// it is handed a collaborator-validated path and does not retry anything.
#[derive(Debug, Error)]
pub enum TagError {
    /// The path's extension is outside the supported container set.
    #[error("unsupported file extension ({0})")]
    UnsupportedFormat(String),

    /// An identity was constructed from explicit parts without a last name.
    #[error("identity requires a last name")]
    InvalidIdentity,

    /// Directory-name formatting was attempted on a track with no artists.
    #[error("no artists on track ({}); cannot derive a directory name", .0.display())]
    NoArtist(PathBuf),

    #[error(transparent)]
    Id3(#[from] id3::Error),

    #[error(transparent)]
    Ogg(#[from] lofty::error::LoftyError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TagError>;
