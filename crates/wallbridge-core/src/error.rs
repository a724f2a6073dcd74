//! Bridge errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::status::Status;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("image path is empty")]
    EmptyPath,

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("cannot read {path:?}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?} is not a recognised image")]
    UnsupportedFormat { path: PathBuf },

    #[error("no supported desktop shell detected")]
    NoShell,

    #[error("desktop shell reported no displays")]
    NoTargets,

    #[error("desktop shell error: {0}")]
    Shell(String),

    #[error("wallpaper was not applied on {failed} of {attempted} targets")]
    SetFailed { attempted: usize, failed: usize },

    #[error("current wallpaper unavailable: {reason}")]
    QueryUnavailable { reason: String },
}

impl BridgeError {
    pub fn status(&self) -> Status {
        match self {
            Self::EmptyPath => Status::EmptyPath,
            Self::InvalidArgument(_) => Status::InvalidArgument,
            Self::Unreadable { .. } => Status::Unreadable,
            Self::UnsupportedFormat { .. } => Status::UnsupportedFormat,
            Self::NoShell => Status::NoShell,
            Self::NoTargets => Status::NoTargets,
            Self::Shell(_) | Self::SetFailed { .. } => Status::ApplyFailed,
            Self::QueryUnavailable { .. } => Status::QueryUnavailable,
        }
    }

    /// True for errors raised before any host call was made.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            Self::EmptyPath
                | Self::InvalidArgument(_)
                | Self::Unreadable { .. }
                | Self::UnsupportedFormat { .. }
        )
    }
}
