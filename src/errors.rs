//! Error taxonomy shared by the persistence and session layers. The variants
//! deliberately distinguish "the environment is broken" (`StorageUnavailable`)
//! from "the data is broken" (`Schema`) because only the latter is fatal at
//! startup; everything else is reported in the footer and the session keeps
//! running.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the review core. UI code wraps these in `anyhow` at the
/// boundary; inside the core they stay typed so callers can branch on them.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The backing file (or its directory) could not be read or written.
    /// Recoverable: the in-memory table is left untouched and the operation
    /// may be retried once the underlying condition is fixed.
    #[error("cannot access {path}: {source}")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing table violates the minimal shape we require (missing id
    /// column, duplicate ids, unreadable rows). Fatal at load time.
    #[error("malformed backing table: {0}")]
    Schema(String),

    /// A jump or patch referenced an id that is not in the table. Reported to
    /// the user, session unaffected.
    #[error("no record with id {0:?}")]
    RecordNotFound(String),

    /// A buffer mutation named an attribute the loaded schema does not have.
    /// This is a programming-contract violation, not an end-user condition.
    #[error("unknown attribute column {0:?}")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, ReviewError>;
