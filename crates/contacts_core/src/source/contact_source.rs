//! Address-book source capability.

use crate::db::DbError;
use crate::model::contact::Contact;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SourceResult<T> = Result<T, SourceError>;

/// Errors raised while reading an address book.
#[derive(Debug)]
pub enum SourceError {
    Db(DbError),
    /// Address book cannot be read, e.g. access was denied.
    Unavailable(String),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "address book read failed: {err}"),
            Self::Unavailable(reason) => write!(f, "address book unavailable: {reason}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for SourceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SourceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Platform address book capable of producing the full contact list.
///
/// `load_contacts` may block; callers run it through
/// [`ContactLoader`](crate::source::loader::ContactLoader).
pub trait ContactSource: Send + Sync {
    /// Short source name used in diagnostics.
    fn source_name(&self) -> &str;

    /// Reads every contact in address-book enumeration order.
    fn load_contacts(&self) -> SourceResult<Vec<Contact>>;
}
