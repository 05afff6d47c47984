//! Indexer error types

/// Failure talking to or mutating the search store.
///
/// `Schema` and `Transport` are fatal to a run; `Store` is per-document
/// and collected so the rest of the batch still gets attempted.
#[derive(Debug)]
pub enum IndexError {
    /// Index creation or deletion rejected by the store (other than
    /// "already exists" / "not found", which are no-ops)
    Schema(String),
    /// One document write failed
    Store { id: String, message: String },
    /// Client construction or request plumbing failed before the store
    /// could answer
    Transport(String),
}

impl IndexError {
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    pub fn store(id: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Store {
            id: id.into(),
            message: msg.into(),
        }
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

impl std::fmt::Display for IndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Schema(msg) => write!(f, "schema operation failed: {msg}"),
            Self::Store { id, message } => write!(f, "upsert of {id} failed: {message}"),
            Self::Transport(msg) => write!(f, "store transport error: {msg}"),
        }
    }
}

impl std::error::Error for IndexError {}
