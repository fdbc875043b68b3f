use thiserror::Error;

/// Failure to decode an [`EditionAction`](crate::action::EditionAction) from the wire.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed action json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown action type {0:?}")]
    UnknownType(String),

    #[error("invalid payload for {kind}")]
    InvalidPayload {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} requires a payload")]
    MissingPayload { kind: &'static str },

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<WireError>,
    },

    #[error("failed to read actions")]
    Io(#[from] std::io::Error),
}
