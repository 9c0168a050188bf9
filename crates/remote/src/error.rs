/// All errors a remote action can return.
///
/// Nothing is retried or swallowed: every failure reaches the caller, and no
/// event is emitted for a failed action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The remote store answered with a non-success status.
    #[error("remote request failed with status {status}")]
    RemoteRequest { status: u16 },

    /// The response body (or a date inside it) could not be understood.
    #[error("failed to parse response: {message}")]
    Parse { message: String },

    /// The request never produced a response (connection, I/O, task join).
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The caller supplied a record lacking data the request needs.
    #[error("missing required field '{field}'")]
    MissingField { field: String },

    /// An amount is NaN or infinite; the store cannot represent it.
    #[error("'{field}' must be a finite number, got {value}")]
    NonFiniteAmount { field: String, value: String },
}

impl RemoteError {
    pub(crate) fn parse(message: impl std::fmt::Display) -> Self {
        RemoteError::Parse {
            message: message.to_string(),
        }
    }

    pub(crate) fn transport(message: impl std::fmt::Display) -> Self {
        RemoteError::Transport {
            message: message.to_string(),
        }
    }

    /// `Ok(amount)` when it can be written as a JSON number.
    pub(crate) fn finite(field: &str, amount: f64) -> Result<f64, Self> {
        if amount.is_finite() {
            Ok(amount)
        } else {
            Err(RemoteError::NonFiniteAmount {
                field: field.to_string(),
                value: amount.to_string(),
            })
        }
    }
}
