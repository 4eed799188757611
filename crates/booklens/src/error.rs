pub(crate) type DynError = Box<dyn std::error::Error + Send + Sync>;

/// The Errors that may occur when calling the booklens functions.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    source: Option<DynError>,
}

/// Types of errors that make up an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The error is associated with an underlying filesystem IO error.
    IO,
    /// The remote catalog could not be reached or answered with a failure status.
    Transport,
    /// A payload from the remote catalog does not have the expected shape.
    MalformedPayload,
    /// A single search result cannot be turned into a book and author.
    MalformedResult,
    /// A store refused a write that would break one of the catalog invariants.
    Constraint,
}

impl Error {
    /// Creates a new [`Error`] based on the [`ErrorKind`] and message to describe the error.
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self {
            kind,
            message: Some(message.into()),
            source: None,
        }
    }

    /// Wraps an existing error as the source of [`Error`].
    pub fn wrap<E>(kind: ErrorKind, source: E) -> Self
    where
        E: Into<DynError>,
    {
        Self {
            kind,
            message: None,
            source: Some(source.into()),
        }
    }

    /// Wraps an existing error as the source of [`Error`] with a message giving extra context.
    pub fn wrap_with<E, S>(kind: ErrorKind, source: E, message: S) -> Self
    where
        E: Into<DynError>,
        S: Into<String>,
    {
        Self {
            kind,
            message: Some(message.into()),
            source: Some(source.into()),
        }
    }

    /// Returns the kind of error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Whether the error only means the remote catalog gave nothing usable back.
    ///
    /// These errors are recovered from by the import functions and reported as
    /// [`ImportOutcome::NoMatch`](crate::ImportOutcome::NoMatch).
    #[must_use]
    pub const fn is_unusable_data(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::MalformedPayload | ErrorKind::MalformedResult
        )
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ErrorKind::IO => f.write_str("IO error")?,
            ErrorKind::Transport => f.write_str("Transport error")?,
            ErrorKind::MalformedPayload => f.write_str("Malformed payload")?,
            ErrorKind::MalformedResult => f.write_str("Malformed result")?,
            ErrorKind::Constraint => f.write_str("Constraint violation")?,
        };

        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }

        if let Some(cause) = &self.source {
            write!(f, ": caused by {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| &**e as _)
    }
}
