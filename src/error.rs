use std::backtrace::Backtrace;
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// A problem artifact (variable, domain or constraint file) could not be
    /// parsed. `line` is 1-based and includes the header line.
    #[error("{artifact}, line {line}: {message}")]
    Parse {
        artifact: String,
        line: usize,
        message: String,
    },

    #[error("failed to read {artifact}: {source}")]
    Io {
        artifact: String,
        #[source]
        source: std::io::Error,
    },

    /// The strategy name is not one of the recognized search strategies.
    #[error("unknown strategy {0:?}, expected one of: forward-checking, maintaining-arc-consistency, backjumping, min-conflicts")]
    UnknownStrategy(String),

    /// Propagation bookkeeping tried to remove a value that is not in the
    /// current domain. This is a bug in the solver, not a data problem.
    #[error("pruning invariant violated: {0}")]
    Invariant(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<SolverError>,
        backtrace: Box<Backtrace>,
    },
}

impl From<SolverError> for Error {
    fn from(inner: SolverError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}

impl Error {
    /// The underlying solver error, without the captured backtrace.
    pub fn inner(&self) -> &SolverError {
        match self {
            Error::Inner { inner, .. } => inner,
        }
    }
}
