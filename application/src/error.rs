//! [`Error`]-related definitions.

use std::{fmt, num::TryFromIntError};

use derive_more::Error as StdError;
use juniper::{FieldError, IntoFieldError, Object, Value};
use service::infra::database::{self, postgres};
use tracerr::{Trace, Traced};

/// Defines a new error type, each variant of which is an [`Error`] with a
/// fixed code, status and message.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        $(#[$attr:meta])*
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[status = $status_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self::new(
                            $code,
                            ::http::StatusCode::$status_code,
                            $message,
                        ),
                    )*
                }
            }
        }
    };
}

/// GraphQL API [`Error`].
///
/// Reported in the `errors` of a GraphQL response, with its [`Code`] and
/// HTTP status placed into the `extensions`.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`http::StatusCode`] of this [`Error`].
    pub status_code: http::StatusCode,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Creates a new [`Error`] without any backtrace.
    #[must_use]
    pub fn new(
        code: Code,
        status_code: http::StatusCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            status_code,
            backtrace: None,
            message: message.into(),
        }
    }

    /// Creates a new [`Error`] caused by invalid client input.
    #[must_use]
    pub fn bad_request(code: Code, message: &impl ToString) -> Self {
        Self::new(code, http::StatusCode::BAD_REQUEST, message.to_string())
    }

    /// Creates a new [`Error`] representing an internal server error.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self::new(
            "INTERNAL_SERVER_ERROR",
            http::StatusCode::INTERNAL_SERVER_ERROR,
            msg.to_string(),
        )
    }

    /// Attaches the provided [`Trace`] to this [`Error`].
    #[must_use]
    pub fn with_backtrace(mut self, trace: Trace) -> Self {
        self.backtrace = Some(trace);
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.code, self.message)?;
        for frame in self.backtrace.iter().flat_map(|t| t.iter()) {
            write!(f, "\n{frame}")?;
        }
        Ok(())
    }
}

impl<S> IntoFieldError<S> for Error
where
    S: From<String> + From<i32>,
{
    fn into_field_error(self) -> FieldError<S> {
        let Self {
            code,
            status_code,
            backtrace,
            message,
        } = self;

        let frames = backtrace
            .iter()
            .flat_map(|trace| trace.iter())
            .map(|frame| Value::scalar(frame.to_string()))
            .collect();

        let mut ext = Object::with_capacity(3);
        _ = ext.add_field("code", Value::scalar(code.to_owned()));
        _ = ext.add_field(
            "status",
            Value::scalar(i32::from(status_code.as_u16())),
        );
        _ = ext.add_field("backtrace", Value::list(frames));

        FieldError::new(message, Value::object(ext))
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`], falling back to an internal one.
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        self.as_ref()
            .try_as_error()
            .map(|e| e.with_backtrace(self.trace().clone()))
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Postgres(postgres::Error::PoolError(_)) => {
                Some(DatabaseError::Unavailable.into())
            }
            Self::Postgres(
                postgres::Error::Connection(_)
                | postgres::Error::PoolCreationError(_),
            ) => None,
        }
    }
}

impl AsError for TryFromIntError {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

define_error! {
    /// [`Error`] of reaching the database.
    enum DatabaseError {
        #[code = "DATABASE_UNAVAILABLE"]
        #[status = SERVICE_UNAVAILABLE]
        #[message = "Lease storage is temporarily unavailable"]
        Unavailable,
    }
}
