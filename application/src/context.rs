//! [`Context`]-related definitions.

use std::sync::OnceLock;

use axum::{async_trait, extract::FromRequestParts};
use juniper::{
    http::{GraphQLBatchResponse, GraphQLResponse},
    IntoFieldError as _,
};

use crate::{Error, JuniperResponse, Service};

/// Context of a single GraphQL request.
#[derive(Debug)]
pub struct Context {
    /// [`Service`] resolving the request.
    service: Service,

    /// [`http::StatusCode`] of the first [`Error`] the request failed with.
    failure: OnceLock<http::StatusCode>,
}

impl Context {
    /// Creates a new [`Context`] resolving a request with the provided
    /// [`Service`].
    #[must_use]
    pub fn new(service: Service) -> Self {
        Self {
            service,
            failure: OnceLock::new(),
        }
    }

    /// Returns the [`Service`] of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Returns the [`http::StatusCode`] of a failed response.
    ///
    /// It's the status of the first [`Error`] passed through
    /// [`Context::error()`], if any.
    #[must_use]
    pub fn error_status_code(&self) -> http::StatusCode {
        self.failure
            .get()
            .copied()
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Returns a [`Result::map_err()`] closure remembering the status of the
    /// [`Error`] it receives.
    ///
    /// Only the first remembered status is applied to the response.
    pub fn error(&self) -> impl FnOnce(Error) -> Error + '_ {
        move |err| {
            _ = self.failure.set(err.status_code);
            err
        }
    }
}

impl juniper::Context for Context {}

#[async_trait]
impl<S> FromRequestParts<S> for Context
where
    S: Send + Sync,
{
    type Rejection = JuniperResponse;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let service = parts.extensions.get::<Service>().cloned();
        service.map(Self::new).ok_or_else(|| {
            let err = Error::internal(&"`Service` is not configured");
            JuniperResponse {
                status_code: err.status_code,
                response: GraphQLBatchResponse::Single(GraphQLResponse::error(
                    err.into_field_error(),
                )),
            }
        })
    }
}
