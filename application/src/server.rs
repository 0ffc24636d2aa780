//! HTTP [`Router`] serving the GraphQL API.

use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    extract::MatchedPath,
    response::{IntoResponse, Response},
    routing::{on, MethodFilter},
    Extension, Json, Router,
};
use axum_client_ip::InsecureClientIp;
use derive_more::Debug;
use http::header::{HeaderValue, InvalidHeaderValue};
use juniper::{http::GraphQLBatchResponse, DefaultScalarValue, ScalarValue};
use juniper_axum::extract::JuniperRequest;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing as log;

use crate::{api, Context, Service};

/// Path the GraphQL API is served on.
pub const GRAPHQL_PATH: &str = "/graphql";

/// Creates a new [`Router`] serving the GraphQL API with the provided
/// [`Service`] to the provided browser origins.
///
/// A `*` origin allows any origin.
///
/// # Errors
///
/// If any of the `allowed_origins` is not a valid header value.
pub fn router(
    service: Service,
    allowed_origins: &[String],
) -> Result<Router, InvalidHeaderValue> {
    let origins = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        allowed_origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?
            .into()
    };
    let cors = CorsLayer::new()
        .allow_methods([http::Method::GET, http::Method::POST])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_origin(origins);

    let schema = api::Schema::new(
        api::Query,
        api::Mutation,
        juniper::EmptySubscription::new(),
    );

    Ok(Router::new()
        .route(
            GRAPHQL_PATH,
            on(MethodFilter::GET.or(MethodFilter::POST), graphql),
        )
        .layer(Extension(Arc::new(schema)))
        .layer(Extension(service))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(record_response),
        ))
}

/// Creates a new [`tracing::Span`] of the provided HTTP request.
fn request_span(req: &http::Request<Body>) -> tracing::Span {
    let client_ip = InsecureClientIp::from(req.headers(), req.extensions())
        .map(|ip| ip.0.to_string())
        .ok();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str);

    log::info_span!(
        "HTTP request",
        http.client_ip = client_ip,
        http.method = req.method().as_str(),
        http.route = route,
        http.status_code = log::field::Empty,
    )
}

/// Records the status of the provided HTTP response into its `span`.
///
/// Client errors are logged as warnings, server errors as errors.
fn record_response(
    res: &http::Response<Body>,
    took: Duration,
    span: &tracing::Span,
) {
    let status = res.status();
    _ = span.record("http.status_code", status.as_u16());

    let took = format!("{}ms", took.as_millis());
    if status.is_server_error() {
        log::error!(duration = took);
    } else if status.is_client_error() {
        log::warn!(duration = took);
    } else {
        log::info!(duration = took);
    }
}

/// [`juniper`] GraphQL response.
#[derive(Debug)]
pub struct JuniperResponse<S = DefaultScalarValue>
where
    S: ScalarValue,
{
    /// Status code of the response if it contains errors.
    pub status_code: http::StatusCode,

    /// Underlying GraphQL response.
    #[debug(skip)]
    pub response: GraphQLBatchResponse<S>,
}

impl<S> IntoResponse for JuniperResponse<S>
where
    S: ScalarValue,
{
    fn into_response(self) -> Response {
        let Self {
            status_code,
            response,
        } = self;

        if response.is_ok() {
            Json(response).into_response()
        } else {
            (status_code, Json(response)).into_response()
        }
    }
}

/// GraphQL API handler.
pub async fn graphql(
    Extension(schema): Extension<Arc<api::Schema>>,
    context: Context,
    JuniperRequest(gql_request): JuniperRequest,
) -> JuniperResponse {
    let response = gql_request.execute(&*schema, &context).await;
    JuniperResponse {
        status_code: context.error_status_code(),
        response,
    }
}

#[cfg(test)]
mod spec {
    use service::infra::{postgres, Postgres};

    use crate::{config, Service};

    use super::router;

    fn service() -> Service {
        let conf = postgres::Config::from(&config::Database::default());
        Service::new(Postgres::new(&conf).unwrap())
    }

    #[test]
    fn accepts_wildcard_origin() {
        let origins = ["*".to_owned(), "https://leases.example.com".to_owned()];

        assert!(router(service(), &origins).is_ok());
    }

    #[test]
    fn accepts_listed_origins() {
        let origins = ["https://leases.example.com".to_owned()];

        assert!(router(service(), &origins).is_ok());
    }

    #[test]
    fn rejects_malformed_origin() {
        let origins = ["https://leases\n.example.com".to_owned()];

        assert!(router(service(), &origins).is_err());
    }
}
