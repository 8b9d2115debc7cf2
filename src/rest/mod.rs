// Catalog API
// Copyright 2025 The Catalog API Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Entry point to the REST server.
//!
//! Every API is put in its own `.rs` file, using a name like
//! `<entity>_<method>.rs`.  This may seem overkill, but putting every API in
//! its own file makes it easy to ensure all the integration tests for the
//! given API truly belong to that API.
//!
//! More specifically, the `tests` module within an API defines a `route`
//! method that returns the HTTP method and the API path under test.  All
//! integration tests within the module then rely on `route` to obtain this
//! information, ensuring that they all test the desired API.

use crate::driver::{Driver, DriverError};
use crate::model::Product;
use crate::rest::validation::FieldError;
use async_trait::async_trait;
use axum::body::HttpBody;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use log::{error, info};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

mod product_delete;
mod product_get;
mod product_patch;
mod product_put;
mod products_get;
mod products_post;
#[cfg(test)]
mod testutils;
pub(crate) mod validation;

/// Message returned when a product id does not exist.
pub(crate) const MSG_NOT_FOUND: &str = "Producto no encontrado";

/// Generic message returned on unexpected internal failures.  The details stay in the server
/// logs.
pub(crate) const MSG_INTERNAL_ERROR: &str = "Hubo un error";

/// Frontend errors.  These are the errors that are visible to the user on failed requests.
#[derive(Debug, PartialEq, thiserror::Error)]
pub(crate) enum RestError {
    /// Catch-all error type for all unexpected errors.
    #[error("{0}")]
    InternalError(String),

    /// Indicates that a requested entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Indicates that a request that should have empty content did not.
    #[error("Content should be empty")]
    PayloadNotEmpty,

    /// Indicates that one or more request fields failed their checks.
    #[error("Invalid request fields")]
    Validation(Vec<FieldError>),
}

impl From<DriverError> for RestError {
    fn from(e: DriverError) -> Self {
        match e {
            DriverError::AlreadyExists(_) => RestError::InternalError(e.to_string()),
            DriverError::BackendError(_) => RestError::InternalError(e.to_string()),
            DriverError::InvalidInput(_) => RestError::InternalError(e.to_string()),
            DriverError::NotFound(_) => RestError::NotFound(MSG_NOT_FOUND.to_owned()),
        }
    }
}

impl From<Vec<FieldError>> for RestError {
    fn from(errors: Vec<FieldError>) -> Self {
        RestError::Validation(errors)
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> axum::response::Response {
        match self {
            RestError::InternalError(message) => {
                error!("Unhandled error: {}", message);
                let response = ErrorResponse { error: MSG_INTERNAL_ERROR.to_owned() };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
            }
            RestError::NotFound(message) => {
                let response = ErrorResponse { error: message };
                (StatusCode::NOT_FOUND, Json(response)).into_response()
            }
            RestError::PayloadNotEmpty => {
                let response = ErrorResponse { error: "Content should be empty".to_owned() };
                (StatusCode::PAYLOAD_TOO_LARGE, Json(response)).into_response()
            }
            RestError::Validation(errors) => {
                let response = ErrorsResponse { errors };
                (StatusCode::BAD_REQUEST, Json(response)).into_response()
            }
        }
    }
}

/// Representation of the details of an error response.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// Textual representation of the error message.
    pub(crate) error: String,
}

/// Representation of a list of request validation failures.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub(crate) struct ErrorsResponse {
    /// One entry per failed check, in evaluation order.
    pub(crate) errors: Vec<FieldError>,
}

/// Message sent back with a single product's data.
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub(crate) struct ProductResponse {
    /// The current state of the product.
    pub(crate) data: Product,
}

/// A request body extractor that forbids any content.
///
/// Any API that doesn't expect a body should use this to ensure we don't get garbage data that we
/// don't care about.  This future-proofs the service.
pub(crate) struct EmptyBody {}

#[async_trait]
impl<S> FromRequest<S> for EmptyBody
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        if req.into_body().is_end_stream() {
            Ok(EmptyBody {})
        } else {
            Err(RestError::PayloadNotEmpty)
        }
    }
}

/// Logs every request in a single line once its response is ready.
async fn log_request(request: Request, next: Next) -> axum::response::Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    info!("{} {} -> {}", method, uri, response.status());
    response
}

/// OpenAPI documentation for the service.
#[derive(OpenApi)]
#[openapi(
    paths(
        products_get::handler,
        products_post::handler,
        product_get::handler,
        product_put::handler,
        product_patch::handler,
        product_delete::handler,
    ),
    components(schemas(
        Product,
        ErrorResponse,
        ErrorsResponse,
        FieldError,
        ProductResponse,
        products_get::ProductsResponse,
        products_post::CreateProductRequest,
        products_post::CreateProductResponse,
        product_put::UpdateProductRequest,
        product_delete::DeleteProductResponse,
    )),
    tags((name = "products", description = "Product catalog management"))
)]
struct ApiDoc;

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    Router::new()
        .route("/api/products", get(products_get::handler).post(products_post::handler))
        .route(
            "/api/products/:id",
            get(product_get::handler)
                .put(product_put::handler)
                .patch(product_patch::handler)
                .delete(product_delete::handler),
        )
        .merge(SwaggerUi::new("/docs").url("/docs/openapi.json", ApiDoc::openapi()))
        .layer(axum::middleware::from_fn(log_request))
        .with_state(driver)
}
