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

//! API to delete a product.

use crate::driver::Driver;
use crate::model::Product;
use crate::rest::validation::checked_id;
use crate::rest::{EmptyBody, ErrorResponse, ErrorsResponse, RestError};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Confirmation message returned after a successful deletion.
const MSG_DELETED: &str = "Producto Eliminado";

/// Message sent back after a successful deletion.
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub(crate) struct DeleteProductResponse {
    /// Human-readable confirmation of the operation.
    msg: String,

    /// The state of the product right before it was deleted.
    data: Product,
}

/// DELETE handler for this API.
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Id of the product to delete")),
    responses(
        (status = 200, description = "The product was deleted", body = DeleteProductResponse),
        (status = 400, description = "The id is not an integer", body = ErrorsResponse),
        (status = 404, description = "No product has the given id", body = ErrorResponse),
    ),
)]
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let id = checked_id(&id)?;
    let data = driver.delete_product(id).await?;
    Ok(Json(DeleteProductResponse { msg: MSG_DELETED.to_owned(), data }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use crate::rest::validation::MSG_INVALID_ID;
    use crate::rest::{ErrorsResponse, MSG_NOT_FOUND};
    use axum::http;

    fn route(id: &str) -> (http::Method, String) {
        (http::Method::DELETE, format!("/api/products/{}", id))
    }

    #[tokio::test]
    async fn test_delete_succeeds_once_and_then_returns_not_found() {
        let context = TestContext::setup().await;

        let product = context.create_product("Monitor", 300.0).await;
        let id = product.id().as_i64();

        let response = OneShotBuilder::new(context.app(), route(&id.to_string()))
            .send_empty()
            .await
            .expect_json::<DeleteProductResponse>()
            .await;
        assert_eq!(MSG_DELETED, response.msg);
        assert_eq!(product, response.data);
        assert!(!context.has_product(id).await);

        OneShotBuilder::new(context.into_app(), route(&id.to_string()))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error(MSG_NOT_FOUND)
            .await;
    }

    #[tokio::test]
    async fn test_missing() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route("200"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error(MSG_NOT_FOUND)
            .await;
    }

    #[tokio::test]
    async fn test_invalid_id() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.into_app(), route("not-valid"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_json::<ErrorsResponse>()
            .await;
        assert_eq!(1, response.errors.len());
        assert_eq!(MSG_INVALID_ID, response.errors[0].msg);
    }
}
