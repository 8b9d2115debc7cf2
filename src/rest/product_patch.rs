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

//! API to flip the availability flag of a product.

use crate::driver::Driver;
use crate::rest::validation::checked_id;
use crate::rest::{EmptyBody, ErrorResponse, ErrorsResponse, ProductResponse, RestError};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

/// PATCH handler for this API.
#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Id of the product to toggle")),
    responses(
        (status = 200, description = "The product with its availability flipped",
         body = ProductResponse),
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
    let data = driver.toggle_availability(id).await?;
    Ok(Json(ProductResponse { data }))
}

#[cfg(test)]
mod tests {
    use crate::rest::testutils::*;
    use crate::rest::validation::MSG_INVALID_ID;
    use crate::rest::{ErrorsResponse, ProductResponse, MSG_NOT_FOUND};
    use axum::http;

    fn route(id: &str) -> (http::Method, String) {
        (http::Method::PATCH, format!("/api/products/{}", id))
    }

    #[tokio::test]
    async fn test_toggle_flips_the_stored_value_both_ways() {
        let context = TestContext::setup().await;

        let product = context.create_product("Monitor", 300.0).await;
        let id = product.id().as_i64();
        assert!(*context.get_product(id).await.availability());

        let response = OneShotBuilder::new(context.app(), route(&id.to_string()))
            .send_empty()
            .await
            .expect_json::<ProductResponse>()
            .await;
        assert!(!*response.data.availability());
        assert!(!*context.get_product(id).await.availability());

        let response = OneShotBuilder::new(context.app(), route(&id.to_string()))
            .send_empty()
            .await
            .expect_json::<ProductResponse>()
            .await;
        assert!(*response.data.availability());
        assert!(*context.get_product(id).await.availability());
    }

    #[tokio::test]
    async fn test_missing() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route("2000"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error(MSG_NOT_FOUND)
            .await;
    }

    #[tokio::test]
    async fn test_invalid_id() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.into_app(), route("not-valid-url"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_json::<ErrorsResponse>()
            .await;
        assert_eq!(1, response.errors.len());
        assert_eq!(MSG_INVALID_ID, response.errors[0].msg);
    }
}
