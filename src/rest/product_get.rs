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

//! API to get one product by its id.

use crate::driver::Driver;
use crate::rest::validation::checked_id;
use crate::rest::{EmptyBody, ErrorResponse, ErrorsResponse, ProductResponse, RestError};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

/// GET handler for this API.
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Id of the product to retrieve")),
    responses(
        (status = 200, description = "The requested product", body = ProductResponse),
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
    let data = driver.get_product(id).await?;
    Ok(Json(ProductResponse { data }))
}
