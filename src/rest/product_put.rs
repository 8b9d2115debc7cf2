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

//! API to replace every mutable field of a product.

use crate::driver::Driver;
use crate::model::{ProductId, ProductUpdate};
use crate::rest::validation::{check_availability, check_id, check_name, check_price, FieldError};
use crate::rest::{ErrorResponse, ErrorsResponse, ProductResponse, RestError};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Message sent to the server to replace a product.
///
/// The fields arrive as free-form JSON values so that the validation pipeline can report every
/// problem with the payload instead of just the first one.
#[derive(Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    /// New name for the product.
    #[schema(value_type = String, example = "Monitor curvo")]
    name: Option<Value>,

    /// New price for the product; numeric strings are accepted.
    #[schema(value_type = f64, example = 3.99)]
    price: Option<Value>,

    /// New availability flag for the product.
    #[schema(value_type = bool, example = true)]
    availability: Option<Value>,
}

/// Validation rules for this API's path and body fields.
fn validate(
    raw_id: &str,
    request: &UpdateProductRequest,
) -> Result<(ProductId, ProductUpdate), Vec<FieldError>> {
    let mut errors = Vec::new();
    let id = check_id(raw_id, &mut errors);
    let name = check_name(request.name.as_ref(), &mut errors);
    let price = check_price(request.price.as_ref(), &mut errors);
    let availability = check_availability(request.availability.as_ref(), &mut errors);
    match (id, name, price, availability) {
        (Some(id), Some(name), Some(price), Some(availability)) if errors.is_empty() => {
            Ok((id, ProductUpdate::new(name, price, availability)))
        }
        _ => Err(errors),
    }
}

/// PUT handler for this API.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Id of the product to update")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "The updated product", body = ProductResponse),
        (status = 400, description = "The id or the payload failed validation",
         body = ErrorsResponse),
        (status = 404, description = "No product has the given id", body = ErrorResponse),
    ),
)]
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, RestError> {
    let (id, update) = validate(&id, &request)?;
    let data = driver.update_product(id, update).await?;
    Ok(Json(ProductResponse { data }))
}
