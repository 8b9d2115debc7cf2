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

//! API to add a new product to the catalog.

use crate::driver::Driver;
use crate::model::{NewProduct, Product};
use crate::rest::validation::{check_name, check_price, FieldError};
use crate::rest::{ErrorsResponse, RestError};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Confirmation message returned after a successful creation.
const MSG_CREATED: &str = "Se agregaron los datos";

/// Message sent to the server to create a product.
///
/// The fields arrive as free-form JSON values so that the validation pipeline can report every
/// problem with the payload instead of just the first one.
#[derive(Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    /// Name for the new product.
    #[schema(value_type = String, example = "Monitor curvo")]
    name: Option<Value>,

    /// Price for the new product; numeric strings are accepted.
    #[schema(value_type = f64, example = 3.99)]
    price: Option<Value>,
}

/// Message sent back after a successful creation.
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct CreateProductResponse {
    /// The newly created product, including its store-assigned id.
    data: Product,

    /// Human-readable confirmation of the operation.
    msg: String,
}

/// Validation rules for this API's request body.
fn validate(request: &CreateProductRequest) -> Result<NewProduct, Vec<FieldError>> {
    let mut errors = Vec::new();
    let name = check_name(request.name.as_ref(), &mut errors);
    let price = check_price(request.price.as_ref(), &mut errors);
    match (name, price) {
        (Some(name), Some(price)) if errors.is_empty() => Ok(NewProduct::new(name, price)),
        _ => Err(errors),
    }
}

/// POST handler for this API.
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "The product was created", body = CreateProductResponse),
        (status = 400, description = "The payload failed validation", body = ErrorsResponse),
    ),
)]
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, impl IntoResponse), RestError> {
    let new = validate(&request)?;
    let data = driver.create_product(new).await?;
    let response = CreateProductResponse { data, msg: MSG_CREATED.to_owned() };
    Ok((StatusCode::CREATED, Json(response)))
}
