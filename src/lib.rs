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

//! REST service that manages a product catalog.
//!
//! The service adheres to the following layered architecture:
//!
//! 1.  `model`: High-level data types that represent concepts in the domain of
//!     the application, with extensive use of the newtype pattern.
//!
//! 1.  `db`: The persistence layer, offering entity operations on top of a
//!     generic database abstraction.
//!
//! 1.  `driver`: The business logic layer, encapsulating all coordination
//!     against the database.
//!
//! 1.  `rest`: The HTTP layer, offering the REST APIs with one file per API.
//!
//! 1.  `main`: The app launcher, whose sole purpose is to gather configuration
//!     data from environment variables and start the application.
//!
//! There are result and error types in every layer, such as `DbResult` and
//! `DbError`.  Errors transparently float to the top of the app using the `?`
//! operator, being translated to HTTP status codes once returned from the
//! REST layer.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use axum::http::HeaderValue;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub mod db;
use db::Db;
pub mod driver;
use driver::Driver;
pub mod env;
pub(crate) mod model;
mod rest;
use rest::app;

/// Instantiates all resources to serve the application on `bind_addr`.
///
/// The single `frontend_url` is the only origin allowed by the CORS policy.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose
/// many crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db: Box<dyn Db + Send + Sync>,
    frontend_url: &str,
) -> Result<(), Box<dyn Error>> {
    let driver = Driver::new(Arc::from(db));
    let cors = CorsLayer::new()
        .allow_origin(frontend_url.parse::<HeaderValue>()?)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = app(driver).layer(cors);

    let listener = tokio::net::TcpListener::bind(bind_addr.into()).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
