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

//! High-level data types for the product catalog.

use derive_getters::Getters;
use derive_more::Constructor;
use serde::Serialize;
use utoipa::ToSchema;

/// Errors caused by invalid data when constructing model types.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for this module.
pub type ModelResult<T> = Result<T, ModelError>;

/// Identifier of a product as assigned by the store on creation.
///
/// Identifiers are never reused: once a product is deleted, its identifier is
/// retired forever.
#[derive(Clone, Copy, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[cfg_attr(test, derive(Debug, serde::Deserialize))]
#[serde(transparent)]
pub(crate) struct ProductId(i64);

impl ProductId {
    /// Creates an identifier from a raw database value.
    pub(crate) fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the identifier as an `i64` for database queries.
    pub(crate) fn as_i64(&self) -> i64 {
        self.0
    }
}

/// Represents a valid product name.
#[derive(Clone, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[cfg_attr(test, derive(Debug, serde::Deserialize))]
#[serde(transparent)]
pub(crate) struct ProductName(String);

impl ProductName {
    /// Creates a new product name from an untrusted string `s`, making sure it
    /// is not empty.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(ModelError("Product name cannot be empty".to_owned()));
        }
        Ok(Self(s))
    }

    /// Returns a string view of the product name.
    pub(crate) fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Represents a valid product price.
#[derive(Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[cfg_attr(test, derive(Debug, serde::Deserialize))]
#[serde(transparent)]
pub(crate) struct Price(f64);

impl Price {
    /// Creates a new price from an untrusted value `v`, making sure it is a
    /// finite number strictly greater than zero.
    pub(crate) fn new(v: f64) -> ModelResult<Self> {
        if !v.is_finite() {
            return Err(ModelError(format!("Price must be a finite number, not {}", v)));
        }
        if v <= 0.0 {
            return Err(ModelError(format!("Price must be greater than zero, not {}", v)));
        }
        Ok(Self(v))
    }

    /// Returns the raw value of the price.
    pub(crate) fn value(&self) -> f64 {
        self.0
    }
}

/// A product as exposed by the API.
///
/// The store also maintains creation and modification timestamps for every
/// product, but those never leave the database so they are not part of this
/// type.
#[derive(Constructor, Getters, Serialize, ToSchema)]
#[cfg_attr(test, derive(Clone, Debug, serde::Deserialize, PartialEq))]
pub(crate) struct Product {
    /// Identifier assigned by the store on creation.
    #[schema(value_type = i64, example = 1)]
    id: ProductId,

    /// The product's display name.
    #[schema(value_type = String, example = "Monitor curvo de 29 pulgadas")]
    name: ProductName,

    /// The product's unit price.
    #[schema(value_type = f64, example = 300.0)]
    price: Price,

    /// Whether the product is currently in stock.
    #[schema(example = true)]
    availability: bool,
}

/// Fields needed to create a new product.
///
/// The availability flag is not part of the request: the store defaults it to
/// true for every new product.
#[derive(Constructor, Getters)]
#[cfg_attr(test, derive(Debug))]
pub(crate) struct NewProduct {
    /// Name for the new product.
    name: ProductName,

    /// Price for the new product.
    price: Price,
}

/// Replacement values for every mutable field of a product.
#[derive(Constructor, Getters)]
#[cfg_attr(test, derive(Debug))]
pub(crate) struct ProductUpdate {
    /// New name for the product.
    name: ProductName,

    /// New price for the product.
    price: Price,

    /// New availability flag for the product.
    availability: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_productname_ok() {
        assert_eq!("Monitor curvo", ProductName::new("Monitor curvo").unwrap().as_str());
        assert_eq!(" ", ProductName::new(" ").unwrap().as_str());
    }

    #[test]
    fn test_productname_error() {
        assert!(ProductName::new("").is_err());
    }

    #[test]
    fn test_price_ok() {
        assert_eq!(0.01, Price::new(0.01).unwrap().value());
        assert_eq!(300.0, Price::new(300.0).unwrap().value());
    }

    #[test]
    fn test_price_error() {
        assert!(Price::new(0.0).is_err());
        assert!(Price::new(-300.0).is_err());
        assert!(Price::new(f64::NAN).is_err());
        assert!(Price::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_product_serialized_shape() {
        let product = Product::new(
            ProductId::new(5),
            ProductName::new("Teclado").unwrap(),
            Price::new(19.99).unwrap(),
            true,
        );
        let value = serde_json::to_value(&product).unwrap();

        let object = value.as_object().unwrap();
        let keys = object.keys().map(String::as_str).collect::<Vec<&str>>();
        assert_eq!(vec!["availability", "id", "name", "price"], keys);

        assert_eq!(5, value["id"]);
        assert_eq!("Teclado", value["name"]);
        assert_eq!(19.99, value["price"]);
        assert_eq!(true, value["availability"]);
    }
}
