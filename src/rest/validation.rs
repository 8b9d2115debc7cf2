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

//! Validation pipeline for inbound request fields.
//!
//! Each field is checked against an ordered list of (predicate, message)
//! pairs.  Every failing check contributes its own entry to the error list,
//! so a single field can report more than one problem at once, and checks
//! never short-circuit within a request.  Routes declare which checkers to
//! run, in which order, in their own API files; the accumulated list becomes
//! a 400 response via `RestError::Validation` when it is not empty.

use crate::model::{Price, ProductId, ProductName};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Location tag for errors on body fields.
const LOCATION_BODY: &str = "body";

/// Location tag for errors on path parameters.
const LOCATION_PARAMS: &str = "params";

/// Message returned when a path id is not an integer.
pub(crate) const MSG_INVALID_ID: &str = "ID no valido";

/// Message returned when the product name is missing or empty.
pub(crate) const MSG_NAME_EMPTY: &str = "EL nombre del Producto no puede ir vacio";

/// Message returned when the price is not a number.
pub(crate) const MSG_PRICE_NOT_NUMERIC: &str = "Valor no valido";

/// Message returned when the price is missing or empty.
pub(crate) const MSG_PRICE_EMPTY: &str = "El precio del Producto no puede ir vacio";

/// Message returned when the price is not strictly greater than zero.
pub(crate) const MSG_PRICE_NOT_POSITIVE: &str = "El valor no puede ser negativo";

/// Message returned when the availability flag is not a boolean.
pub(crate) const MSG_AVAILABILITY_NOT_BOOLEAN: &str = "Valor para disponibilidad no válido";

/// A single failed check on a request field.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub(crate) struct FieldError {
    /// Where the offending field was found (`body` or `params`).
    pub(crate) location: String,

    /// Human-readable description of the failed check.
    pub(crate) msg: String,

    /// Name of the offending field.
    pub(crate) path: String,

    /// The received value, when one was present.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub(crate) value: Option<Value>,
}

/// Records a failed check on `path` against the error list.
fn push_error(
    errors: &mut Vec<FieldError>,
    location: &str,
    path: &str,
    msg: &str,
    value: Option<&Value>,
) {
    errors.push(FieldError {
        location: location.to_owned(),
        msg: msg.to_owned(),
        path: path.to_owned(),
        value: value.cloned(),
    });
}

/// Checks whether a field value counts as empty (missing, null or the empty string).
fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Extracts the numeric value of a field, accepting both numbers and numeric strings.
fn as_number(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Checks the name field rules: the name must not be empty.
pub(crate) fn check_name(
    value: Option<&Value>,
    errors: &mut Vec<FieldError>,
) -> Option<ProductName> {
    if is_empty(value) {
        push_error(errors, LOCATION_BODY, "name", MSG_NAME_EMPTY, value);
        return None;
    }

    let raw = match value {
        Some(Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
        None => unreachable!("The missing case counts as empty"),
    };
    match ProductName::new(raw) {
        Ok(name) => Some(name),
        Err(_) => {
            push_error(errors, LOCATION_BODY, "name", MSG_NAME_EMPTY, value);
            None
        }
    }
}

/// Checks the price field rules: the price must be numeric, not empty, and strictly positive.
pub(crate) fn check_price(value: Option<&Value>, errors: &mut Vec<FieldError>) -> Option<Price> {
    let number = as_number(value);

    if number.is_none() {
        push_error(errors, LOCATION_BODY, "price", MSG_PRICE_NOT_NUMERIC, value);
    }
    if is_empty(value) {
        push_error(errors, LOCATION_BODY, "price", MSG_PRICE_EMPTY, value);
    }
    match number.and_then(|n| Price::new(n).ok()) {
        Some(price) => Some(price),
        None => {
            push_error(errors, LOCATION_BODY, "price", MSG_PRICE_NOT_POSITIVE, value);
            None
        }
    }
}

/// Checks the availability field rules: the flag must be a boolean.
pub(crate) fn check_availability(
    value: Option<&Value>,
    errors: &mut Vec<FieldError>,
) -> Option<bool> {
    let flag = match value {
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::String(s)) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        _ => None,
    };
    if flag.is_none() {
        push_error(errors, LOCATION_BODY, "availability", MSG_AVAILABILITY_NOT_BOOLEAN, value);
    }
    flag
}

/// Checks that the raw path id is a base-10 integer.
pub(crate) fn check_id(raw: &str, errors: &mut Vec<FieldError>) -> Option<ProductId> {
    match raw.parse::<i64>() {
        Ok(id) => Some(ProductId::new(id)),
        Err(_) => {
            let value = Value::String(raw.to_owned());
            push_error(errors, LOCATION_PARAMS, "id", MSG_INVALID_ID, Some(&value));
            None
        }
    }
}

/// Convenience wrapper for routes whose only validated input is the path id.
pub(crate) fn checked_id(raw: &str) -> Result<ProductId, Vec<FieldError>> {
    let mut errors = Vec::new();
    match check_id(raw, &mut errors) {
        Some(id) => Ok(id),
        None => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Collects the messages accumulated by a checker run.
    fn messages(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.msg.as_str()).collect()
    }

    #[test]
    fn test_check_name_ok() {
        let mut errors = Vec::new();
        let name = check_name(Some(&json!("Monitor curvo")), &mut errors);
        assert_eq!("Monitor curvo", name.unwrap().as_str());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_check_name_missing_or_empty() {
        for value in [None, Some(json!(null)), Some(json!(""))] {
            let mut errors = Vec::new();
            assert!(check_name(value.as_ref(), &mut errors).is_none());
            assert_eq!(vec![MSG_NAME_EMPTY], messages(&errors));
        }
    }

    #[test]
    fn test_check_price_ok() {
        for value in [json!(50), json!(3.99), json!("50")] {
            let mut errors = Vec::new();
            assert!(check_price(Some(&value), &mut errors).is_some());
            assert!(errors.is_empty(), "Unexpected errors for {}: {:?}", value, errors);
        }
    }

    #[test]
    fn test_check_price_missing_stacks_all_errors() {
        let mut errors = Vec::new();
        assert!(check_price(None, &mut errors).is_none());
        assert_eq!(
            vec![MSG_PRICE_NOT_NUMERIC, MSG_PRICE_EMPTY, MSG_PRICE_NOT_POSITIVE],
            messages(&errors)
        );
    }

    #[test]
    fn test_check_price_zero_fails_only_the_positive_check() {
        let mut errors = Vec::new();
        assert!(check_price(Some(&json!(0)), &mut errors).is_none());
        assert_eq!(vec![MSG_PRICE_NOT_POSITIVE], messages(&errors));
    }

    #[test]
    fn test_check_price_negative_fails_only_the_positive_check() {
        let mut errors = Vec::new();
        assert!(check_price(Some(&json!(-300)), &mut errors).is_none());
        assert_eq!(vec![MSG_PRICE_NOT_POSITIVE], messages(&errors));
    }

    #[test]
    fn test_check_price_non_numeric_string() {
        let mut errors = Vec::new();
        assert!(check_price(Some(&json!("hola")), &mut errors).is_none());
        assert_eq!(vec![MSG_PRICE_NOT_NUMERIC, MSG_PRICE_NOT_POSITIVE], messages(&errors));
    }

    #[test]
    fn test_check_availability_ok() {
        let mut errors = Vec::new();
        assert_eq!(Some(true), check_availability(Some(&json!(true)), &mut errors));
        assert_eq!(Some(false), check_availability(Some(&json!(false)), &mut errors));
        assert_eq!(Some(true), check_availability(Some(&json!("true")), &mut errors));
        assert_eq!(Some(false), check_availability(Some(&json!(0)), &mut errors));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_check_availability_invalid() {
        for value in [None, Some(json!(null)), Some(json!("yes")), Some(json!(42))] {
            let mut errors = Vec::new();
            assert!(check_availability(value.as_ref(), &mut errors).is_none());
            assert_eq!(vec![MSG_AVAILABILITY_NOT_BOOLEAN], messages(&errors));
        }
    }

    #[test]
    fn test_check_id_ok() {
        let mut errors = Vec::new();
        assert_eq!(1, check_id("1", &mut errors).unwrap().as_i64());
        assert_eq!(-5, check_id("-5", &mut errors).unwrap().as_i64());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_check_id_invalid() {
        for raw in ["not-valid-url", "1.5", ""] {
            let mut errors = Vec::new();
            assert!(check_id(raw, &mut errors).is_none());
            assert_eq!(vec![MSG_INVALID_ID], messages(&errors));
            assert_eq!("params", errors[0].location);
            assert_eq!("id", errors[0].path);
        }
    }

    #[test]
    fn test_field_error_serialization_omits_missing_values() {
        let mut errors = Vec::new();
        check_price(None, &mut errors);
        let value = serde_json::to_value(&errors[0]).unwrap();
        assert!(value.get("value").is_none());
    }
}
