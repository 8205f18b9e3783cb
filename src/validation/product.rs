use serde_json::{Map, Number, Value};

use super::{apply, Policy, Rule, ValidationErrors};
use crate::models::product::NewProduct;

pub const CODE_MESSAGE: &str = "code must be a 5-digit number";
pub const NAME_MESSAGE: &str = "name must be at least 5 characters";
pub const PRICE_MESSAGE: &str = "price must be a number";
pub const COST_MESSAGE: &str = "cost must be a number";

const MIN_NAME_LEN: usize = 5;

const CREATE_RULES: [Rule; 4] = [
    Rule { field: "code", check: code_is_five_digits, message: CODE_MESSAGE },
    Rule { field: "name", check: name_is_long_enough, message: NAME_MESSAGE },
    Rule { field: "price", check: is_number, message: PRICE_MESSAGE },
    Rule { field: "cost", check: is_number, message: COST_MESSAGE },
];

/// Validates a product-create payload, accumulating every violated rule.
pub fn validate_create(payload: &Map<String, Value>) -> Result<NewProduct, ValidationErrors> {
    if let Some(errors) = apply(&CREATE_RULES, payload, Policy::Accumulate) {
        return Err(errors);
    }

    // Kept as received so `60` comes back as `60`, not `60.0`.
    let number = |field: &str| match payload.get(field) {
        Some(Value::Number(n)) => n.clone(),
        _ => Number::from(0),
    };
    Ok(NewProduct {
        code: coerce_code(payload.get("code")),
        name: payload.get("name").and_then(Value::as_str).unwrap_or_default().to_string(),
        price: number("price"),
        cost: number("cost"),
        note: payload.get("note").and_then(Value::as_str).unwrap_or_default().to_string(),
    })
}

/// String form of `code`. Numbers use their shortest decimal rendering,
/// anything that is neither a string nor a number becomes empty.
pub fn coerce_code(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
                    Some(f) => f.to_string(),
                    None => String::new(),
                }
            }
        }
        _ => String::new(),
    }
}

fn code_is_five_digits(value: Option<&Value>) -> bool {
    let code = coerce_code(value);
    code.len() == 5 && code.bytes().all(|b| b.is_ascii_digit())
}

fn name_is_long_enough(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|name| name.chars().count() >= MIN_NAME_LEN)
}

// serde_json numbers are always finite, so any number passes.
fn is_number(value: Option<&Value>) -> bool {
    value.and_then(Value::as_f64).is_some_and(f64::is_finite)
}
