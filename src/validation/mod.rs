//! Declarative payload validation.
//!
//! A payload is checked against an ordered slice of [`Rule`]s. How violations
//! are reported depends on the [`Policy`]: products accumulate every failing
//! rule, users report only the first failing constraint of each field.

pub mod product;
pub mod user;

use serde_json::{Map, Value};

/// A single named constraint on one payload field.
///
/// `check` receives `None` when the field is absent from the payload.
#[derive(Clone, Copy)]
pub struct Rule {
    pub field: &'static str,
    pub check: fn(Option<&Value>) -> bool,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Report every violated rule, in rule order.
    Accumulate,
    /// Report at most one violation per field: the first in rule order.
    FirstPerField,
}

/// Ordered, never-empty list of validation messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    /// Returns `None` for an empty list so an empty error can't be built.
    pub fn from_messages(messages: Vec<String>) -> Option<Self> {
        if messages.is_empty() {
            None
        } else {
            Some(Self(messages))
        }
    }

    pub fn single(message: impl Into<String>) -> Self {
        Self(vec![message.into()])
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn into_messages(self) -> Vec<String> {
        self.0
    }
}

/// Runs `rules` against `payload` and returns the violations.
pub fn apply(rules: &[Rule], payload: &Map<String, Value>, policy: Policy) -> Option<ValidationErrors> {
    let mut failed_fields: Vec<&'static str> = Vec::new();
    let mut messages = Vec::new();

    for rule in rules {
        if policy == Policy::FirstPerField && failed_fields.contains(&rule.field) {
            continue;
        }
        if !(rule.check)(payload.get(rule.field)) {
            failed_fields.push(rule.field);
            messages.push(rule.message.to_string());
        }
    }

    ValidationErrors::from_messages(messages)
}
