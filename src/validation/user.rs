use serde_json::{Map, Value};

use super::{apply, Policy, Rule, ValidationErrors};
use crate::models::user::NewUser;
use crate::planner::{FieldSet, UserField};

const MIN_USERNAME_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// At least one field violated a constraint.
    Invalid(ValidationErrors),
    /// The update payload named none of the allow-listed fields.
    EmptyUpdate,
}

const CREATE_RULES: [Rule; 8] = [
    Rule { field: "username", check: is_present, message: "username is required" },
    Rule { field: "username", check: is_string_if_present, message: "username must be a string" },
    Rule {
        field: "username",
        check: is_long_enough_if_present,
        message: "username must be at least 5 characters",
    },
    Rule { field: "password", check: is_present, message: "password is required" },
    Rule { field: "password", check: is_string_if_present, message: "password must be a string" },
    Rule { field: "password", check: is_non_empty_if_present, message: "password must not be empty" },
    Rule { field: "firstname", check: is_string_if_present, message: "firstname must be a string" },
    Rule { field: "lastname", check: is_string_if_present, message: "lastname must be a string" },
];

// Same per-field constraints as create, minus presence.
const UPDATE_RULES: [Rule; 6] = [
    CREATE_RULES[1],
    CREATE_RULES[2],
    CREATE_RULES[4],
    CREATE_RULES[5],
    CREATE_RULES[6],
    CREATE_RULES[7],
];

pub fn validate_create(payload: &Map<String, Value>) -> Result<NewUser, UserValidationError> {
    if let Some(errors) = apply(&CREATE_RULES, payload, Policy::FirstPerField) {
        return Err(UserValidationError::Invalid(errors));
    }

    let mut fields = collect_fields(payload);
    let username = take_required(&mut fields, UserField::Username)?;
    let password = take_required(&mut fields, UserField::Password)?;

    Ok(NewUser {
        username,
        password,
        firstname: fields.remove(UserField::Firstname),
        lastname: fields.remove(UserField::Lastname),
    })
}

/// Validates a partial update and returns the supplied allow-listed fields.
pub fn validate_update(payload: &Map<String, Value>) -> Result<FieldSet, UserValidationError> {
    if let Some(errors) = apply(&UPDATE_RULES, payload, Policy::FirstPerField) {
        return Err(UserValidationError::Invalid(errors));
    }

    let fields = collect_fields(payload);
    if fields.is_empty() {
        return Err(UserValidationError::EmptyUpdate);
    }
    Ok(fields)
}

fn collect_fields(payload: &Map<String, Value>) -> FieldSet {
    let mut fields = FieldSet::new();
    for field in UserField::ALL {
        if let Some(Value::String(value)) = payload.get(field.column()) {
            fields.insert(field, value.clone());
        }
    }
    fields
}

/// Removes a field the presence and type rules already guaranteed. A miss
/// reports the same message as the presence rule.
fn take_required(fields: &mut FieldSet, field: UserField) -> Result<String, UserValidationError> {
    fields.remove(field).ok_or_else(|| {
        UserValidationError::Invalid(ValidationErrors::single(format!("{} is required", field.column())))
    })
}

fn is_present(value: Option<&Value>) -> bool {
    value.is_some()
}

fn is_string_if_present(value: Option<&Value>) -> bool {
    value.map_or(true, Value::is_string)
}

fn is_long_enough_if_present(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .map_or(true, |s| s.chars().count() >= MIN_USERNAME_LEN)
}

fn is_non_empty_if_present(value: Option<&Value>) -> bool {
    value.and_then(Value::as_str).map_or(true, |s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test payloads are objects"),
        }
    }

    fn messages(err: UserValidationError) -> Vec<String> {
        match err {
            UserValidationError::Invalid(errors) => errors.into_messages(),
            UserValidationError::EmptyUpdate => panic!("expected field errors"),
        }
    }

    #[test]
    fn create_requires_username_and_password() {
        let err = validate_create(&object(json!({ "firstname": "Somchai" }))).unwrap_err();
        assert_eq!(messages(err), ["username is required", "password is required"]);
    }

    #[test]
    fn create_reports_first_violation_per_field_only() {
        // A numeric username fails both the type and the length constraint.
        let err = validate_create(&object(json!({ "username": 42, "password": "" }))).unwrap_err();
        assert_eq!(
            messages(err),
            ["username must be a string", "password must not be empty"]
        );
    }

    #[test]
    fn create_rejects_short_username() {
        let err = validate_create(&object(json!({ "username": "abcd", "password": "pw" }))).unwrap_err();
        assert_eq!(messages(err), ["username must be at least 5 characters"]);
    }

    #[test]
    fn create_null_optional_name_is_a_type_error() {
        let payload = object(json!({ "username": "alice", "password": "pw", "lastname": null }));
        let err = validate_create(&payload).unwrap_err();
        assert_eq!(messages(err), ["lastname must be a string"]);
    }

    #[test]
    fn create_normalizes_into_new_user() {
        let payload = object(json!({
            "username": "alice",
            "password": "secret",
            "firstname": "Alice",
            "role": "admin"
        }));
        let user = validate_create(&payload).unwrap();
        assert_eq!(
            user,
            NewUser {
                username: "alice".into(),
                password: "secret".into(),
                firstname: Some("Alice".into()),
                lastname: None,
            }
        );
    }

    #[test]
    fn missing_required_field_reports_presence_message() {
        let mut fields = FieldSet::new();
        fields.insert(UserField::Username, "somchai");

        assert_eq!(take_required(&mut fields, UserField::Username).unwrap(), "somchai");
        let err = take_required(&mut fields, UserField::Username).unwrap_err();
        assert_eq!(messages(err), ["username is required"]);
        let err = take_required(&mut fields, UserField::Password).unwrap_err();
        assert_eq!(messages(err), ["password is required"]);
    }

    #[test]
    fn update_with_empty_object_is_an_empty_update() {
        assert_eq!(
            validate_update(&object(json!({}))).unwrap_err(),
            UserValidationError::EmptyUpdate
        );
    }

    #[test]
    fn update_with_only_unknown_fields_is_an_empty_update() {
        let payload = object(json!({ "id": 7, "role": "admin" }));
        assert_eq!(validate_update(&payload).unwrap_err(), UserValidationError::EmptyUpdate);
    }

    #[test]
    fn update_with_short_username_is_a_field_error() {
        let err = validate_update(&object(json!({ "username": "ab" }))).unwrap_err();
        assert_eq!(messages(err), ["username must be at least 5 characters"]);
    }

    #[test]
    fn update_collects_only_supplied_fields() {
        let fields = validate_update(&object(json!({ "lastname": "Jaidee", "password": "pw2" }))).unwrap();
        let supplied: Vec<_> = fields.iter().map(|(field, value)| (field, value.as_str())).collect();
        assert_eq!(
            supplied,
            [(UserField::Password, "pw2"), (UserField::Lastname, "Jaidee")]
        );
    }
}
