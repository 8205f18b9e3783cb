//! SQL for the `users` table.
//!
//! Column names only ever come from [`UserField::column`]; every value is a
//! bound parameter. Partial updates touch only the fields that were supplied.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::user::NewUser;
use crate::store::{Param, Statement};

const USER_COLUMNS: &str = "id, username, password, firstname, lastname";

/// Allow-list of user columns that a request may write.
///
/// Declaration order is the order assignments appear in a `SET` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserField {
    Username,
    Password,
    Firstname,
    Lastname,
}

impl UserField {
    pub const ALL: [UserField; 4] = [
        UserField::Username,
        UserField::Password,
        UserField::Firstname,
        UserField::Lastname,
    ];

    pub const fn column(self) -> &'static str {
        match self {
            UserField::Username => "username",
            UserField::Password => "password",
            UserField::Firstname => "firstname",
            UserField::Lastname => "lastname",
        }
    }
}

/// Supplied user fields. Absent fields are simply not in the set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet(BTreeMap<UserField, String>);

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: UserField, value: impl Into<String>) {
        self.0.insert(field, value.into());
    }

    pub fn remove(&mut self, field: UserField) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates in allow-list order.
    pub fn iter(&self) -> impl Iterator<Item = (UserField, &String)> {
        self.0.iter().map(|(field, value)| (*field, value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("no fields to update")]
    EmptyUpdate,
}

pub fn select_users() -> Statement {
    Statement::new(format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
}

pub fn select_user(id: i64) -> Statement {
    Statement::new(format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1")).bind("id", id)
}

pub fn insert_user(user: &NewUser) -> Statement {
    Statement::new(
        "INSERT INTO users (username, password, firstname, lastname) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(UserField::Username.column(), user.username.clone())
    .bind(UserField::Password.column(), user.password.clone())
    .bind(UserField::Firstname.column(), user.firstname.clone())
    .bind(UserField::Lastname.column(), user.lastname.clone())
}

/// Plans `UPDATE users SET .. WHERE id = ..` covering exactly the supplied fields.
pub fn plan_update(id: i64, fields: &FieldSet) -> Result<Statement, PlanError> {
    if fields.is_empty() {
        return Err(PlanError::EmptyUpdate);
    }

    let assignments: Vec<String> = fields
        .iter()
        .enumerate()
        .map(|(i, (field, _))| format!("{} = ?{}", field.column(), i + 1))
        .collect();
    let sql = format!(
        "UPDATE users SET {} WHERE id = ?{}",
        assignments.join(", "),
        fields.len() + 1
    );

    let statement = fields
        .iter()
        .fold(Statement::new(sql), |stmt, (field, value)| {
            stmt.bind(field.column(), Param::Text(value.clone()))
        })
        .bind("id", id);
    Ok(statement)
}

pub fn delete_user(id: i64) -> Statement {
    Statement::new("DELETE FROM users WHERE id = ?1").bind("id", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(UserField, &str)]) -> FieldSet {
        let mut set = FieldSet::new();
        for (field, value) in pairs {
            set.insert(*field, *value);
        }
        set
    }

    #[test]
    fn update_binds_exactly_supplied_fields_plus_id() {
        let set = fields(&[(UserField::Lastname, "Jaidee"), (UserField::Username, "somchai")]);
        let stmt = plan_update(7, &set).unwrap();

        assert_eq!(stmt.param_names(), ["username", "lastname", "id"]);
        assert_eq!(stmt.param("username"), Some(&Param::Text("somchai".into())));
        assert_eq!(stmt.param("lastname"), Some(&Param::Text("Jaidee".into())));
        assert_eq!(stmt.param("id"), Some(&Param::Integer(7)));
        assert_eq!(stmt.param("password"), None);
    }

    #[test]
    fn update_assignments_follow_allow_list_order() {
        let set = fields(&[
            (UserField::Lastname, "l"),
            (UserField::Firstname, "f"),
            (UserField::Password, "p"),
        ]);
        let stmt = plan_update(1, &set).unwrap();
        assert_eq!(
            stmt.sql(),
            "UPDATE users SET password = ?1, firstname = ?2, lastname = ?3 WHERE id = ?4"
        );
    }

    #[test]
    fn update_values_never_reach_sql_text() {
        let set = fields(&[(UserField::Username, "x'; DROP TABLE users; --")]);
        let stmt = plan_update(3, &set).unwrap();
        assert_eq!(stmt.sql(), "UPDATE users SET username = ?1 WHERE id = ?2");
    }

    #[test]
    fn empty_field_set_is_rejected() {
        assert_eq!(plan_update(1, &FieldSet::new()), Err(PlanError::EmptyUpdate));
    }

    #[test]
    fn insert_binds_missing_names_as_null() {
        let stmt = insert_user(&NewUser {
            username: "alice".into(),
            password: "secret".into(),
            firstname: None,
            lastname: Some("Smith".into()),
        });
        assert_eq!(stmt.param_names(), ["username", "password", "firstname", "lastname"]);
        assert_eq!(stmt.param("firstname"), Some(&Param::Null));
        assert_eq!(stmt.param("lastname"), Some(&Param::Text("Smith".into())));
    }
}
