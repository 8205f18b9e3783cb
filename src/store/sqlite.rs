use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteArguments, SqliteRow},
    Arguments, FromRow, SqlitePool,
};

use super::{ExecOutcome, Param, ResourceStore, Statement, StoreError};

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn arguments(statement: &Statement) -> Result<SqliteArguments<'_>, StoreError> {
    let mut args = SqliteArguments::default();
    for binding in statement.bindings() {
        let added = match &binding.value {
            Param::Integer(v) => args.add(*v),
            Param::Text(s) => args.add(s.clone()),
            Param::Null => args.add(None::<String>),
        };
        added.map_err(|source| StoreError::Bind { name: binding.name, source })?;
    }
    Ok(args)
}

#[async_trait]
impl ResourceStore for SqliteStore {
    async fn query_one<R>(&self, statement: &Statement) -> Result<Option<R>, StoreError>
    where
        R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let args = arguments(statement)?;
        let row = sqlx::query_as_with::<_, R, _>(statement.sql(), args)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn query_all<R>(&self, statement: &Statement) -> Result<Vec<R>, StoreError>
    where
        R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let args = arguments(statement)?;
        let rows = sqlx::query_as_with::<_, R, _>(statement.sql(), args)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn execute(&self, statement: &Statement) -> Result<ExecOutcome, StoreError> {
        let args = arguments(statement)?;
        let result = sqlx::query_with(statement.sql(), args)
            .execute(&self.pool)
            .await?;
        Ok(ExecOutcome {
            changed: result.rows_affected(),
            last_insert_id: result.last_insert_rowid(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connect_in_memory;
    use crate::models::user::{NewUser, User};
    use crate::planner::{self, FieldSet, UserField};

    fn alice() -> NewUser {
        NewUser {
            username: "alice".into(),
            password: "secret".into(),
            firstname: Some("Alice".into()),
            lastname: None,
        }
    }

    #[tokio::test]
    async fn insert_reports_change_count_and_rowid() {
        let store = SqliteStore::new(connect_in_memory().await.unwrap());

        let first = store.execute(&planner::insert_user(&alice())).await.unwrap();
        let second = store.execute(&planner::insert_user(&alice())).await.unwrap();

        assert_eq!(first.changed, 1);
        assert_eq!(first.last_insert_id, 1);
        assert_eq!(second.last_insert_id, 2);
    }

    #[tokio::test]
    async fn query_one_decodes_nullable_columns() {
        let store = SqliteStore::new(connect_in_memory().await.unwrap());
        store.execute(&planner::insert_user(&alice())).await.unwrap();

        let user: User = store.query_one(&planner::select_user(1)).await.unwrap().unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.firstname.as_deref(), Some("Alice"));
        assert_eq!(user.lastname, None);

        let missing: Option<User> = store.query_one(&planner::select_user(99)).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn planned_update_changes_only_supplied_columns() {
        let store = SqliteStore::new(connect_in_memory().await.unwrap());
        store.execute(&planner::insert_user(&alice())).await.unwrap();

        let mut fields = FieldSet::new();
        fields.insert(UserField::Lastname, "Liddell");
        let outcome = store.execute(&planner::plan_update(1, &fields).unwrap()).await.unwrap();
        assert_eq!(outcome.changed, 1);

        let users: Vec<User> = store.query_all(&planner::select_users()).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "alice");
        assert_eq!(users[0].firstname.as_deref(), Some("Alice"));
        assert_eq!(users[0].lastname.as_deref(), Some("Liddell"));
    }

    #[tokio::test]
    async fn update_of_missing_row_changes_nothing() {
        let store = SqliteStore::new(connect_in_memory().await.unwrap());
        let mut fields = FieldSet::new();
        fields.insert(UserField::Password, "pw");

        let outcome = store.execute(&planner::plan_update(42, &fields).unwrap()).await.unwrap();
        assert_eq!(outcome.changed, 0);
    }
}
