//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgConnection, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::users::{
    data::{NewUser, UserUpdate},
    records::{UserId, UserRecord},
};

const LIST_USERS_SQL: &str = include_str!("sql/list_users.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const USER_EXISTS_SQL: &str = include_str!("sql/user_exists.sql");
const FIND_USER_BY_EMAIL_SQL: &str = include_str!("sql/find_user_by_email.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const UPDATE_USER_SQL: &str = include_str!("sql/update_user.sql");
const DELETE_USER_SQL: &str = include_str!("sql/delete_user.sql");
const SEARCH_USERS_BY_NAME_SQL: &str = include_str!("sql/search_users_by_name.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_users(
        &self,
        conn: &mut PgConnection,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(LIST_USERS_SQL)
            .fetch_all(&mut *conn)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        conn: &mut PgConnection,
        user: UserId,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_i64())
            .fetch_one(&mut *conn)
            .await
    }

    pub(crate) async fn user_exists(
        &self,
        conn: &mut PgConnection,
        user: UserId,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(USER_EXISTS_SQL)
            .bind(user.into_i64())
            .fetch_one(&mut *conn)
            .await
    }

    pub(crate) async fn find_user_by_email(
        &self,
        conn: &mut PgConnection,
        email: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(FIND_USER_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut *conn)
            .await
    }

    pub(crate) async fn create_user(
        &self,
        conn: &mut PgConnection,
        user: &NewUser,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.address)
            .bind(&user.role)
            .bind(user.registration_date.map(SqlxTimestamp::from))
            .fetch_one(&mut *conn)
            .await
    }

    pub(crate) async fn update_user(
        &self,
        conn: &mut PgConnection,
        user: UserId,
        update: &UserUpdate,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(UPDATE_USER_SQL)
            .bind(user.into_i64())
            .bind(update.name.as_deref())
            .bind(update.email.as_deref())
            .bind(update.address.as_deref())
            .bind(update.role.as_deref())
            .fetch_one(&mut *conn)
            .await
    }

    pub(crate) async fn delete_user(
        &self,
        conn: &mut PgConnection,
        user: UserId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_USER_SQL)
            .bind(user.into_i64())
            .execute(&mut *conn)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn search_users_by_name(
        &self,
        conn: &mut PgConnection,
        name: &str,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(SEARCH_USERS_BY_NAME_SQL)
            .bind(name)
            .fetch_all(&mut *conn)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let registration_date: SqlxTimestamp = row.try_get("registration_date")?;

        Ok(Self {
            id: UserId::from_i64(id),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            address: row.try_get("address")?,
            registration_date: registration_date.to_jiff(),
            role: row.try_get("role")?,
        })
    }
}
