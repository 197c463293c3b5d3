use std::{error::Error, fmt::Debug};

use anyhow::Context;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl, SelectableHelper};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::{models::{NewUser, User}, password::compute_password_hash, schema::users, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

#[tracing::instrument(
    "Getting user by id",
    skip(conn)
)]
pub async fn get_user_by_id(
    mut conn: DbConnection,
    user_id: i32
) -> Result<Option<User>, anyhow::Error> {
    spawn_blocking_with_tracing(move || {
        users::table
            .find(user_id)
            .select(User::as_select())
            .first::<User>(&mut conn)
            .optional()
            .context("Failed to get user by id")
    })
    .await
    .context("Failed due to threadpool error")?
}

#[tracing::instrument(
    "Getting user by username",
    skip(conn)
)]
pub async fn get_user_by_username(
    mut conn: DbConnection,
    username: String
) -> Result<Option<User>, anyhow::Error> {
    spawn_blocking_with_tracing(move || {
        users::table
            .filter(users::username.eq(username))
            .select(User::as_select())
            .first::<User>(&mut conn)
            .optional()
            .context("Failed to get user by username")
    })
    .await
    .context("Failed due to threadpool error")?
}

// Error associated with inserting user to users table
#[derive(Error)]
pub enum UserInsertError{
    #[error("username is already taken")]
    UsernameNotUnique(#[source] diesel::result::Error),
    #[error("unexpected database / hashing error occured")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for UserInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[derive(Debug)]
pub struct UserRegistration{
    pub username: String,
    pub email: String,
    pub password: SecretString,
    pub is_staff: bool,
    pub is_superuser: bool
}

#[tracing::instrument(
    "Inserting user into the database",
    skip(conn, registration),
    fields(username = %registration.username)
)]
pub async fn insert_user_into_database(
    mut conn: DbConnection,
    registration: UserRegistration
) -> Result<User, UserInsertError> {
    let UserRegistration { username, email, password, is_staff, is_superuser } = registration;

    let password_hash = spawn_blocking_with_tracing(move || {
        compute_password_hash(password)
    })
    .await
    .context("Failed due to threadpool error")
    .map_err(UserInsertError::UnexpectedError)?
    .map_err(UserInsertError::UnexpectedError)?;

    let user = NewUser{
        username,
        email,
        password_hash: password_hash.expose_secret().to_string(),
        is_staff,
        is_superuser
    };

    spawn_blocking_with_tracing(move || {
        diesel::insert_into(users::table)
            .values(user)
            .returning(User::as_returning())
            .get_result::<User>(&mut conn)
            .map_err(|e| {
                match e {
                    diesel::result::Error::DatabaseError(
                        diesel::result::DatabaseErrorKind::UniqueViolation,
                        _
                    ) => UserInsertError::UsernameNotUnique(e),

                    _ => UserInsertError::UnexpectedError(
                        anyhow::Error::new(e).context("Unexpected diesel / database error")
                    )
                }
            })
    })
    .await
    .context("Failed due to threadpool error")
    .map_err(UserInsertError::UnexpectedError)?
}
