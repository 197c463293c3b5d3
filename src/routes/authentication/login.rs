use actix_web::{web, HttpResponse};
use anyhow::Context;
use secrecy::SecretString;
use serde::Deserialize;

use crate::{auth::Tokenizer, db_interaction::get_user_by_username, error::ApiError, password::verify_password, utils::{get_pooled_connection, DbPool}};

const NO_ACTIVE_ACCOUNT: &str = "No active account found with the given credentials";

#[derive(Deserialize, Debug)]
pub struct LoginForm{
    pub username: String,
    pub password: SecretString
}

#[tracing::instrument(
    "Logging in user",
    skip(pool, tokenizer, form),
    fields(username = %form.username)
)]
pub async fn login(
    pool: web::Data<DbPool>,
    tokenizer: web::Data<Tokenizer>,
    form: web::Json<LoginForm>
) -> Result<HttpResponse, ApiError>{
    let LoginForm { username, password } = form.into_inner();

    let conn = get_pooled_connection(&pool).await?;
    let user = match get_user_by_username(conn, username).await? {
        Some(user) if user.is_active => user,
        _ => return Err(ApiError::NotAuthenticated(NO_ACTIVE_ACCOUNT.to_string()))
    };

    if !verify_password(password, user.password_hash.clone()).await? {
        tracing::info!("Passwords did not match");
        return Err(ApiError::NotAuthenticated(NO_ACTIVE_ACCOUNT.to_string()));
    }

    let pair = tokenizer.generate_pair(user.id)
        .context("Failed to sign token pair")?;

    Ok(HttpResponse::Ok().json(pair))
}
