use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{auth::{TokenType, Tokenizer}, error::ApiError};

#[derive(Deserialize, Debug)]
pub struct RefreshForm{
    pub refresh: String
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AccessToken{
    pub access: String
}

#[tracing::instrument(
    "Refreshing access token",
    skip_all
)]
pub async fn refresh_token(
    tokenizer: web::Data<Tokenizer>,
    form: web::Json<RefreshForm>
) -> Result<HttpResponse, ApiError>{
    let claims = tokenizer.decode_key(&form.refresh, TokenType::Refresh)
        .ok_or(ApiError::InvalidToken)?;

    let access = tokenizer.generate_access_key(claims.sub)
        .context("Failed to sign access token")?;

    Ok(HttpResponse::Ok().json(AccessToken{ access }))
}
