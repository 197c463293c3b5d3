use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::{db_interaction::get_user_by_id, error::ApiError, models::User, utils::{get_pooled_connection, DbPool}};

use super::jwt::{TokenType, Tokenizer};

// Caller identified by a valid access token in `Authorization: Bearer <token>`
pub struct AuthenticatedUser(pub User);

fn bearer_token(req: &HttpRequest) -> Option<String>{
    let header = req.headers().get("Authorization")?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let tokenizer = req.app_data::<web::Data<Tokenizer>>().cloned();
        let pool = req.app_data::<web::Data<DbPool>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let (tokenizer, pool) = match (tokenizer, pool) {
                (Some(tokenizer), Some(pool)) => (tokenizer, pool),
                _ => return Err(anyhow::anyhow!("Tokenizer or pool missing from app data").into())
            };

            let token = token.ok_or_else(|| {
                ApiError::NotAuthenticated("Authentication credentials were not provided.".to_string())
            })?;

            let claims = tokenizer.decode_key(&token, TokenType::Access)
                .ok_or(ApiError::InvalidToken)?;

            let conn = get_pooled_connection(&pool).await?;

            match get_user_by_id(conn, claims.sub).await? {
                Some(user) if user.is_active => Ok(AuthenticatedUser(user)),
                Some(_) => Err(ApiError::NotAuthenticated("User is inactive".to_string())),
                None => Err(ApiError::NotAuthenticated("User not found".to_string()))
            }
        })
    }
}
