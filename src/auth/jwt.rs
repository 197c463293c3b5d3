use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::configuration::JWTSettings;

#[derive(Clone)]
pub struct Tokenizer{
    pub secret: SecretString,
    pub access_token_minutes: i64,
    pub refresh_token_hours: i64
}

impl Tokenizer {
    pub fn new(settings: &JWTSettings) -> Self {
        Self{
            secret: settings.secret.clone(),
            access_token_minutes: settings.access_token_minutes,
            refresh_token_hours: settings.refresh_token_hours
        }
    }

    pub fn generate_pair(&self, user_id: i32) -> Result<TokenPair, jsonwebtoken::errors::Error>{
        Ok(TokenPair{
            access: self.generate_access_key(user_id)?,
            refresh: self.generate_key(
                user_id,
                TokenType::Refresh,
                Duration::hours(self.refresh_token_hours)
            )?
        })
    }

    pub fn generate_access_key(&self, user_id: i32) -> Result<String, jsonwebtoken::errors::Error>{
        self.generate_key(
            user_id,
            TokenType::Access,
            Duration::minutes(self.access_token_minutes)
        )
    }

    fn generate_key(
        &self,
        user_id: i32,
        token_type: TokenType,
        lifetime: Duration
    ) -> Result<String, jsonwebtoken::errors::Error>{
        let now = Utc::now();

        let claims = Claims{
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            jti: Uuid::new_v4(),
            token_type
        };

        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes())
        )
    }

    // None for a bad signature, an expired token or a token of the other type
    pub fn decode_key(&self, token: &str, expected: TokenType) -> Option<Claims>{
        match jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &Validation::new(Algorithm::HS256)
        ) {
            Ok(decoded_data) if decoded_data.claims.token_type == expected => Some(decoded_data.claims),
            _ => None
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims{
    pub sub: i32,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
    pub token_type: TokenType
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType{
    Access,
    Refresh
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair{
    pub access: String,
    pub refresh: String
}
