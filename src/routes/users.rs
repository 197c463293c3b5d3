use actix_web::HttpResponse;

use crate::{auth::AuthenticatedUser, models::UserIdentity};

#[tracing::instrument(
    "Getting identity of logged in user",
    skip(user)
)]
pub async fn current_user(user: AuthenticatedUser) -> HttpResponse{
    HttpResponse::Ok().json(UserIdentity::from(&user.0))
}
