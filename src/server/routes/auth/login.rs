//! Account login endpoint

use crate::server::state::AppState;
use crate::utils::error::ForgeError;
use actix_web::{HttpResponse, web};
use tracing::info;

use super::models::{AuthResponse, LoginRequest};

/// Account login endpoint
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ForgeError> {
    info!("Login attempt");

    let (user, token) = state.auth.login(&request.email, &request.password).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: user.public(),
    }))
}
