//! Account signup endpoint

use crate::server::state::AppState;
use crate::utils::error::ForgeError;
use actix_web::{HttpResponse, web};
use tracing::info;

use super::models::{AuthResponse, SignupRequest};

/// Account signup endpoint
pub async fn signup(
    state: web::Data<AppState>,
    request: web::Json<SignupRequest>,
) -> Result<HttpResponse, ForgeError> {
    info!("Signup attempt");

    let (user, token) = state
        .auth
        .signup(&request.name, &request.email, &request.password)
        .await?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user: user.public(),
    }))
}
