//! Account signup and login endpoints

mod login;
mod models;
mod signup;

pub use login::login;
pub use models::{AuthResponse, LoginRequest, SignupRequest};
pub use signup::signup;
