//! Account and session flows through the SDK against a live server

use crate::common::{AccountFactory, TestServer};
use thumbforge::sdk::SessionEvent;

#[actix_web::test]
async fn test_signup_login_round_trip() {
    let server = TestServer::start().await;
    let account = AccountFactory::credentials();
    let client = server.client();

    let session = client
        .signup(&account.name, &account.email, &account.password)
        .await
        .unwrap();
    assert_eq!(session.user.email, account.email);
    assert!(client.is_authenticated());

    // History opens with the stored token
    assert!(client.history().await.unwrap().is_empty());

    client.logout();
    let error = client.history().await.unwrap_err();
    assert_eq!(error.status(), 401);

    let session = client.login(&account.email, &account.password).await.unwrap();
    assert!(!session.token.is_empty());
    assert!(client.history().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_duplicate_signup_is_conflict() {
    let server = TestServer::start().await;
    let account = AccountFactory::credentials();
    let client = server.client();

    client
        .signup(&account.name, &account.email, &account.password)
        .await
        .unwrap();

    let error = client
        .signup("Someone Else", &account.email, &account.password)
        .await
        .unwrap_err();
    assert_eq!(error.status(), 409);
    assert_eq!(error.message(), "An account with this email already exists");
}

#[actix_web::test]
async fn test_wrong_password_is_unauthorized() {
    let server = TestServer::start().await;
    let account = AccountFactory::credentials();
    let client = server.client();

    client
        .signup(&account.name, &account.email, &account.password)
        .await
        .unwrap();
    client.logout();

    let error = client
        .login(&account.email, "definitely-wrong")
        .await
        .unwrap_err();
    assert_eq!(error.status(), 401);
    assert_eq!(error.message(), "Invalid email or password");
}

#[actix_web::test]
async fn test_short_password_is_rejected() {
    let server = TestServer::start().await;
    let account = AccountFactory::credentials();
    let client = server.client();

    let error = client
        .signup(&account.name, &account.email, "short")
        .await
        .unwrap_err();
    assert_eq!(error.status(), 400);
    assert!(error.message().contains("at least 8 characters"));
}

#[actix_web::test]
async fn test_stale_token_resets_session() {
    let server = TestServer::start().await;
    let client = server.client();

    client.set_token("stale-or-forged-token");
    let mut events = client.events();

    let error = client.history().await.unwrap_err();
    assert_eq!(error.status(), 401);

    // The SDK dropped the token and told its subscribers
    assert!(!client.is_authenticated());
    assert_eq!(events.try_recv().unwrap(), SessionEvent::Unauthorized);
}

#[actix_web::test]
async fn test_health_is_reachable_without_session() {
    let server = TestServer::start().await;
    let client = server.client();

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.version, thumbforge::VERSION);
}
