//! End-to-end account flow over the in-process HTTP stack.
//!
//! Signup, login and `/me` share one in-memory store, so the token a login
//! issues resolves to the record signup created.

mod support;

use rstest::rstest;
use serde_json::json;
use support::{
    ADA_EMAIL, ADA_NAME, ADA_PASSWORD, ada_token, get, init_app, login, post_json, send, signup,
};
use workasana::domain::ports::UsersQuery;
use workasana::test_support::TestBackend;

#[actix_web::test]
async fn signup_login_and_me_round_trip() {
    let backend = TestBackend::new();
    let app = init_app(&backend).await;

    let created = signup(&app, ADA_NAME, ADA_EMAIL, ADA_PASSWORD).await;
    assert_eq!(created.status, 201);
    assert_eq!(
        created.str_field("/message"),
        Some("Signup successful! Please login.")
    );
    assert!(created.body().get("token").is_none());

    let session = login(&app, ADA_EMAIL, ADA_PASSWORD).await;
    assert_eq!(session.status, 200);
    assert_eq!(session.str_field("/message"), Some("Login successful"));
    let token = session.str_field("/token").expect("token").to_owned();
    let user_id = session.str_field("/user/id").expect("user id").to_owned();

    let me = send(&app, get("/me", Some(&token))).await;
    assert_eq!(me.status, 200);
    assert_eq!(me.str_field("/id"), Some(user_id.as_str()));
    assert_eq!(me.str_field("/name"), Some(ADA_NAME));
    assert_eq!(me.str_field("/email"), Some(ADA_EMAIL));
}

#[actix_web::test]
async fn email_is_matched_case_insensitively() {
    let backend = TestBackend::new();
    let app = init_app(&backend).await;
    signup(&app, ADA_NAME, "Ada@X.com", ADA_PASSWORD).await;

    let session = login(&app, "ada@x.COM", ADA_PASSWORD).await;

    assert_eq!(session.status, 200);
    assert_eq!(session.str_field("/user/email"), Some(ADA_EMAIL));
}

#[actix_web::test]
async fn duplicate_signup_leaves_original_password_in_place() {
    let backend = TestBackend::new();
    let app = init_app(&backend).await;
    signup(&app, ADA_NAME, ADA_EMAIL, ADA_PASSWORD).await;

    let repeat = signup(&app, "Impostor", ADA_EMAIL, "hijacked-password").await;
    assert_eq!(repeat.status, 400);
    assert_eq!(repeat.str_field("/message"), Some("User already exists"));

    assert_eq!(login(&app, ADA_EMAIL, "hijacked-password").await.status, 401);
    assert_eq!(login(&app, ADA_EMAIL, ADA_PASSWORD).await.status, 200);
}

#[rstest]
#[case(json!({ "email": ADA_EMAIL, "password": ADA_PASSWORD }), "name")]
#[case(json!({ "name": ADA_NAME, "password": ADA_PASSWORD }), "email")]
#[case(json!({ "name": ADA_NAME, "email": ADA_EMAIL }), "password")]
#[case(json!({ "name": "  ", "email": ADA_EMAIL, "password": ADA_PASSWORD }), "name")]
#[actix_web::test]
async fn signup_rejects_absent_or_blank_fields(
    #[case] payload: serde_json::Value,
    #[case] field: &str,
) {
    let backend = TestBackend::new();
    let app = init_app(&backend).await;

    let rejected = send(&app, post_json("/signup", &payload, None)).await;

    assert_eq!(rejected.status, 400);
    assert_eq!(rejected.str_field("/details/field"), Some(field));
    let users = backend.state.users.list_users().await.expect("list users");
    assert!(users.is_empty());
}

#[rstest]
#[case("nobody@x.com", ADA_PASSWORD, 404, "User not found")]
#[case(ADA_EMAIL, "wrong-password", 401, "Invalid credentials")]
#[actix_web::test]
async fn failed_login_issues_no_token(
    #[case] email: &str,
    #[case] password: &str,
    #[case] status: u16,
    #[case] message: &str,
) {
    let backend = TestBackend::new();
    let app = init_app(&backend).await;
    signup(&app, ADA_NAME, ADA_EMAIL, ADA_PASSWORD).await;

    let rejected = login(&app, email, password).await;

    assert_eq!(rejected.status, status);
    assert_eq!(rejected.str_field("/message"), Some(message));
    assert!(rejected.body().get("token").is_none());
}

#[actix_web::test]
async fn every_login_issues_a_distinct_token() {
    let backend = TestBackend::new();
    let app = init_app(&backend).await;
    let first = ada_token(&app).await;

    let second = login(&app, ADA_EMAIL, ADA_PASSWORD).await;

    let second = second.str_field("/token").expect("token").to_owned();
    assert_ne!(first, second);
    assert_eq!(send(&app, get("/me", Some(&first))).await.status, 200);
    assert_eq!(send(&app, get("/me", Some(&second))).await.status, 200);
}

#[actix_web::test]
async fn users_lists_every_account_without_secrets() {
    let backend = TestBackend::new();
    let app = init_app(&backend).await;
    let token = ada_token(&app).await;
    signup(&app, "Grace", "grace@x.com", "compiler").await;

    let listed = send(&app, get("/users", Some(&token))).await;

    assert_eq!(listed.status, 200);
    let users = listed.body().as_array().expect("array");
    assert_eq!(users.len(), 2);
    for user in users {
        let keys: Vec<&str> = user
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys.len(), 3, "unexpected keys {keys:?}");
        assert!(user.get("id").is_some());
        assert!(user.get("name").is_some());
        assert!(user.get("email").is_some());
    }
}
