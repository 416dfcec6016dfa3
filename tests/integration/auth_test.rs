//! Integration tests for registration, login, logout and sessions.

mod helpers;

use http::StatusCode;

use helpers::{PASSWORD, TestApp};
use library_entity::UserRole;

fn registration<'a>(username: &'a str, password: &'a str, confirm: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("username", username),
        ("fullname", "Ada Lovelace"),
        ("email", "ada@example.com"),
        ("password", password),
        ("confirm_password", confirm),
    ]
}

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::new();
    let mut browser = app.browser();

    let response = browser
        .post("/user/register", &registration("ada", "secret1", "secret1"))
        .await;
    response.assert_redirect("/user/login");

    let page = browser.get("/user/login").await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body["template"], "user/login");
    assert_eq!(page.flash(), vec!["Registration successful. Please log in."]);

    // Flash messages are read once.
    let page = browser.get("/user/login").await;
    assert!(page.flash().is_empty());

    let anonymous_token = browser.cookie.clone();
    let response = browser
        .post("/user/login", &[("username", "ada"), ("password", "secret1")])
        .await;
    response.assert_redirect("/");
    assert!(browser.cookie.is_some());
    assert_ne!(browser.cookie, anonymous_token, "token must rotate on login");

    let home = browser.get("/").await;
    assert_eq!(home.body["is_authenticated"], true);
    assert_eq!(home.body["current_user"]["username"], "ada");
    assert_eq!(home.body["current_user"]["role"], 0);
    assert!(home.body["current_user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::new();
    app.create_test_user("ada", UserRole::User).await;

    let mut browser = app.browser();
    let response = browser
        .post("/user/register", &registration("ada", "secret1", "secret1"))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["template"], "user/register");
    assert_eq!(
        response.errors(),
        vec![("username".to_string(), "Username already taken".to_string())]
    );
    assert_eq!(response.body["user"]["username"], "ada");
    assert!(response.body["user"].get("password").is_none());
}

#[tokio::test]
async fn test_register_reports_errors_in_field_order() {
    let app = TestApp::new();
    let mut browser = app.browser();

    let response = browser
        .post("/user/register", &registration("", "abc", "abd"))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let fields: Vec<String> = response.errors().into_iter().map(|(f, _)| f).collect();
    assert_eq!(fields, vec!["username", "password", "confirm_password"]);
    assert!(
        response
            .errors()
            .iter()
            .any(|(_, m)| m == "Password must be at least 6 characters long")
    );
}

#[tokio::test]
async fn test_registered_users_get_user_role() {
    let app = TestApp::new();
    let mut browser = app.browser();
    let mut form = registration("grace", "secret1", "secret1");
    form.push(("role", "2"));
    browser.post("/user/register", &form).await.assert_redirect("/user/login");

    browser
        .post("/user/login", &[("username", "grace"), ("password", "secret1")])
        .await
        .assert_redirect("/");
    let home = browser.get("/").await;
    assert_eq!(home.body["current_user"]["role_name"], "User");
}

#[tokio::test]
async fn test_login_unknown_username() {
    let app = TestApp::new();
    let mut browser = app.browser();

    browser
        .post("/user/login", &[("username", "nobody"), ("password", PASSWORD)])
        .await
        .assert_redirect("/user/login");

    let page = browser.get("/user/login").await;
    assert_eq!(page.flash(), vec!["Incorrect username."]);
    assert_eq!(page.body["flash"][0]["level"], "error");
    assert_eq!(page.body["is_authenticated"], false);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    app.create_test_user("ada", UserRole::User).await;
    let mut browser = app.browser();

    browser
        .post("/user/login", &[("username", "ada"), ("password", "wrong-one")])
        .await
        .assert_redirect("/user/login");

    let page = browser.get("/user/login").await;
    assert_eq!(page.flash(), vec!["Incorrect password."]);
}

#[tokio::test]
async fn test_authenticated_users_are_sent_away_from_login_and_register() {
    let app = TestApp::new();
    let (_, mut browser) = app.logged_in("ada", UserRole::User).await;

    browser.get("/user/login").await.assert_redirect("/");
    browser.get("/user/register").await.assert_redirect("/");
    browser
        .post("/user/register", &registration("other", "secret1", "secret1"))
        .await
        .assert_redirect("/");
}

#[tokio::test]
async fn test_logout_destroys_session() {
    let app = TestApp::new();
    let (_, mut browser) = app.logged_in("ada", UserRole::User).await;
    let old_token = browser.cookie.clone();

    browser.get("/user/logout").await.assert_redirect("/");
    assert!(browser.cookie.is_none());

    // The old token no longer resolves.
    browser.cookie = old_token;
    let home = browser.get("/").await;
    assert_eq!(home.body["is_authenticated"], false);
    assert!(home.body["current_user"].is_null());
}

#[tokio::test]
async fn test_expired_session_is_anonymous() {
    let mut config = TestApp::config();
    config.session.ttl_seconds = 0;
    let app = TestApp::with_config(config);
    let (_, mut browser) = app.logged_in("ada", UserRole::User).await;

    let home = browser.get("/").await;
    assert_eq!(home.status, StatusCode::OK);
    assert_eq!(home.body["is_authenticated"], false);
}

#[tokio::test]
async fn test_login_input_is_trimmed() {
    let app = TestApp::new();
    app.create_test_user("ada", UserRole::User).await;
    let mut browser = app.browser();

    browser
        .post("/user/login", &[("username", "  ada "), ("password", PASSWORD)])
        .await
        .assert_redirect("/");
}

#[tokio::test]
async fn test_password_rules_see_unescaped_text() {
    let app = TestApp::new();
    let mut browser = app.browser();

    let response = browser
        .post("/user/register", &registration("ada", "<<", "<<"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["template"], "user/register");
    let fields: Vec<_> = response.errors().into_iter().map(|(field, _)| field).collect();
    assert_eq!(fields, ["password"]);

    browser
        .post("/user/register", &registration("ada", "p<a&s>s", "p<a&s>s"))
        .await
        .assert_redirect("/user/login");
    browser
        .post("/user/login", &[("username", "ada"), ("password", "p<a&s>s")])
        .await
        .assert_redirect("/");
}
