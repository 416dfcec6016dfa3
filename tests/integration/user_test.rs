//! Integration tests for profile pages and profile updates.

mod helpers;

use http::StatusCode;

use helpers::{Browser, PASSWORD, TestApp};
use library_entity::UserRole;

async fn can_log_in(app: &TestApp, username: &str, password: &str) -> bool {
    let mut browser: Browser = app.browser();
    let response = browser
        .post("/user/login", &[("username", username), ("password", password)])
        .await;
    response.location.as_deref() == Some("/")
}

#[tokio::test]
async fn test_profile_is_visible_only_to_its_owner() {
    let app = TestApp::new();
    let (ada, mut browser) = app.logged_in("ada", UserRole::User).await;
    let grace = app.create_test_user("grace", UserRole::User).await;

    let own = browser.get(&format!("/user/{ada}")).await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body["template"], "user/profile");
    assert_eq!(own.body["user"]["username"], "ada");
    assert!(own.body["user"].get("password_hash").is_none());

    browser.get(&format!("/user/{grace}")).await.assert_redirect("/");
    browser
        .get(&format!("/user/{grace}/update"))
        .await
        .assert_redirect("/");
    browser
        .post(
            &format!("/user/{grace}/update"),
            &[("fullname", "Hacked"), ("email", "x@example.com")],
        )
        .await
        .assert_redirect("/");

    let mut anonymous = app.browser();
    anonymous.get(&format!("/user/{ada}")).await.assert_redirect("/");
}

#[tokio::test]
async fn test_update_without_password_keeps_it() {
    let app = TestApp::new();
    let (ada, mut browser) = app.logged_in("ada", UserRole::User).await;

    browser
        .post(
            &format!("/user/{ada}/update"),
            &[("fullname", "Ada King"), ("email", "ada@example.org")],
        )
        .await
        .assert_redirect(&format!("/user/{ada}"));

    let profile = browser.get(&format!("/user/{ada}")).await;
    assert_eq!(profile.body["user"]["fullname"], "Ada King");
    assert_eq!(profile.body["user"]["email"], "ada@example.org");
    assert!(can_log_in(&app, "ada", PASSWORD).await);
}

#[tokio::test]
async fn test_update_with_password_rehashes() {
    let app = TestApp::new();
    let (ada, mut browser) = app.logged_in("ada", UserRole::User).await;

    browser
        .post(
            &format!("/user/{ada}/update"),
            &[
                ("fullname", "Ada"),
                ("email", "ada@example.com"),
                ("password", "brand-new-pw"),
                ("confirm_password", "brand-new-pw"),
            ],
        )
        .await
        .assert_redirect(&format!("/user/{ada}"));

    assert!(can_log_in(&app, "ada", "brand-new-pw").await);
    assert!(!can_log_in(&app, "ada", PASSWORD).await);
}

#[tokio::test]
async fn test_update_password_mismatch() {
    let app = TestApp::new();
    let (ada, mut browser) = app.logged_in("ada", UserRole::User).await;

    let response = browser
        .post(
            &format!("/user/{ada}/update"),
            &[
                ("fullname", "Ada"),
                ("email", "ada@example.com"),
                ("password", "brand-new-pw"),
                ("confirm_password", "other-pw"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["template"], "user/update");
    assert_eq!(
        response.errors(),
        vec![(
            "confirm_password".to_string(),
            "Password confirmation does not match.".to_string()
        )]
    );
    assert!(can_log_in(&app, "ada", PASSWORD).await);
}

#[tokio::test]
async fn test_only_admins_change_roles() {
    let app = TestApp::new();
    let (editor, mut browser) = app.logged_in("editor", UserRole::Editor).await;

    let response = browser
        .post(
            &format!("/user/{editor}/update"),
            &[("fullname", "Ed"), ("email", "ed@example.com"), ("role", "2")],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.errors(),
        vec![(
            "role".to_string(),
            "Only an administrator can change roles.".to_string()
        )]
    );

    // Resubmitting the current role is not a change.
    browser
        .post(
            &format!("/user/{editor}/update"),
            &[("fullname", "Ed"), ("email", "ed@example.com"), ("role", "1")],
        )
        .await
        .assert_redirect(&format!("/user/{editor}"));
}

#[tokio::test]
async fn test_admin_changes_role() {
    let app = TestApp::new();
    let (admin, mut browser) = app.logged_in("admin", UserRole::Admin).await;

    let form = browser.get(&format!("/user/{admin}/update")).await;
    assert_eq!(form.body["can_change_role"], true);
    assert_eq!(form.body["roles"].as_array().map(Vec::len), Some(3));

    browser
        .post(
            &format!("/user/{admin}/update"),
            &[("fullname", "Root"), ("email", "root@example.com"), ("role", "editor")],
        )
        .await
        .assert_redirect(&format!("/user/{admin}"));

    let profile = browser.get(&format!("/user/{admin}")).await;
    assert_eq!(profile.body["user"]["role"], 1);
    assert_eq!(profile.body["current_user"]["role_name"], "Editor");
}

#[tokio::test]
async fn test_invalid_role_value() {
    let app = TestApp::new();
    let (admin, mut browser) = app.logged_in("admin", UserRole::Admin).await;

    let response = browser
        .post(
            &format!("/user/{admin}/update"),
            &[("fullname", "Root"), ("email", "root@example.com"), ("role", "owner")],
        )
        .await;
    assert_eq!(
        response.errors(),
        vec![("role".to_string(), "Invalid role.".to_string())]
    );
}
