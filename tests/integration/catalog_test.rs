//! Integration tests for the catalog pages and their guards.

mod helpers;

use http::StatusCode;

use helpers::{Browser, TestApp};
use library_entity::UserRole;

/// Last path segment of a redirect location, i.e. the new entity id.
fn created_id(location: Option<&str>) -> String {
    location
        .and_then(|l| l.rsplit('/').next())
        .expect("redirect location")
        .to_string()
}

async fn create_author(browser: &mut Browser, first: &str, last: &str) -> String {
    let response = browser
        .post(
            "/catalog/author/create",
            &[("firstName", first), ("lastName", last), ("dob", "1815-12-10")],
        )
        .await;
    assert_eq!(response.status, StatusCode::FOUND, "body: {}", response.body);
    created_id(response.location.as_deref())
}

async fn create_genre(browser: &mut Browser, name: &str) -> String {
    let response = browser.post("/catalog/genre/create", &[("name", name)]).await;
    assert_eq!(response.status, StatusCode::FOUND, "body: {}", response.body);
    created_id(response.location.as_deref())
}

async fn create_book(browser: &mut Browser, author: &str, genres: &[&str]) -> String {
    let mut form = vec![
        ("title", "Notes"),
        ("author", author),
        ("summary", "On the Analytical Engine"),
        ("isbn", "978-0"),
    ];
    form.extend(genres.iter().map(|g| ("genre", *g)));
    let response = browser.post("/catalog/book/create", &form).await;
    assert_eq!(response.status, StatusCode::FOUND, "body: {}", response.body);
    created_id(response.location.as_deref())
}

#[tokio::test]
async fn test_anonymous_can_browse_but_not_create() {
    let app = TestApp::new();
    let mut browser = app.browser();

    let list = browser.get("/catalog/authors").await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body["template"], "author/list");
    assert_eq!(list.body["authors"], serde_json::json!([]));

    browser.get("/catalog/author/create").await.assert_redirect("/");
    browser
        .post("/catalog/genre/create", &[("name", "Fiction")])
        .await
        .assert_redirect("/");
    assert_eq!(browser.get("/catalog/genres").await.body["genres"], serde_json::json!([]));
}

#[tokio::test]
async fn test_user_role_cannot_create() {
    let app = TestApp::new();
    let (_, mut browser) = app.logged_in("reader", UserRole::User).await;

    browser.get("/catalog/book/create").await.assert_redirect("/");
    browser
        .post("/catalog/genre/create", &[("name", "Fiction")])
        .await
        .assert_redirect("/");
}

#[tokio::test]
async fn test_editor_can_create_and_update_but_not_delete() {
    let app = TestApp::new();
    let (_, mut editor) = app.logged_in("editor", UserRole::Editor).await;

    let form = editor.get("/catalog/author/create").await;
    assert_eq!(form.status, StatusCode::OK);
    assert_eq!(form.body["template"], "author/create");

    let id = create_author(&mut editor, "Ada", "Lovelace").await;
    let detail = editor.get(&format!("/catalog/author/{id}")).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body["author"]["name"], "Lovelace, Ada");

    editor
        .post(
            &format!("/catalog/author/{id}/update"),
            &[("firstName", "Augusta Ada"), ("lastName", "King")],
        )
        .await
        .assert_redirect(&format!("/catalog/author/{id}"));
    let detail = editor.get(&format!("/catalog/author/{id}")).await;
    assert_eq!(detail.body["author"]["family_name"], "King");

    editor
        .get(&format!("/catalog/author/{id}/delete"))
        .await
        .assert_redirect("/");
    editor
        .post(&format!("/catalog/author/{id}/delete"), &[])
        .await
        .assert_redirect("/");
    assert_eq!(
        editor.get(&format!("/catalog/author/{id}")).await.status,
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_author_form_errors_and_draft() {
    let app = TestApp::new();
    let (_, mut editor) = app.logged_in("editor", UserRole::Editor).await;

    let response = editor
        .post(
            "/catalog/author/create",
            &[("firstName", " <b>Ada</b> "), ("lastName", ""), ("dob", "not-a-date")],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["template"], "author/create");
    assert_eq!(
        response.errors(),
        vec![
            ("family_name".to_string(), "Family name must be specified.".to_string()),
            ("date_of_birth".to_string(), "Invalid date of birth".to_string()),
        ]
    );
    assert_eq!(
        response.body["author"]["first_name"],
        "&lt;b&gt;Ada&lt;&#x2F;b&gt;"
    );
    assert!(app.state.authors.list().await.expect("list").is_empty());
}

#[tokio::test]
async fn test_author_delete_blocked_by_books() {
    let app = TestApp::new();
    let (_, mut admin) = app.logged_in("admin", UserRole::Admin).await;

    let author = create_author(&mut admin, "Ada", "Lovelace").await;
    let book = create_book(&mut admin, &author, &[]).await;

    let response = admin.post(&format!("/catalog/author/{author}/delete"), &[]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["template"], "author/delete");
    assert_eq!(response.body["books"].as_array().map(Vec::len), Some(1));

    admin
        .post(&format!("/catalog/book/{book}/delete"), &[])
        .await
        .assert_redirect("/catalog/books");
    admin
        .post(&format!("/catalog/author/{author}/delete"), &[])
        .await
        .assert_redirect("/catalog/authors");
    assert_eq!(
        admin.get(&format!("/catalog/author/{author}")).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_delete_form_for_missing_entity_redirects_to_list() {
    let app = TestApp::new();
    let (_, mut admin) = app.logged_in("admin", UserRole::Admin).await;

    admin
        .get("/catalog/genre/0190a5d4-0000-7000-8000-000000000000/delete")
        .await
        .assert_redirect("/catalog/genres");
}

#[tokio::test]
async fn test_genre_create_validation_and_reuse() {
    let app = TestApp::new();
    let (_, mut editor) = app.logged_in("editor", UserRole::Editor).await;

    let response = editor.post("/catalog/genre/create", &[("name", "Fi")]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.errors(),
        vec![("name".to_string(), "Genre name at least 3 characters".to_string())]
    );
    assert_eq!(response.body["genre"]["name"], "Fi");

    let first = editor.post("/catalog/genre/create", &[("name", "Fiction")]).await;
    assert_eq!(first.status, StatusCode::FOUND);
    let second = editor.post("/catalog/genre/create", &[("name", "Fiction")]).await;
    assert_eq!(second.location, first.location);

    let list = editor.get("/catalog/genres").await;
    assert_eq!(list.body["genres"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_genre_rename_to_taken_name() {
    let app = TestApp::new();
    let (_, mut editor) = app.logged_in("editor", UserRole::Editor).await;
    create_genre(&mut editor, "Fiction").await;
    let poetry = create_genre(&mut editor, "Poetry").await;

    let response = editor
        .post(&format!("/catalog/genre/{poetry}/update"), &[("name", "Fiction")])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.errors(),
        vec![("name".to_string(), "Genre name already exists".to_string())]
    );

    // Keeping its own name is fine.
    editor
        .post(&format!("/catalog/genre/{poetry}/update"), &[("name", "Poetry")])
        .await
        .assert_redirect(&format!("/catalog/genre/{poetry}"));
}

#[tokio::test]
async fn test_book_reference_errors_come_last() {
    let app = TestApp::new();
    let (_, mut editor) = app.logged_in("editor", UserRole::Editor).await;

    let response = editor
        .post(
            "/catalog/book/create",
            &[
                ("title", ""),
                ("author", "0190a5d4-0000-7000-8000-000000000000"),
                ("summary", "s"),
                ("isbn", "i"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["template"], "book/create");
    let errors = response.errors();
    assert_eq!(errors.first().map(|(f, _)| f.as_str()), Some("title"));
    assert_eq!(
        errors.last(),
        Some(&("author".to_string(), "Author not found".to_string()))
    );
    assert!(response.body["authors"].is_array());
    assert!(response.body["genres"].is_array());
}

#[tokio::test]
async fn test_book_detail_populates_references() {
    let app = TestApp::new();
    let (_, mut editor) = app.logged_in("editor", UserRole::Editor).await;
    let author = create_author(&mut editor, "Ada", "Lovelace").await;
    let fiction = create_genre(&mut editor, "Fiction").await;
    let book = create_book(&mut editor, &author, &[fiction.as_str()]).await;

    let response = editor
        .post(
            "/catalog/bookinstance/create",
            &[("book", book.as_str()), ("imprint", "London, 1843"), ("status", "Available")],
        )
        .await;
    assert_eq!(response.status, StatusCode::FOUND);

    let detail = editor.get(&format!("/catalog/book/{book}")).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body["title"], "Notes");
    assert_eq!(detail.body["book"]["author"]["name"], "Lovelace, Ada");
    assert_eq!(detail.body["book"]["genre"][0]["name"], "Fiction");
    assert_eq!(detail.body["bookinstances"][0]["status"], "Available");

    let home = editor.get("/").await;
    let counts = home.body["data"].as_array().expect("counts");
    let value = |name: &str| {
        counts
            .iter()
            .find(|c| c["name"] == name)
            .map(|c| c["value"].clone())
    };
    assert_eq!(value("Books"), Some(1.into()));
    assert_eq!(value("Copies Available"), Some(1.into()));
}

#[tokio::test]
async fn test_book_instance_status_rules() {
    let app = TestApp::new();
    let (_, mut editor) = app.logged_in("editor", UserRole::Editor).await;
    let author = create_author(&mut editor, "Ada", "Lovelace").await;
    let book = create_book(&mut editor, &author, &[]).await;

    let response = editor
        .post(
            "/catalog/bookinstance/create",
            &[("book", book.as_str()), ("imprint", "x"), ("status", "Lost")],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.errors(),
        vec![("status".to_string(), "Invalid status".to_string())]
    );
    assert_eq!(response.body["statuses"].as_array().map(Vec::len), Some(4));

    let response = editor
        .post("/catalog/bookinstance/create", &[("book", book.as_str()), ("imprint", "x")])
        .await;
    let id = created_id(response.location.as_deref());
    let detail = editor.get(&format!("/catalog/bookinstance/{id}")).await;
    assert_eq!(detail.body["bookinstance"]["status"], "Maintenance");
}

#[tokio::test]
async fn test_unknown_and_malformed_ids_are_404() {
    let app = TestApp::new();
    let mut browser = app.browser();

    let missing = browser
        .get("/catalog/book/0190a5d4-0000-7000-8000-000000000000")
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["template"], "error");
    assert_eq!(missing.body["message"], "Book not found");

    let malformed = browser.get("/catalog/genre/not-an-id").await;
    assert_eq!(malformed.status, StatusCode::NOT_FOUND);

    let unknown = browser.get("/catalog/nothing-here").await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.body["status"], 404);
}
