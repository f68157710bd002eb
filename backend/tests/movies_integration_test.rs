//! Integration tests for the movie catalog routes

mod common;

use axum::http::StatusCode;

fn unique(prefix: &str) -> String {
    format!(
        "{}{}",
        prefix,
        &uuid::Uuid::new_v4().simple().to_string()[..8]
    )
}

async fn seed_movie(app: &common::TestApp, title: &str, genre: &str, director: &str) {
    sqlx::query(
        r#"
        INSERT INTO movies (title, description, genre, director, featured)
        VALUES ($1, 'Seeded for tests',
                jsonb_build_object('name', $2::text, 'description', ''),
                jsonb_build_object('name', $3::text, 'bio', 'A director'),
                FALSE)
        ON CONFLICT (title) DO NOTHING
        "#,
    )
    .bind(title)
    .bind(genre)
    .bind(director)
    .execute(&app.pool)
    .await
    .unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn catalog_requires_authentication() {
    let app = common::TestApp::new().await;

    for path in [
        "/api/v1/movies",
        "/api/v1/movies/title/Sully",
        "/api/v1/movies/genres/Drama",
        "/api/v1/movies/directors/Clint%20Eastwood",
        "/api/v1/movies/directors/Clint%20Eastwood/movies",
    ] {
        let (status, _) = app.get(path, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "path: {}", path);
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn list_and_lookup_by_title() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&unique("goer"), "S3curePassword!")
        .await;

    seed_movie(&app, "Road to Perdition", "Crime", "Sam Mendes").await;

    let (status, response) = app.get("/api/v1/movies", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let movies: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(!movies.as_array().unwrap().is_empty());

    let (status, response) = app
        .get("/api/v1/movies/title/Road%20to%20Perdition", Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    let movie: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(movie["title"], "Road to Perdition");
    assert_eq!(movie["genre"]["name"], "Crime");

    let (status, _) = app
        .get("/api/v1/movies/title/No%20Such%20Movie", Some(&token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn lookup_by_genre() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&unique("goer"), "S3curePassword!")
        .await;

    seed_movie(&app, "Catch Me If You Can", "Biography", "Steven Spielberg").await;
    seed_movie(&app, "Sully", "Biography", "Clint Eastwood").await;

    let (status, response) = app
        .get("/api/v1/movies/genres/Biography", Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    let movies: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(movies.as_array().unwrap().len() >= 2);

    // Empty genre result is a 404
    let (status, _) = app
        .get("/api/v1/movies/genres/NoSuchGenre", Some(&token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn lookup_director_and_their_movies() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&unique("goer"), "S3curePassword!")
        .await;

    seed_movie(&app, "The Terminal", "Comedy", "Steven Spielberg").await;
    seed_movie(&app, "Catch Me If You Can", "Biography", "Steven Spielberg").await;

    let (status, response) = app
        .get("/api/v1/movies/directors/Steven%20Spielberg", Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    let director: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(director["name"], "Steven Spielberg");

    let (status, response) = app
        .get(
            "/api/v1/movies/directors/Steven%20Spielberg/movies",
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let movies: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(movies.as_array().unwrap().len() >= 2);

    let (status, _) = app
        .get("/api/v1/movies/directors/Nobody", Some(&token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
