#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use salon_booking::test_utils::test_helpers;
use sqlx::SqlitePool;
use tower::ServiceExt; // for `oneshot`

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct-horse";

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

/// Drives the router like a browser: keeps the session cookie between calls.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    pub async fn new(pool: &SqlitePool) -> Self {
        let app = test_helpers::create_test_app(pool)
            .await
            .expect("test app to build");
        Self { app, cookie: None }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self
            .request_builder("GET", uri)
            .body(Body::empty())
            .expect("request to build");
        self.send(request).await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = serde_urlencoded::to_string(fields).expect("form to encode");
        let request = self
            .request_builder("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("request to build");
        self.send(request).await
    }

    /// Loads `form_uri`, then posts `fields` with the page's CSRF token.
    pub async fn submit_form(
        &mut self,
        form_uri: &str,
        fields: &[(&str, &str)],
    ) -> TestResponse {
        let page = self.get(form_uri).await;
        assert_eq!(page.status, StatusCode::OK, "form page should render");
        let token = csrf_token(&page.body);

        let mut with_token: Vec<(&str, &str)> = fields.to_vec();
        with_token.push(("csrf_token", token.as_str()));
        self.post_form(form_uri, &with_token).await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        self.submit_form("/login", &[("username", username), ("password", password)])
            .await
    }

    fn request_builder(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router to respond");

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or_default().to_string();
            let value_is_empty = pair.split_once('=').map(|(_, v)| v.is_empty()).unwrap_or(true);
            self.cookie = if value_is_empty { None } else { Some(pair) };
        }

        let status = response.status();
        let headers = response.headers().clone();
        let location = headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body to collect");

        TestResponse {
            status,
            location,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// Pulls the hidden CSRF field out of a rendered form.
pub fn csrf_token(html: &str) -> String {
    let marker = r#"name="csrf_token" value=""#;
    let start = html.find(marker).expect("page to contain a CSRF field") + marker.len();
    let end = html[start..].find('"').expect("CSRF value to be quoted");
    html[start..start + end].to_string()
}

pub async fn setup_pool_with_admin() -> SqlitePool {
    let pool = test_helpers::create_test_db().await.unwrap();
    test_helpers::insert_test_user(&pool, ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .unwrap();
    pool
}

pub async fn appointment_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM appointments")
        .fetch_one(pool)
        .await
        .unwrap()
}
