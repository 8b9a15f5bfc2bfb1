use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use jobboard::{AppState, Settings};

const ADMIN: &str = "admin@jobboard.local";

async fn test_app() -> Router {
    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    let state = AppState::new(db_pool, Settings::default()).await.unwrap();
    jobboard::app(state)
}

/// One browser: remembers the session cookie between requests.
struct Visitor {
    app: Router,
    cookie: Option<String>,
}

impl Visitor {
    fn new(app: &Router) -> Self {
        Visitor { app: app.clone(), cookie: None }
    }

    async fn send(&mut self, method: Method, uri: &str, body: Option<Body>, json: bool) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        if json {
            request = request.header(header::CONTENT_TYPE, "application/json");
        }
        let request = request.body(body.unwrap_or_else(Body::empty)).unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap().to_owned();
            self.cookie = Some(pair);
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes().to_vec();
        (status, headers, bytes)
    }

    async fn call(&mut self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let has_body = body.is_some();
        let body = body.map(|value| Body::from(value.to_string()));
        let (status, _, bytes) = self.send(method, uri, body, has_body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn get(&mut self, uri: &str) -> (StatusCode, Value) {
        self.call(Method::GET, uri, None).await
    }

    async fn post(&mut self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::POST, uri, Some(body)).await
    }

    async fn post_empty(&mut self, uri: &str) -> (StatusCode, Value) {
        self.call(Method::POST, uri, None).await
    }

    async fn register_student(&mut self, email: &str) -> Value {
        self.post_empty("/flow/register").await;
        let (status, stage) = self
            .post("/register", json!({ "email": email, "fullName": "Ada Obi", "role": "student" }))
            .await;
        assert_eq!(status, StatusCode::OK);
        stage
    }

    async fn login(&mut self, email: &str) -> (StatusCode, Value) {
        self.post_empty("/flow/continue").await;
        self.post("/login", json!({ "email": email })).await
    }
}

fn profile_form() -> Value {
    json!({
        "name": "Ada Obi",
        "img": "https://example.com/ada.png",
        "email": "ada@example.com",
        "jobTitle": "Backend Engineer",
        "city": "Lagos",
        "state": "Lagos",
        "country": "Nigeria",
        "github": "https://github.com/ada",
        "skills": "Rust, SQL"
    })
}

#[tokio::test]
async fn new_visitor_sees_the_landing_page() {
    let app = test_app().await;
    let mut visitor = Visitor::new(&app);

    let (status, headers, body) = visitor.send(Method::GET, "/", None, false).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));
    assert!(String::from_utf8(body).unwrap().contains("<h1>Job Board</h1>"));

    assert_eq!(visitor.get("/flow").await.1, json!({ "stage": "landing" }));
}

#[tokio::test]
async fn student_registers_fills_profile_and_browses() {
    let app = test_app().await;
    let mut visitor = Visitor::new(&app);

    let stage = visitor.register_student("ada@example.com").await;
    assert_eq!(stage, json!({ "stage": "profile_capture" }));

    let (status, _) = visitor.get("/profiles").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, profile) = visitor.post("/profiles", profile_form()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(profile["skills"], json!(["Rust", "SQL"]));
    assert_eq!(profile["status"], "approved");

    assert_eq!(visitor.get("/flow").await.1, json!({ "stage": "main" }));

    let (status, listed) = visitor.get("/profiles").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed[0]["id"], profile["id"]);

    let (_, found) = visitor.get("/profiles?q=ADA%20OBI").await;
    assert_eq!(found.as_array().unwrap().len(), 1);

    let (_, facets) = visitor.get("/profiles/facets").await;
    assert_eq!(facets["cities"][0], "Lagos");
}

#[tokio::test]
async fn returning_student_skips_the_wizard() {
    let app = test_app().await;
    let mut first = Visitor::new(&app);
    first.register_student("ada@example.com").await;
    first.post("/profiles", profile_form()).await;
    first.get("/logout").await;

    let mut later = Visitor::new(&app);
    let (status, stage) = later.login("ada@example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stage, json!({ "stage": "main" }));
}

#[tokio::test]
async fn invalid_profile_is_blocked() {
    let app = test_app().await;
    let mut visitor = Visitor::new(&app);
    visitor.register_student("ada@example.com").await;

    let mut form = profile_form();
    form["country"] = json!("India");
    form["state"] = json!("Goa");
    let (status, body) = visitor.post("/profiles", form).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "state");

    let mut form = profile_form();
    form["img"] = json!("ada.png");
    let (status, body) = visitor.post("/profiles", form).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "img");

    assert_eq!(visitor.get("/flow").await.1, json!({ "stage": "profile_capture" }));
}

#[tokio::test]
async fn unknown_login_is_not_found() {
    let app = test_app().await;
    let mut visitor = Visitor::new(&app);
    let (status, _) = visitor.login("ghost@example.com").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn recruiter_preview_and_sign_out() {
    let app = test_app().await;
    let mut visitor = Visitor::new(&app);

    let (_, stage) = visitor.post_empty("/flow/hire").await;
    assert_eq!(stage, json!({ "stage": "main" }));

    let (status, people) = visitor.get("/profiles?cities=Pune,Lagos").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(people.as_array().unwrap().len(), 2);

    let (status, headers, _) = visitor.send(Method::GET, "/", None, false).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/profiles");

    let (status, _) = visitor.get("/admin/jobs").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, headers, _) = visitor.send(Method::GET, "/logout?return_url=/", None, false).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/");
    assert_eq!(visitor.get("/flow").await.1, json!({ "stage": "landing" }));

    let (status, headers, _) = visitor
        .send(Method::GET, "/logout?return_url=https://evil.example/", None, false)
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/");
}

#[tokio::test]
async fn admin_manages_jobs() {
    let app = test_app().await;
    let mut admin = Visitor::new(&app);

    let (status, stage) = admin.login(ADMIN).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stage, json!({ "stage": "admin" }));

    let (_, jobs) = admin.get("/admin/jobs").await;
    assert_eq!(jobs.as_array().unwrap().len(), 2);

    let (status, job) = admin.post("/admin/jobs", json!({ "jobTitle": "", "company": "Initech" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(job["jobTitle"], "Untitled");
    let id = job["id"].as_str().unwrap().to_owned();

    let (_, updated) = admin
        .call(Method::PUT, &format!("/admin/jobs/{id}"), Some(json!({ "jobTitle": "SRE" })))
        .await;
    assert_eq!(updated["jobTitle"], "SRE");

    let (_, missing) = admin
        .call(Method::PUT, "/admin/jobs/nope", Some(json!({ "jobTitle": "x" })))
        .await;
    assert_eq!(missing, Value::Null);

    let (status, _) = admin.call(Method::DELETE, "/admin/jobs/nope", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(admin.get("/admin/jobs").await.1.as_array().unwrap().len(), 3);

    let (_, found) = admin.get("/admin/jobs?q=globex").await;
    assert_eq!(found[0]["id"], "2");

    let (status, _) = admin.call(Method::DELETE, "/admin/jobs/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(admin.get("/admin/jobs").await.1.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn export_and_import() {
    let app = test_app().await;
    let mut admin = Visitor::new(&app);
    admin.login(ADMIN).await;
    admin.post("/admin/jobs", json!({ "jobTitle": "QA Lead" })).await;

    let (status, headers, body) = admin.send(Method::GET, "/admin/jobs/export", None, false).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"jobs-export.json\""
    );
    let exported = String::from_utf8(body).unwrap();
    let before = admin.get("/admin/jobs").await.1;

    let (status, _) = admin.post_empty("/admin/jobs/clear").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(admin.get("/admin/jobs").await.1, json!([]));

    let (status, _, body) = admin
        .send(Method::POST, "/admin/jobs/import", Some(Body::from(exported)), false)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!({ "imported": 3 }));
    assert_eq!(admin.get("/admin/jobs").await.1, before);

    for bad in [r#"{"id":"1","jobTitle":"x"}"#, r#"[{"id":"1"}]"#, "nope"] {
        let (status, _, _) = admin
            .send(Method::POST, "/admin/jobs/import", Some(Body::from(bad)), false)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{bad}");
    }
    assert_eq!(admin.get("/admin/jobs").await.1, before);
}

#[tokio::test]
async fn health_probe() {
    let app = test_app().await;
    let mut visitor = Visitor::new(&app);
    let (status, _, body) = visitor.send(Method::GET, "/healthz", None, false).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}
