//! Shared helpers for driving the full router in-process

#![allow(dead_code)]

use std::io::Cursor;
use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use employee_server::{Config, ServerState, build_app};
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use image::{ImageBuffer, ImageFormat, Rgb};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

pub const PASSWORD: &str = "secret12";

const BOUNDARY: &str = "----employee-test-boundary";

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
    work_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let work_dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests(work_dir.path().to_string_lossy());
        let state = ServerState::in_memory(&config).await.unwrap();
        let app = build_app(state.clone());
        Self {
            app,
            state,
            work_dir,
        }
    }

    /// Filesystem path of a stored `uploads/<file>` reference
    pub fn photo_path(&self, reference: &str) -> PathBuf {
        self.work_dir.path().join(reference)
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.work_dir.path().join("uploads")
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    /// Register through the API and return the new employee id
    pub async fn register(&self, email: &str, full_name: &str) -> u32 {
        let (status, body) = self
            .send(json_request(
                Method::POST,
                "/api/employees/register",
                employee_json(email, full_name),
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["employeeId"].as_u64().unwrap() as u32
    }

    /// Log in and return the bearer token
    pub async fn login(&self, email: &str) -> String {
        let (status, body) = self
            .send(json_request(
                Method::POST,
                "/api/employees/login",
                json!({ "email": email, "password": PASSWORD }),
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    pub fn stored_photos(&self) -> Vec<PathBuf> {
        match std::fs::read_dir(self.uploads_dir()) {
            Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
            Err(_) => Vec::new(),
        }
    }
}

pub fn employee_json(email: &str, full_name: &str) -> Value {
    json!({
        "fullName": full_name,
        "age": 29,
        "gender": "female",
        "phone": "+91 98765 43210",
        "email": email,
        "password": PASSWORD,
        "companyName": "Acme",
        "salary": 52000.5,
        "location": "Bengaluru",
        "address": "12 Park Street"
    })
}

pub fn json_request(method: Method, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn delete_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::DELETE).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub const NO_FIELDS: &[(&str, &str)] = &[];

/// A `(file name, content type, bytes)` file part
pub type FilePart<'a> = (&'a str, &'a str, &'a [u8]);

pub fn multipart_request<K, V>(
    method: Method,
    uri: &str,
    fields: &[(K, V)],
    photo: Option<FilePart<'_>>,
    token: Option<&str>,
) -> Request<Body>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut body = Vec::new();
    for (name, value) in fields {
        let (name, value) = (name.as_ref(), value.as_ref());
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, content_type, data)) = photo {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

/// Registration fields as multipart text, numbers included
pub fn employee_form_fields(email: &str) -> Vec<(&'static str, String)> {
    vec![
        ("fullName", "Ravi Kumar".to_string()),
        ("age", "34".to_string()),
        ("gender", "male".to_string()),
        ("phone", "9876543210".to_string()),
        ("email", email.to_string()),
        ("password", PASSWORD.to_string()),
        ("companyName", "Globex".to_string()),
        ("salary", "61000".to_string()),
        ("address", "4 Lake Road".to_string()),
    ]
}

pub fn png_bytes(color: [u8; 3]) -> Vec<u8> {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(8, 8, Rgb(color));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}
