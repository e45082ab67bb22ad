//! HTTP-level tests for `GhostClient` against a local server

use ghostpost::*;
use std::io::Read;
use std::thread::{self, JoinHandle};
use tiny_http::{Header, Request, Response, Server};

struct Captured {
    method: String,
    url: String,
    authorization: Option<String>,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl Captured {
    fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn header_value(request: &Request, name: &'static str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str().to_string())
}

/// Answer exactly one request with `status` and `body`
fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<Captured>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();

    let handle = thread::spawn(move || {
        let mut request = server.recv().unwrap();
        let mut captured = Captured {
            method: request.method().to_string(),
            url: request.url().to_string(),
            authorization: header_value(&request, "Authorization"),
            content_type: header_value(&request, "Content-Type"),
            body: Vec::new(),
        };
        request.as_reader().read_to_end(&mut captured.body).unwrap();

        let content_type = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
        let response = Response::from_string(body)
            .with_status_code(status)
            .with_header(content_type);
        request.respond(response).unwrap();
        captured
    });

    (format!("http://127.0.0.1:{}", port), handle)
}

fn client(base_url: &str) -> GhostClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    GhostClient::with_client(base_url, http)
}

fn token() -> AdminToken {
    AdminToken::sign(&AdminKey::parse("abc:646566").unwrap()).unwrap()
}

fn sample_post() -> PostEnvelope {
    PostEnvelope::single(GhostPost::from_metadata(
        PostMetadata {
            title: Some("Hello".to_string()),
            ..Default::default()
        },
        "hello",
        "<p>Body</p>\n".to_string(),
    ))
}

#[tokio::test]
async fn test_upload_image_sends_multipart() {
    let (base_url, server) = serve_once(
        201,
        r#"{"images":[{"url":"https://blog.test/content/images/cat.png","ref":"attachments/cat.png"}]}"#,
    );
    let token = token();

    let url = client(&base_url)
        .upload_image(
            ImageUpload {
                file_name: "cat.png".to_string(),
                media_type: "image/png".to_string(),
                reference: "attachments/cat.png".to_string(),
                bytes: b"PNGDATA".to_vec(),
            },
            &token,
        )
        .await
        .unwrap();
    assert_eq!(url, "https://blog.test/content/images/cat.png");

    let captured = server.join().unwrap();
    assert_eq!(captured.method, "POST");
    assert_eq!(captured.url, "/ghost/api/admin/images/upload/");
    assert_eq!(captured.authorization, Some(token.authorization()));
    assert!(captured
        .content_type
        .as_ref()
        .unwrap()
        .starts_with("multipart/form-data"));

    let body = captured.body_text();
    let lowered = body.to_lowercase();
    assert!(lowered.contains(r#"name="file"; filename="cat.png""#));
    assert!(lowered.contains("content-type: image/png"));
    assert!(lowered.contains(r#"name="ref""#));
    assert!(body.contains("attachments/cat.png"));
    assert!(body.contains("PNGDATA"));
}

#[tokio::test]
async fn test_upload_image_without_url_fails() {
    let (base_url, server) = serve_once(200, r#"{"images":[]}"#);

    let result = client(&base_url)
        .upload_image(
            ImageUpload {
                file_name: "cat.png".to_string(),
                media_type: "image/png".to_string(),
                reference: "cat.png".to_string(),
                bytes: vec![1, 2, 3],
            },
            &token(),
        )
        .await;
    server.join().unwrap();

    assert!(matches!(result, Err(PublishError::UnexpectedResponse { .. })));
}

#[tokio::test]
async fn test_create_post_sends_json() {
    let (base_url, server) = serve_once(201, r#"{"posts":[{"title":"Hello","status":"draft"}]}"#);
    let token = token();

    let response = client(&base_url)
        .create_post(&sample_post(), &token)
        .await
        .unwrap();
    let outcome = PublishOutcome::from_response(response).unwrap();
    assert_eq!(outcome.notices(), vec!["\"Hello\" has been draft successful!"]);

    let captured = server.join().unwrap();
    assert_eq!(captured.url, "/ghost/api/v4/admin/posts/?source=html");
    assert_eq!(
        captured.content_type.as_deref(),
        Some("application/json;charset=utf-8")
    );
    assert_eq!(captured.authorization, Some(token.authorization()));

    let sent: serde_json::Value = serde_json::from_slice(&captured.body).unwrap();
    assert_eq!(sent["posts"][0]["title"], "Hello");
    assert_eq!(sent["posts"][0]["slug"], "hello");
    assert_eq!(sent["posts"][0]["html"], "<p>Body</p>\n");
}

#[tokio::test]
async fn test_create_post_reads_validation_errors() {
    let (base_url, server) = serve_once(
        422,
        r#"{"errors":[{"message":"Validation failed","context":null,"details":[{"message":"must be one of","params":{"allowedValues":["public","members"]}}]}]}"#,
    );

    let response = client(&base_url)
        .create_post(&sample_post(), &token())
        .await
        .unwrap();
    server.join().unwrap();

    let outcome = PublishOutcome::from_response(response).unwrap();
    assert_eq!(
        outcome.notices(),
        vec!["Validation failed", "must be one of - public,members"]
    );
}

#[tokio::test]
async fn test_create_post_non_json_body() {
    let (base_url, server) = serve_once(502, "<html>Bad Gateway</html>");

    let result = client(&base_url)
        .create_post(&sample_post(), &token())
        .await;
    server.join().unwrap();

    let err = result.unwrap_err();
    assert!(matches!(err, PublishError::Json(_)));
    assert_eq!(err.kind_name(), "SyntaxError");
}
