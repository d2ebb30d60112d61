use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    response::Response,
};
use quizdoc::download::DownloadLink;
use quizdoc::web::{router, AppState, MAX_FORM_BYTES};
use quizdoc::GenerateOptions;
use tower::ServiceExt;

fn app() -> axum::Router {
    router(AppState::new(GenerateOptions::default()))
}

fn form_encode(value: &str) -> String {
    let mut out = String::from("json=");
    for b in value.bytes() {
        if b.is_ascii_alphanumeric() {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}

async fn submit(json: &str) -> Response {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/generate")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form_encode(json)))
        .expect("request build should succeed");
    app().oneshot(req).await.expect("router should respond")
}

async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be utf-8")
}

fn extract_href(html: &str) -> String {
    let start = html.find("href=\"data:").expect("download link present") + "href=\"".len();
    let end = start + html[start..].find('"').expect("closing quote");
    html[start..end].to_string()
}

#[tokio::test]
async fn form_page_renders() {
    let req = Request::builder()
        .uri("/")
        .body(Body::empty())
        .expect("request build should succeed");
    let resp = app().oneshot(req).await.expect("router should respond");

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Question Table Generator"));
    assert!(html.contains("Enter JSON Data:"));
    assert!(html.contains("Generate Document"));
}

#[tokio::test]
async fn health_check() {
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("request build should succeed");
    let resp = app().oneshot(req).await.expect("router should respond");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "ok");
}

#[tokio::test]
async fn valid_submission_offers_download() {
    let resp = submit(r#"[{"Options": [{"Option": "A", "Text": "foo"}], "Hint": "h", "Solution": "s"}]"#).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(resp).await;
    assert!(html.contains("Document generated successfully!"));
    assert!(html.contains("Download the generated document"));
    assert!(html.contains(r#"download="Generated_Questions.docx""#));

    let link = DownloadLink {
        file_name: "Generated_Questions.docx".to_string(),
        href: extract_href(&html),
    };
    let bytes = link.decode().expect("href should carry base64 data");
    let doc = quizdoc::read_docx_bytes(&bytes).expect("download should be a DOCX");
    assert_eq!(doc.table_count(), 3);
    assert_eq!(doc.page_break_count(), 1);
}

#[tokio::test]
async fn invalid_json_shows_error_inline() {
    let resp = submit("not json").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(resp).await;
    assert!(html.contains("Invalid JSON format. Please check your input."));
    assert!(!html.contains("Document generated successfully!"));
    assert!(!html.contains("href=\"data:"));
    // Input is kept in the textarea
    assert!(html.contains(">not json</textarea>"));
}

#[tokio::test]
async fn wrong_shape_shows_format_error() {
    let resp = submit(r#"{"foo": 1}"#).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(resp).await;
    assert!(html.contains("JSON data must be a list of questions."));
    assert!(!html.contains("href=\"data:"));
}

#[tokio::test]
async fn missing_options_shows_format_error() {
    let resp = submit(r#"[{"Hint": "h", "Solution": "s"}]"#).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(resp).await;
    assert!(html.contains("Options"));
    assert!(html.contains("role=\"alert\""));
}

#[tokio::test]
async fn oversized_submission_shows_error_inline() {
    let mut body = String::with_capacity(MAX_FORM_BYTES + 16);
    body.push_str("json=");
    body.push_str(&"a".repeat(MAX_FORM_BYTES));

    let req = Request::builder()
        .method(Method::POST)
        .uri("/generate")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .expect("request build should succeed");
    let resp = app().oneshot(req).await.expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(resp).await;
    assert!(html.contains("role=\"alert\""));
    assert!(html.contains("length limit exceeded"));
    assert!(html.contains("Enter JSON Data:"));
}

#[tokio::test]
async fn missing_content_type_shows_error_inline() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/generate")
        .body(Body::from("json=%5B%5D"))
        .expect("request build should succeed");
    let resp = app().oneshot(req).await.expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(resp).await;
    assert!(html.contains("role=\"alert\""));
    assert!(!html.contains("href=\"data:"));
}

#[tokio::test]
async fn configured_file_name_is_offered() {
    let app = router(AppState::new(
        GenerateOptions::default().with_file_name("unit3.docx"),
    ));
    let req = Request::builder()
        .method(Method::POST)
        .uri("/generate")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form_encode("[]")))
        .expect("request build should succeed");
    let resp = app.oneshot(req).await.expect("router should respond");

    let html = body_text(resp).await;
    assert!(html.contains(r#"download="unit3.docx""#));
}
