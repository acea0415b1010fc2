// file: tests/server_test.rs
// description: router behaviour driven through tower without binding a socket

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use pubmed_rag::server::{ErrorBody, MAX_QUESTION_CHARS, router};
use pubmed_rag::generation::mock::ScriptedGenerator;
use pubmed_rag::search::mock::ScriptedSearch;
use pubmed_rag::{AskPipeline, AskReport, Config};
use std::sync::Arc;
use tower::ServiceExt;

fn pipeline(answer: &str, search: ScriptedSearch) -> Arc<AskPipeline> {
    Arc::new(AskPipeline::new(
        Arc::new(ScriptedGenerator::new("keyword_llm", vec!["mRNA Vaccines\nNeoplasms"])),
        Arc::new(ScriptedGenerator::new("llm", vec![answer])),
        Arc::new(search),
        &Config::default_config(),
    ))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_index_renders_form() {
    let app = router(pipeline("unused", ScriptedSearch::echo()));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("HealthCare chatbot for keyword and answer generation"));
    assert!(html.contains("<form method=\"post\" action=\"/\">"));
    assert!(html.contains("How to treat a COVID infected Patient?"));
}

#[tokio::test]
async fn test_form_submit_renders_markdown_answer() {
    let app = router(pipeline(
        "**Yes.** mRNA vaccines <script>x</script> help.",
        ScriptedSearch::echo(),
    ));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(
                    "question=How+are+mRNA+vaccines+being+used+for+cancer+treatment%3F",
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<strong>Yes.</strong>"));
    assert!(!html.contains("<script>x</script>"));
    assert!(html.contains("value=\"How are mRNA vaccines being used for cancer treatment?\""));
    assert!(html.contains("Study of mRNA Vaccines"));
    assert!(!html.contains("class=\"notice\""));
}

#[tokio::test]
async fn test_form_submit_shows_partial_notice() {
    let app = router(pipeline("answer", ScriptedSearch::echo().failing_on(2)));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("question=cancer"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("class=\"notice\""));
    assert!(html.contains("based on 1 article(s)"));
}

#[tokio::test]
async fn test_api_ask_returns_report() {
    let app = router(pipeline("final answer", ScriptedSearch::echo()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/ask")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"question": "Tell me about HIV AIDS."}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let report: AskReport = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(report.answer, "final answer");
    assert_eq!(report.question, "Tell me about HIV AIDS.");
    assert_eq!(report.documents.len(), 2);
    assert_eq!(report.stats.search_calls, 2);
}

#[tokio::test]
async fn test_api_ask_rejects_long_question() {
    let app = router(pipeline("unused", ScriptedSearch::echo()));
    let question = "a".repeat(MAX_QUESTION_CHARS + 1);
    let body = serde_json::json!({ "question": question }).to_string();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/ask")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(error.error.contains("too long"));
}

#[tokio::test]
async fn test_api_ask_generation_failure_is_bad_gateway() {
    let app = router(Arc::new(AskPipeline::new(
        Arc::new(ScriptedGenerator::new("keyword_llm", vec![])),
        Arc::new(ScriptedGenerator::new("llm", vec![])),
        Arc::new(ScriptedSearch::echo()),
        &Config::default_config(),
    )));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/ask")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"question": "x"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let error: ErrorBody = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(error.error.contains("keyword_llm"));
}

#[tokio::test]
async fn test_health_reflects_search_probe() {
    let healthy = router(pipeline("unused", ScriptedSearch::echo()))
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(healthy.status(), StatusCode::OK);

    let unhealthy = router(pipeline("unused", ScriptedSearch::echo().failing_on(1)))
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(unhealthy.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = serde_json::from_str(&body_string(unhealthy).await).unwrap();
    assert_eq!(body["overall_status"], "unhealthy");
}
