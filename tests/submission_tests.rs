//! Submission client integration tests against a mock analysis service

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use moodreel::application::ports::{AnalysisError, EmotionAnalyzer};
use moodreel::application::AnalyzeUseCase;
use moodreel::domain::analysis::{AnalysisRequest, MediaFile, ModalityResult};
use moodreel::infrastructure::HttpEmotionAnalyzer;

fn analyzer(server: &MockServer) -> HttpEmotionAnalyzer {
    HttpEmotionAnalyzer::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

fn text_request(text: &str) -> AnalysisRequest {
    AnalysisRequest::new(Some(text), None, None).unwrap()
}

async fn mount(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/analyze_emotion"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn camel_case_reply_is_normalized() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "sessionId": "3f2a",
            "emotionAnalysis": {
                "finalEmotion": "sad",
                "finalConfidence": 0.82,
                "textResult": {"emotion": "sad", "confidence": 0.9}
            },
            "recommendations": [
                {"id": 11, "name": "Inside Out", "poster": "http://img/io.jpg",
                 "genres": ["Animation", "Family"], "vote_average": 8.1, "release_year": 2015}
            ]
        })),
    )
    .await;

    let outcome = AnalyzeUseCase::new(analyzer(&server))
        .submit(&text_request("rough day"))
        .await;

    assert!(outcome.succeeded);
    assert_eq!(outcome.session_id.as_deref(), Some("3f2a"));
    assert_eq!(outcome.fusion.final_emotion, "sad");
    assert_eq!(outcome.fusion.text, Some(ModalityResult::new("sad", 0.9)));
    assert_eq!(outcome.recommendations.len(), 1);

    let item = &outcome.recommendations[0];
    assert_eq!(item.title, "Inside Out");
    assert_eq!(item.thumbnail_url, "http://img/io.jpg");
    assert_eq!(item.genre, "Animation, Family");
    assert_eq!(item.rating.to_string(), "8.1");
    assert_eq!(item.year.to_string(), "2015");
}

#[tokio::test]
async fn multipart_body_carries_only_present_fields() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"success": true})),
    )
    .await;

    let request = AnalysisRequest::new(
        Some("hello there"),
        None,
        Some(MediaFile::new("voice.wav", "audio/wav", b"RIFF0000".to_vec())),
    )
    .unwrap();

    analyzer(&server).analyze(&request).await.unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);

    let content_type = received[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&received[0].body);
    assert!(body.contains("name=\"text\""));
    assert!(body.contains("hello there"));
    assert!(body.contains("name=\"audio\"; filename=\"voice.wav\""));
    assert!(body.contains("audio/wav"));
    assert!(!body.contains("name=\"image\""));
}

#[tokio::test]
async fn server_error_falls_back() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(500).set_body_string("model crashed")).await;

    let err = analyzer(&server)
        .analyze(&text_request("anything"))
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Server { status: 500, .. }));

    let outcome = AnalyzeUseCase::new(analyzer(&server))
        .submit(&text_request("anything"))
        .await;
    assert!(!outcome.succeeded);
    assert_eq!(outcome.fusion.final_emotion, "happy");
    assert_eq!(outcome.recommendations.len(), 4);
}

#[tokio::test]
async fn malformed_json_falls_back() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_string("{not json")).await;

    let err = analyzer(&server)
        .analyze(&text_request("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Parse(_)));
}

#[tokio::test]
async fn success_false_body_keeps_service_results() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "emotion_analysis": {"final_emotion": "sad", "final_confidence": 0.9},
            "recommendations": [{"title": "Up"}]
        })),
    )
    .await;

    let outcome = AnalyzeUseCase::new(analyzer(&server))
        .submit(&text_request("hi"))
        .await;

    assert!(outcome.succeeded);
    assert_eq!(outcome.fusion.final_emotion, "sad");
    assert_eq!(outcome.fusion.final_confidence, 0.9);
    let titles: Vec<_> = outcome
        .recommendations
        .iter()
        .map(|i| i.title.as_str())
        .collect();
    assert_eq!(titles, ["Up"]);
}

#[tokio::test]
async fn empty_recommendations_use_catalog() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "emotion_analysis": {"final_emotion": "angry", "final_confidence": 0.5},
            "recommendations": []
        })),
    )
    .await;

    let outcome = AnalyzeUseCase::new(analyzer(&server))
        .submit(&text_request("grr"))
        .await;

    assert!(outcome.succeeded);
    assert_eq!(outcome.fusion.final_emotion, "angry");
    let titles: Vec<_> = outcome
        .recommendations
        .iter()
        .map(|i| i.title.as_str())
        .collect();
    assert_eq!(
        titles,
        ["The Shawshank Redemption", "The Dark Knight", "Pulp Fiction", "Forrest Gump"]
    );
}

#[tokio::test]
async fn slow_service_times_out_into_fallback() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({"success": true}))
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let slow = HttpEmotionAnalyzer::new(&server.uri(), Duration::from_millis(200)).unwrap();
    let err = slow.analyze(&text_request("hello")).await.unwrap_err();
    assert!(matches!(err, AnalysisError::Transport(_)));
}

#[tokio::test]
async fn unreachable_service_gives_offline_result() {
    // Nothing listens on port 1
    let unreachable = HttpEmotionAnalyzer::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();

    let outcome = AnalyzeUseCase::new(unreachable)
        .submit(&text_request("I am so happy today"))
        .await;

    assert!(!outcome.succeeded);
    assert_eq!(outcome.fusion.final_emotion, "happy");
    assert_eq!(outcome.fusion.final_confidence, 0.75);
    assert_eq!(outcome.fusion.text, Some(ModalityResult::new("happy", 0.8)));
    assert!(outcome.fusion.face.is_none());
    assert!(outcome.fusion.audio.is_none());
    assert_eq!(outcome.recommendations.len(), 4);
}
