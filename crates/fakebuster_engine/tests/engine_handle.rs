use std::sync::{mpsc, Arc};
use std::time::Duration;

use fakebuster_engine::{
    ChannelEventSink, ClientSettings, EngineEvent, EngineHandle, FailureKind, ReqwestClassifier,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

fn spawn_engine(server: &MockServer) -> (EngineHandle, mpsc::Receiver<EngineEvent>) {
    let settings = ClientSettings::with_base_url(&server.uri()).unwrap();
    let classifier = Arc::new(ReqwestClassifier::new(settings).unwrap());
    let (tx, rx) = mpsc::channel();
    let engine = EngineHandle::new(classifier, Arc::new(ChannelEventSink::new(tx))).unwrap();
    (engine, rx)
}

#[tokio::test]
async fn completion_carries_request_generation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/check-fake-news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "verdict": "LIKELY REAL",
            "detected_language": "en",
            "confidence": 0.66,
            "matches": []
        })))
        .mount(&server)
        .await;

    let (engine, rx) = spawn_engine(&server);
    engine.classify(7, "story");

    let event = tokio::task::spawn_blocking(move || rx.recv_timeout(WAIT))
        .await
        .unwrap()
        .expect("engine event");
    match event {
        EngineEvent::AnalysisCompleted { generation, result } => {
            assert_eq!(generation, 7);
            assert_eq!(result.unwrap().verdict, "LIKELY REAL");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn failures_are_reported_not_dropped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/check-fake-news"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (engine, rx) = spawn_engine(&server);
    engine.classify(1, "story");

    let event = tokio::task::spawn_blocking(move || rx.recv_timeout(WAIT))
        .await
        .unwrap()
        .expect("engine event");
    match event {
        EngineEvent::AnalysisCompleted { generation, result } => {
            assert_eq!(generation, 1);
            assert_eq!(result.unwrap_err().kind, FailureKind::HttpStatus(503));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn related_news_lookup_is_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/related-news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query_translated": "election",
            "detected_language": "en",
            "results": []
        })))
        .mount(&server)
        .await;

    let (engine, rx) = spawn_engine(&server);
    engine.related_news("election");

    let event = tokio::task::spawn_blocking(move || rx.recv_timeout(WAIT))
        .await
        .unwrap()
        .expect("engine event");
    match event {
        EngineEvent::RelatedNewsCompleted { query, result } => {
            assert_eq!(query, "election");
            assert!(result.unwrap().results.is_empty());
        }
        other => panic!("unexpected event {other:?}"),
    }
}
