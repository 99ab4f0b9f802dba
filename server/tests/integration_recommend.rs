use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use recommender_core::{Corpus, CourseRecord, IndexHandle, LinguisticResources, RecommenderConfig, SearchIndex};
use serde_json::Value;
use server::{build_app, load_index, CorpusSource};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;
use tower::ServiceExt;

fn tiny_app(records: Vec<CourseRecord>) -> Router {
    let corpus = Corpus::from_records(records).unwrap();
    let index = SearchIndex::build(corpus, &LinguisticResources::english(), RecommenderConfig::default());
    build_app(Arc::new(IndexHandle::new(index)))
}

fn python_courses() -> Vec<CourseRecord> {
    vec![
        CourseRecord::new(1, "Intro to Python", "Learn python basics"),
        CourseRecord::new(2, "Advanced Python", "Deep dive into python"),
        CourseRecord::new(3, "Intro to Cooking", "Learn to cook"),
    ]
}

async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn recommend_returns_ranked_courses() {
    let app = tiny_app(python_courses());
    let (status, json) = call(app, "/recommend?title=Into%20Python").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["searched_title"], "Into Python");
    assert_eq!(json["matched_title"], "Intro to Python");
    let recs = json["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0]["id"], 1);
    assert_eq!(recs[0]["title"], "Intro to Python");
    assert_eq!(recs[0]["overview"], "Learn python basics");
    assert!(recs[0].get("score").is_none());
}

#[tokio::test]
async fn missing_or_empty_title_is_bad_request() {
    let (status, json) = call(tiny_app(python_courses()), "/recommend").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Missing title parameter");

    let (status, _) = call(tiny_app(python_courses()), "/recommend?title=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unmatched_title_is_not_found() {
    let records = ["Aqua", "Plum", "Calculus", "Karma", "Quokka"]
        .iter()
        .enumerate()
        .map(|(i, t)| CourseRecord::new(i as i64 + 1, *t, "misc"))
        .collect();
    let (status, json) = call(tiny_app(records), "/recommend?title=Nonexistent%20Gibberish%20Xyzzy").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Course title not found");
}

#[tokio::test]
async fn serves_index_loaded_from_jsonl() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("courses.jsonl");
    fs::write(
        &path,
        "{\"id\": 10, \"title\": \"Gardening\", \"overview\": \"soil plants seeds\"}\n\
         {\"id\": 11, \"title\": \"Composting\", \"overview\": \"soil worms\"}\n",
    )
    .unwrap();
    let index = load_index(&CorpusSource::Json(path), RecommenderConfig { top_k: 1, ..Default::default() }).unwrap();
    let app = build_app(Arc::new(IndexHandle::new(index)));

    let (status, json) = call(app, "/recommend?title=Gardenin").await;
    assert_eq!(status, StatusCode::OK);
    let recs = json["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0]["id"], 10);
}

#[tokio::test]
async fn health_and_form() {
    let app = tiny_app(python_courses());
    let req = Request::get("/").body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&body).contains("name=\"title\""));

    let req = Request::get("/health").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
