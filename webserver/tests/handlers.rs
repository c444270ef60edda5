//! Handler tests with mocked collaborators
//!
//! Handlers are exercised directly, with mock collaborators injected
//! through the server, so the assertions cover the exact JSON contract
//! of each endpoint.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use chrono::DateTime;
use serde_json::json;

use research::core::runner::ResearchRunner;
use research::error::ResearchError;
use research::traits::{
    MockCasinoDiscovery, MockOffersSource, MockPromotionResearch, MockRunStore,
};
use research::types::StateCasinos;
use shared::{DiscoveredPromotion, StoredRun};
use webserver::server_impl::{
    get_results, health_check, scheduled_results, ResultsQuery, CRON_KEY_HEADER,
};
use webserver::ResearchServer;

type MockedServer =
    ResearchServer<MockOffersSource, MockCasinoDiscovery, MockPromotionResearch, MockRunStore>;

/// Collaborators that let a full run succeed with one casino.
fn working_collaborators() -> (MockOffersSource, MockCasinoDiscovery, MockPromotionResearch) {
    let mut offers = MockOffersSource::new();
    offers
        .expect_fetch_existing_offers()
        .returning(|| Ok(HashMap::new()));

    let mut discovery = MockCasinoDiscovery::new();
    discovery.expect_discover().returning(|j| {
        Ok(StateCasinos {
            state: j.to_string(),
            casinos: vec!["BetMGM".to_string()],
        })
    });

    let mut promotions = MockPromotionResearch::new();
    promotions.expect_research().returning(|casino, state| {
        Ok(DiscoveredPromotion {
            casino: Some(casino.to_string()),
            state: state.to_string(),
            promotion: "100% match".to_string(),
            bonus_amount: 100.0,
            match_percent: 0.0,
            description: String::new(),
        })
    });

    (offers, discovery, promotions)
}

fn server_with(
    offers: MockOffersSource,
    discovery: MockCasinoDiscovery,
    promotions: MockPromotionResearch,
    store: MockRunStore,
    cron_key: &str,
) -> MockedServer {
    let store = Arc::new(store);
    let runner = Arc::new(ResearchRunner::new(
        Arc::new(offers),
        Arc::new(discovery),
        Arc::new(promotions),
        store.clone(),
        vec!["New Jersey".to_string()],
    ));
    let bind_address: SocketAddr = "127.0.0.1:8000".parse().unwrap();
    ResearchServer::new(bind_address, runner, store, cron_key.to_string())
}

fn stored_run() -> StoredRun {
    serde_json::from_value(json!({
        "id": 3,
        "mode": "manual",
        "result_json": {
            "run_id": "6f4dcb52-9109-4dd6-8d1a-0c1e1d1b7a10",
            "timestamp": "2025-11-02T12:00:00Z",
            "missing_casinos": { "New Jersey": ["BetMGM"] },
            "offer_comparisons": [],
            "failures": []
        },
        "created_at": "2025-11-02T12:00:05Z"
    }))
    .unwrap()
}

fn query(mode: Option<&str>) -> Query<ResultsQuery> {
    Query(ResultsQuery {
        mode: mode.map(|m| m.to_string()),
    })
}

#[tokio::test]
async fn manual_mode_runs_the_job() {
    let (offers, discovery, promotions) = working_collaborators();
    let mut store = MockRunStore::new();
    store.expect_save_run().times(1).returning(|_, _| Ok(()));

    let server = server_with(offers, discovery, promotions, store, "secret");
    let body = get_results(State(server), query(Some("manual"))).await.0;

    assert_eq!(body["mode"], "manual");
    assert_eq!(body["result"]["missing_casinos"]["New Jersey"][0], "BetMGM");
    assert_eq!(
        body["result"]["offer_comparisons"][0]["status"],
        "New Casino"
    );
}

#[tokio::test]
async fn missing_mode_defaults_to_manual() {
    let (offers, discovery, promotions) = working_collaborators();
    let mut store = MockRunStore::new();
    store.expect_save_run().returning(|_, _| Ok(()));

    let server = server_with(offers, discovery, promotions, store, "secret");
    let body = get_results(State(server), query(None)).await.0;

    assert_eq!(body["mode"], "manual");
    assert!(body["result"].is_object());
}

#[tokio::test]
async fn last_mode_returns_the_stored_run() {
    let mut store = MockRunStore::new();
    store
        .expect_last_run()
        .returning(|| Ok(Some(stored_run())));

    let server = server_with(
        MockOffersSource::new(),
        MockCasinoDiscovery::new(),
        MockPromotionResearch::new(),
        store,
        "secret",
    );
    let body = get_results(State(server), query(Some("last"))).await.0;

    assert_eq!(body["mode"], "last");
    assert_eq!(body["result"]["id"], 3);
    assert_eq!(
        body["result"]["result_json"]["missing_casinos"]["New Jersey"][0],
        "BetMGM"
    );
}

#[tokio::test]
async fn last_mode_degrades_to_null_when_store_fails() {
    let mut store = MockRunStore::new();
    store.expect_last_run().returning(|| {
        Err(ResearchError::StoreError {
            message: "select failed with status 503".to_string(),
        })
    });

    let server = server_with(
        MockOffersSource::new(),
        MockCasinoDiscovery::new(),
        MockPromotionResearch::new(),
        store,
        "secret",
    );
    let body = get_results(State(server), query(Some("last"))).await.0;

    assert_eq!(body["mode"], "last");
    assert!(body["result"].is_null());
}

#[tokio::test]
async fn invalid_mode_answers_with_error_object() {
    let server = server_with(
        MockOffersSource::new(),
        MockCasinoDiscovery::new(),
        MockPromotionResearch::new(),
        MockRunStore::new(),
        "secret",
    );
    let body = get_results(State(server), query(Some("bogus"))).await.0;

    assert_eq!(body["error"], "Invalid mode. Use 'manual' or 'last'.");
    assert!(body.get("result").is_none());
}

#[tokio::test]
async fn scheduled_rejects_missing_and_wrong_key() {
    let server = server_with(
        MockOffersSource::new(),
        MockCasinoDiscovery::new(),
        MockPromotionResearch::new(),
        MockRunStore::new(),
        "secret",
    );

    let result = scheduled_results(State(server.clone()), HeaderMap::new()).await;
    assert_eq!(result.err(), Some(StatusCode::UNAUTHORIZED));

    let mut headers = HeaderMap::new();
    headers.insert(CRON_KEY_HEADER, "wrong".parse().unwrap());
    let result = scheduled_results(State(server), headers).await;
    assert_eq!(result.err(), Some(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn scheduled_stays_locked_when_secret_is_unset() {
    let server = server_with(
        MockOffersSource::new(),
        MockCasinoDiscovery::new(),
        MockPromotionResearch::new(),
        MockRunStore::new(),
        "",
    );

    let mut headers = HeaderMap::new();
    headers.insert(CRON_KEY_HEADER, "".parse().unwrap());
    let result = scheduled_results(State(server), headers).await;
    assert_eq!(result.err(), Some(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn scheduled_runs_with_the_correct_key() {
    let (offers, discovery, promotions) = working_collaborators();
    let mut store = MockRunStore::new();
    store
        .expect_save_run()
        .withf(|mode, _| mode.as_str() == "scheduled")
        .times(1)
        .returning(|_, _| Ok(()));

    let server = server_with(offers, discovery, promotions, store, "secret");

    let mut headers = HeaderMap::new();
    headers.insert(CRON_KEY_HEADER, "secret".parse().unwrap());
    let body = scheduled_results(State(server), headers).await.unwrap().0;

    assert_eq!(body["mode"], "scheduled");
    assert!(body["result"]["offer_comparisons"].is_array());
}

#[tokio::test]
async fn health_reports_ok_with_a_timestamp() {
    let body = health_check().await.0;

    assert_eq!(body["status"], "ok");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
}
