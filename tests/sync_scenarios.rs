//! End-to-end refresh scenarios through `FxClient` with a scripted provider.

mod common;

use common::*;
use fx_history::domain::history::store::{history_key, today_marker_key};
use fx_history::prelude::*;

#[tokio::test]
async fn empty_store_fetches_all_required_dates() {
    let session = ScriptedSession::new();
    for i in 0..10 {
        session.respond(&primary_url(days_ago(i)), Ok(rate_table(18.0 + i as f64 / 100.0)));
    }
    let client = client_with(&session, temp_cache_dir(), 10);

    let outcome = client.history().refresh(&usd_zar(), false).await.unwrap();

    assert_eq!(outcome.points.len(), 10);
    assert_eq!(outcome.latest.unwrap().rate, 18.0);
    assert!(!outcome.is_no_data());
    assert_eq!(outcome.points.first().unwrap().date, days_ago(9));
    assert_eq!(outcome.points.last().unwrap().date, today());
}

#[tokio::test]
async fn only_missing_dates_are_requested() {
    let dir = temp_cache_dir();
    let session = ScriptedSession::new();
    let client = client_with(&session, dir.clone(), 10);

    // Seed nine of the ten dates, leaving a gap five days back.
    let seeded: RateSeries = (0..10)
        .filter(|i| *i != 5)
        .map(|i| (days_ago(i), 17.0 + i as f64 * 0.25))
        .collect();
    let store = HistoryStore::new(dir, client.clock().clone());
    store.save(&usd_zar(), &seeded).await.unwrap();
    // Today's marker is fresh, so today stays cached.
    store
        .write_marker(&today_marker_key(&usd_zar()), &true)
        .await
        .unwrap();

    session.respond(&primary_url(days_ago(5)), Ok(rate_table(16.5)));
    let outcome = client.history().refresh(&usd_zar(), false).await.unwrap();

    assert_eq!(session.calls(), vec![primary_url(days_ago(5))]);
    assert_eq!(outcome.points.len(), 10);

    let after = client.history().cached(&usd_zar()).await;
    assert_eq!(after.len(), 10);
    for (date, rate) in seeded.iter() {
        assert_eq!(after.get(&date).unwrap().to_bits(), rate.to_bits());
    }
}

#[tokio::test]
async fn fallback_value_is_used_when_primary_fails() {
    let session = ScriptedSession::new();
    for i in 1..3 {
        session.respond(&primary_url(days_ago(i)), Ok(rate_table(18.0)));
    }
    session.respond(
        &primary_url(today()),
        Err(HttpError::Network("connection refused".into())),
    );
    session.respond(&fallback_url(today()), Ok(rate_table(18.77)));
    let client = client_with(&session, temp_cache_dir(), 3);

    let outcome = client.history().refresh(&usd_zar(), false).await.unwrap();
    assert_eq!(outcome.latest.unwrap().rate, 18.77);
    assert_eq!(outcome.unresolved, 0);
}

#[tokio::test]
async fn newest_date_failing_on_both_endpoints_is_no_data() {
    let session = ScriptedSession::new();
    for i in 1..4 {
        session.respond(&primary_url(days_ago(i)), Ok(rate_table(18.0)));
    }
    let client = client_with(&session, temp_cache_dir(), 4);

    let outcome = client.history().refresh(&usd_zar(), false).await.unwrap();
    assert!(outcome.is_no_data());
    assert_eq!(outcome.points.len(), 3);
    assert!(outcome.points.iter().all(|p| p.date != today()));
    assert_eq!(PanelStatus::from_outcome(&outcome).label(), "No data");
}

#[tokio::test]
async fn bust_removes_only_today_and_refetches_it() {
    let dir = temp_cache_dir();
    let session = ScriptedSession::new();
    for i in 0..5 {
        session.respond(&primary_url(days_ago(i)), Ok(rate_table(18.0)));
    }
    let client = client_with(&session, dir, 5);
    client.history().refresh(&usd_zar(), false).await.unwrap();
    session.clear_calls();

    session.respond(&primary_url(today()), Ok(rate_table(18.31)));
    let outcome = client.history().refresh(&usd_zar(), true).await.unwrap();

    assert_eq!(session.calls(), vec![primary_url(today())]);
    assert_eq!(outcome.latest.unwrap().rate, 18.31);
    assert_eq!(outcome.fetched, 1);
    let PanelStatus::Ready(summary) = PanelStatus::from_outcome(&outcome) else {
        panic!("expected a ready panel");
    };
    assert_eq!(summary.to_string(), "USD/ZAR: 18.31");
    assert_eq!(summary.change.unwrap().direction, Direction::TargetWeaker);
}

#[tokio::test]
async fn shutdown_cancels_refresh_without_error_state() {
    let session = ScriptedSession::new();
    let client = client_with(&session, temp_cache_dir(), 20);
    client.shutdown().await;

    let result = client.history().refresh(&usd_zar(), false).await;
    assert!(result.as_ref().unwrap_err().is_cancelled());
    assert_eq!(PanelStatus::from_result(&result), None);
}

#[tokio::test]
async fn corrupt_history_file_is_treated_as_empty() {
    let dir = temp_cache_dir();
    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(
        dir.join(format!("{}.json", history_key(&usd_zar()))),
        b"not json at all",
    )
    .await
    .unwrap();

    let session = ScriptedSession::new();
    for i in 0..2 {
        session.respond(&primary_url(days_ago(i)), Ok(rate_table(18.0)));
    }
    let client = client_with(&session, dir, 2);

    let outcome = client.history().refresh(&usd_zar(), false).await.unwrap();
    assert_eq!(outcome.points.len(), 2);
    assert_eq!(client.history().cached(&usd_zar()).await.len(), 2);
}
