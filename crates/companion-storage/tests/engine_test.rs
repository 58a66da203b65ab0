//! StorageEngine against in-memory and file-backed SQLite.

use chrono::{Duration, TimeZone, Utc};
use companion_core::config::StorageConfig;
use companion_core::{
    CompanionError, CompanionErrorCode, LocalFlags, ProfilePatch, ProfileStore, StoreError,
    SubscriptionStatus,
};
use companion_storage::StorageEngine;

fn engine() -> StorageEngine {
    StorageEngine::open_in_memory().unwrap()
}

#[tokio::test]
async fn create_with_empty_fields_applies_defaults() {
    let engine = engine();
    let profile = engine.create("visitor-1", ProfilePatch::default()).await.unwrap();

    assert_eq!(profile.visitor_id, "visitor-1");
    assert!(!profile.has_acknowledged_disclaimer);
    assert!(profile.subscription_status.is_none());
    assert!(profile.trial_start_date.is_none());

    let listed = engine.list_for_visitor("visitor-1").await.unwrap();
    assert_eq!(listed, vec![profile]);
}

#[tokio::test]
async fn list_for_unknown_visitor_is_empty() {
    let engine = engine();
    engine.create("visitor-1", ProfilePatch::default()).await.unwrap();
    assert!(engine.list_for_visitor("visitor-2").await.unwrap().is_empty());
}

#[tokio::test]
async fn update_round_trips_all_fields() {
    let engine = engine();
    let profile = engine.create("visitor-1", ProfilePatch::default()).await.unwrap();
    let start = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();

    let updated = engine
        .update(
            &profile.id,
            ProfilePatch {
                has_acknowledged_disclaimer: Some(true),
                subscription_status: Some(SubscriptionStatus::Other("past_due".into())),
                trial_start_date: Some(start),
            },
        )
        .await
        .unwrap();

    let stored = engine.list_for_visitor("visitor-1").await.unwrap();
    assert_eq!(stored[0], updated);
    assert!(stored[0].has_acknowledged_disclaimer);
    assert_eq!(
        stored[0].subscription_status,
        Some(SubscriptionStatus::Other("past_due".into()))
    );
    assert_eq!(stored[0].trial_start_date, Some(start));
}

#[tokio::test]
async fn acknowledging_twice_is_idempotent() {
    let engine = engine();
    let profile = engine.create("visitor-1", ProfilePatch::default()).await.unwrap();

    let first = engine
        .update(&profile.id, ProfilePatch::acknowledge_disclaimer())
        .await
        .unwrap();
    let second = engine
        .update(&profile.id, ProfilePatch::acknowledge_disclaimer())
        .await
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(engine.profile_count().unwrap(), 1);
}

#[tokio::test]
async fn update_missing_profile_is_not_found() {
    let engine = engine();
    let err = engine
        .update("nope", ProfilePatch::acknowledge_disclaimer())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CompanionError::Store(StoreError::NotFound { .. })
    ));
    assert_eq!(err.error_code(), "RECORD_NOT_FOUND");
}

#[tokio::test]
async fn dropped_table_surfaces_storage_error() {
    let engine = engine();
    let profile = engine.create("visitor-1", ProfilePatch::default()).await.unwrap();
    engine.execute("DROP TABLE user_profiles", []).unwrap();

    let err = engine
        .update(&profile.id, ProfilePatch::acknowledge_disclaimer())
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "STORAGE_ERROR");
}

#[test]
fn flags_set_clear() {
    let engine = engine();
    assert!(!engine.is_set("disclaimer_agreed").unwrap());
    engine.set("disclaimer_agreed").unwrap();
    engine.set("disclaimer_agreed").unwrap();
    assert!(engine.is_set("disclaimer_agreed").unwrap());
    engine.clear("disclaimer_agreed").unwrap();
    assert!(!engine.is_set("disclaimer_agreed").unwrap());
}

#[tokio::test]
async fn file_backed_storage_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("companion.db");
    let start = Utc::now() - Duration::days(3);

    let profile_id = {
        let engine = StorageEngine::open(&db_path).unwrap();
        let profile = engine
            .create(
                "visitor-1",
                ProfilePatch {
                    subscription_status: Some(SubscriptionStatus::Trial),
                    trial_start_date: Some(start),
                    ..ProfilePatch::default()
                },
            )
            .await
            .unwrap();
        engine.set("disclaimer_agreed").unwrap();
        // Served by the read-only connection.
        assert_eq!(engine.list_for_visitor("visitor-1").await.unwrap().len(), 1);
        assert!(engine.is_set("disclaimer_agreed").unwrap());
        profile.id
    };

    let config = StorageConfig {
        db_path: Some(db_path.to_string_lossy().into_owned()),
        separate_reader: false,
        ..StorageConfig::default()
    };
    let engine = StorageEngine::from_config(&config).unwrap();
    let profiles = engine.list_for_visitor("visitor-1").await.unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].id, profile_id);
    assert_eq!(profiles[0].subscription_status, Some(SubscriptionStatus::Trial));
    assert_eq!(
        profiles[0].trial_start_date.map(|d| d.timestamp()),
        Some(start.timestamp())
    );
    assert!(engine.is_set("disclaimer_agreed").unwrap());
}
