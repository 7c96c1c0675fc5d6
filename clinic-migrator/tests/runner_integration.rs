//! Integration tests for the migration runner.
//!
//! These tests use the real MigrationRunner and adapters with in-memory or
//! mock stores standing in for Firestore and PostgreSQL.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::json;

use clinic_migrator::adapter::{ANAMNESES, APPOINTMENTS, ATTENDANCES, BUDGETS};
use clinic_migrator::reporter::summary_line;
use clinic_migrator::{MigrationRunner, RunnerConfig, RunnerError};
use clinic_migrator_repository::{
    DestinationStore, DestinationStoreError, InMemoryDestination, InMemorySource, SourceConfig,
    SourceStore, SourceStoreError,
};
use clinic_migrator_shared::{
    BigDecimal, DestinationRecord, MigrationSummary, NaturalKey, SourceRecord,
};

fn run_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap()
}

fn counts(summary: &MigrationSummary) -> (usize, usize, usize) {
    (summary.inserted, summary.skipped, summary.failed)
}

// Destination whose existence check fails for one configured call.
struct FlakyDestination {
    inner: InMemoryDestination,
    fail_on_call: usize,
    calls: AtomicUsize,
}

impl FlakyDestination {
    fn new(fail_on_call: usize) -> Self {
        Self {
            inner: InMemoryDestination::new(),
            fail_on_call,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DestinationStore for FlakyDestination {
    async fn exists(&self, table: &str, key: &NaturalKey) -> Result<bool, DestinationStoreError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call == self.fail_on_call {
            return Err(DestinationStoreError::unavailable("connection reset by peer"));
        }
        self.inner.exists(table, key).await
    }

    async fn insert(&self, table: &str, record: &DestinationRecord) -> Result<(), DestinationStoreError> {
        self.inner.insert(table, record).await
    }
}

// Destination that rejects every insert.
struct FailingInsertDestination;

#[async_trait]
impl DestinationStore for FailingInsertDestination {
    async fn exists(&self, _table: &str, _key: &NaturalKey) -> Result<bool, DestinationStoreError> {
        Ok(false)
    }

    async fn insert(&self, _table: &str, _record: &DestinationRecord) -> Result<(), DestinationStoreError> {
        Err(DestinationStoreError::unavailable("permission denied for table"))
    }
}

// Destination whose calls never return in time.
struct SlowDestination;

#[async_trait]
impl DestinationStore for SlowDestination {
    async fn exists(&self, _table: &str, _key: &NaturalKey) -> Result<bool, DestinationStoreError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(false)
    }

    async fn insert(&self, _table: &str, _record: &DestinationRecord) -> Result<(), DestinationStoreError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }
}

// Source that cannot be read.
struct FailingSource;

#[async_trait]
impl SourceStore for FailingSource {
    async fn fetch_collection(&self, _collection: &str) -> Result<Vec<SourceRecord>, SourceStoreError> {
        Err(SourceStoreError::UnexpectedStatus {
            status: 503,
            body: "backend unavailable".to_string(),
        })
    }
}

fn anamnesis(id: &str, patient_id: &str, date: &str, model: &str) -> SourceRecord {
    SourceRecord::from_value(
        id,
        json!({ "patientId": patient_id, "date": date, "model": model, "answers": { "allergies": "none" } }),
    )
}

fn clean_anamneses(count: usize) -> Vec<SourceRecord> {
    (0..count)
        .map(|i| anamnesis(&format!("a-{}", i), &format!("p-{}", i), "2024-05-02", "adult"))
        .collect()
}

#[tokio::test]
async fn test_mixed_snapshot_counts_insert_and_both_skip_reasons() {
    let source = InMemorySource::with_collection(
        "anamneses",
        vec![
            anamnesis("a-1", "p-1", "2024-05-02", "adult"),
            anamnesis("a-2", "", "2024-05-02", "adult"),
            anamnesis("a-3", "p-3", "2024-04-10", "child"),
        ],
    );
    let destination = Arc::new(InMemoryDestination::new());
    destination.seed(
        "anamneses",
        vec![DestinationRecord::new("legacy")
            .with("patient_id", "p-3")
            .with("date", NaiveDate::from_ymd_opt(2024, 4, 10).unwrap())
            .with("model", "child")],
    );

    let runner = MigrationRunner::new(Arc::new(source), destination.clone(), RunnerConfig::default());
    let summary = runner.run_at(&ANAMNESES, run_clock()).await.unwrap();

    assert_eq!(summary_line("anamneses", &summary, false), "anamneses: Inserted: 1, Skipped: 2, Failed: 0");
    assert_eq!(destination.len("anamneses"), 2);
}

#[tokio::test]
async fn test_existence_check_failure_fails_one_record_and_run_continues() {
    let source = InMemorySource::with_collection("anamneses", clean_anamneses(5));
    let destination = Arc::new(FlakyDestination::new(2));

    let runner = MigrationRunner::new(Arc::new(source), destination.clone(), RunnerConfig::default());
    let summary = runner.run_at(&ANAMNESES, run_clock()).await.unwrap();

    assert_eq!(counts(&summary), (4, 0, 1));
    assert_eq!(destination.inner.len("anamneses"), 4);
}

#[tokio::test]
async fn test_insert_failures_are_counted_not_fatal() {
    let source = InMemorySource::with_collection("anamneses", clean_anamneses(3));
    let runner = MigrationRunner::new(
        Arc::new(source),
        Arc::new(FailingInsertDestination),
        RunnerConfig::default(),
    );

    let summary = runner.run_at(&ANAMNESES, run_clock()).await.unwrap();
    assert_eq!(counts(&summary), (0, 0, 3));
}

#[tokio::test]
async fn test_second_run_inserts_nothing() {
    let source: Arc<InMemorySource> = Arc::new(InMemorySource::with_collection(
        "appointments",
        vec![
            SourceRecord::from_value(
                "ap-1",
                json!({ "patientName": "Ana Souza", "date": "2024-05-02", "time": "09:30", "doctorName": "Dr. Lima" }),
            ),
            SourceRecord::from_value(
                "ap-2",
                json!({ "patientName": "Bruno Alves", "date": "03/05/2024", "time": "14:00", "doctorName": "Dr. Lima" }),
            ),
            SourceRecord::from_value("ap-3", json!({ "patientName": "" })),
        ],
    ));
    let destination = Arc::new(InMemoryDestination::new());
    let runner = MigrationRunner::new(source, destination.clone(), RunnerConfig::default());

    let first = runner.run_at(&APPOINTMENTS, run_clock()).await.unwrap();
    assert_eq!(counts(&first), (2, 1, 0));

    let second = runner.run_at(&APPOINTMENTS, run_clock()).await.unwrap();
    assert_eq!(counts(&second), (0, 3, 0));
    assert_eq!(destination.len("appointments"), 2);
}

#[tokio::test]
async fn test_float_artifact_totals_do_not_duplicate_on_rerun() {
    let source: Arc<InMemorySource> = Arc::new(InMemorySource::with_collection(
        "budgets",
        vec![
            SourceRecord::from_value(
                "b-1",
                json!({ "patientId": "p-1", "date": "2024-05-02", "total": 0.1_f64 + 0.2_f64 }),
            ),
            SourceRecord::from_value(
                "b-2",
                json!({ "patientId": "p-2", "date": "2024-05-02", "total": 100.005 }),
            ),
        ],
    ));
    let destination = Arc::new(InMemoryDestination::new());
    let runner = MigrationRunner::new(source, destination.clone(), RunnerConfig::default());

    let first = runner.run_at(&BUDGETS, run_clock()).await.unwrap();
    assert_eq!(counts(&first), (2, 0, 0));

    let stored: Vec<String> = destination
        .records("budgets")
        .iter()
        .filter_map(|record| record.get("total").map(|total| total.to_string()))
        .collect();
    assert_eq!(stored, vec!["0.30", "100.01"]);

    let second = runner.run_at(&BUDGETS, run_clock()).await.unwrap();
    assert_eq!(counts(&second), (0, 2, 0));
    assert_eq!(destination.len("budgets"), 2);
}

#[tokio::test]
async fn test_duplicates_within_one_snapshot_insert_once() {
    let source = InMemorySource::with_collection(
        "attendances",
        vec![
            SourceRecord::from_value(
                "at-1",
                json!({ "patientId": "p-1", "date": "2024-05-02", "doctorName": "Dr. Lima", "value": 200 }),
            ),
            SourceRecord::from_value(
                "at-2",
                json!({ "patientId": "p-1", "date": "02/05/2024", "doctorName": "Dr. Lima", "value": 250 }),
            ),
        ],
    );
    let destination = Arc::new(InMemoryDestination::new());
    let runner = MigrationRunner::new(Arc::new(source), destination.clone(), RunnerConfig::default());

    let summary = runner.run_at(&ATTENDANCES, run_clock()).await.unwrap();

    assert_eq!(counts(&summary), (1, 1, 0));
    let stored = destination.records("attendances");
    let keys: HashSet<String> = stored
        .iter()
        .filter_map(|record| record.natural_key(ATTENDANCES.natural_key))
        .map(|key| key.to_string())
        .collect();
    assert_eq!(keys.len(), stored.len());
}

#[tokio::test]
async fn test_counts_are_conserved_across_outcomes() {
    let mut records = clean_anamneses(6);
    records.push(anamnesis("blank", " ", "2024-05-02", "adult"));
    records.push(anamnesis("dup", "p-0", "2024-05-02", "adult"));
    let total = records.len();

    let source = InMemorySource::with_collection("anamneses", records);
    let destination = Arc::new(FlakyDestination::new(4));
    let runner = MigrationRunner::new(Arc::new(source), destination, RunnerConfig::default());

    let summary = runner.run_at(&ANAMNESES, run_clock()).await.unwrap();
    assert_eq!(summary.total(), total);
    assert_eq!(counts(&summary), (5, 2, 1));
}

#[tokio::test]
async fn test_fetch_failure_aborts_the_entity() {
    let runner = MigrationRunner::new(
        Arc::new(FailingSource),
        Arc::new(InMemoryDestination::new()),
        RunnerConfig::default(),
    );

    match runner.run(&BUDGETS).await {
        Err(RunnerError::Fetch { entity, source }) => {
            assert_eq!(entity, "budgets");
            assert!(matches!(source, SourceStoreError::UnexpectedStatus { status: 503, .. }));
        }
        other => panic!("expected fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_dry_run_checks_everything_but_writes_nothing() {
    let source = InMemorySource::with_collection(
        "anamneses",
        vec![
            anamnesis("a-1", "p-1", "2024-05-02", "adult"),
            anamnesis("a-2", "", "2024-05-02", "adult"),
        ],
    );
    let destination = Arc::new(InMemoryDestination::new());
    let runner = MigrationRunner::new(
        Arc::new(source),
        destination.clone(),
        RunnerConfig {
            dry_run: true,
            call_timeout: None,
        },
    );

    let summary = runner.run_at(&ANAMNESES, run_clock()).await.unwrap();

    assert_eq!(counts(&summary), (1, 1, 0));
    assert!(destination.is_empty("anamneses"));
    assert_eq!(
        summary_line("anamneses", &summary, true),
        "[dry run] anamneses: Inserted: 1, Skipped: 1, Failed: 0"
    );
}

#[tokio::test(start_paused = true)]
async fn test_timed_out_calls_count_as_failed() {
    let source = InMemorySource::with_collection("anamneses", clean_anamneses(2));
    let runner = MigrationRunner::new(
        Arc::new(source),
        Arc::new(SlowDestination),
        RunnerConfig {
            dry_run: false,
            call_timeout: Some(Duration::from_secs(5)),
        },
    );

    let summary = runner.run_at(&ANAMNESES, run_clock()).await.unwrap();
    assert_eq!(counts(&summary), (0, 0, 2));
}

#[tokio::test]
async fn test_snapshot_directory_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("budgets.json"),
        json!([
            { "id": "b-1", "patientId": "p-1", "date": "2024-05-02", "total": "R$ 1.200,00", "items": [{ "name": "Cleaning" }] },
            { "id": "b-2", "patientId": "p-1", "date": "2024-05-02", "totalValue": 1200 },
            { "id": "b-3", "patientName": "No Id" }
        ])
        .to_string(),
    )
    .unwrap();

    let source = SourceConfig::Snapshot {
        dir: dir.path().to_path_buf(),
    }
    .into_store();
    let destination = Arc::new(InMemoryDestination::new());
    let runner = MigrationRunner::new(source, destination.clone(), RunnerConfig::default());

    let summary = runner.run_at(&BUDGETS, run_clock()).await.unwrap();
    assert_eq!(counts(&summary), (1, 2, 0));

    let stored = destination.records("budgets");
    assert_eq!(stored[0].source_id, "b-1");
    assert_eq!(
        stored[0].get("total").and_then(|v| v.as_amount()),
        Some(&BigDecimal::from_str("1200.00").unwrap())
    );
}
