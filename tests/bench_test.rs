//! Benchmark tests for critical operations
//!
//! Run with: cargo test --release -- --nocapture bench

use std::sync::{Arc, Mutex};
use std::time::Instant;
use tempfile::NamedTempFile;

use chrono::{Duration, Utc};
use partstracker::database::{init_db, AppState};
use partstracker::handler::{create_link, get_parts_data, submit_parts_data};
use partstracker::model::{
    CreateLinkRequest, LinkRecord, LinkStatus, Part, PartsQuery, SubmitReportRequest,
};
use partstracker::notify::{EmailMessage, Notifier, NotifyError};
use partstracker::store::Store;

use axum::{
    extract::{Query, State},
    Json,
};

/// Notifier that only counts dispatches so delivery never skews the numbers
#[derive(Default)]
struct CountingNotifier {
    sent: Mutex<usize>,
}

impl Notifier for CountingNotifier {
    fn send(&self, _message: &EmailMessage) -> Result<(), NotifyError> {
        *self.sent.lock().unwrap() += 1;
        Ok(())
    }
}

fn bench_state() -> (AppState, NamedTempFile) {
    let temp_db = NamedTempFile::new().unwrap();
    let db = init_db(temp_db.path().to_str().unwrap()).unwrap();
    let state = AppState {
        store: Store::new(Arc::new(db)),
        notifier: Arc::new(CountingNotifier::default()),
        base_url: "http://localhost:8080".to_string(),
    };
    (state, temp_db)
}

fn bench_part(status: &str) -> Part {
    Part {
        qty: 1,
        part_number: "A1".to_string(),
        description: "Widget".to_string(),
        customer: "Acme".to_string(),
        invoice_number: "INV1".to_string(),
        status: status.to_string(),
        notes: String::new(),
    }
}

/// Benchmark helper to measure execution time
fn benchmark<F>(name: &str, iterations: usize, mut f: F)
where
    F: FnMut(),
{
    let start = Instant::now();

    for _ in 0..iterations {
        f();
    }

    let duration = start.elapsed();
    let avg_ms = duration.as_millis() as f64 / iterations as f64;
    let ops_per_sec = (iterations as f64 / duration.as_secs_f64()) as u64;

    println!("  {} ({} iterations)", name, iterations);
    println!("    Total time: {:?}", duration);
    println!("    Avg time: {:.3}ms", avg_ms);
    println!("    Throughput: {} ops/sec\n", ops_per_sec);
}

#[tokio::test]
#[ignore] // Run explicitly with: cargo test bench --release -- --ignored --nocapture
async fn bench_create_links() {
    println!("\n=== Benchmark: Create Links ===\n");

    let (state, _temp_db) = bench_state();

    let iterations = 1000;
    benchmark("Create link", iterations, || {
        let state_clone = state.clone();
        let req = CreateLinkRequest {
            parts_data: vec![bench_part("pending-use")],
            technician_name: Some("Bench Tech".to_string()),
            technician_email: None,
            manager_email: None,
        };

        tokio::runtime::Handle::current().block_on(async {
            let _ = create_link(State(state_clone), Json(req)).await;
        });
    });
}

#[tokio::test]
#[ignore]
async fn bench_resolve_links() {
    println!("\n=== Benchmark: Resolve Links ===\n");

    let (state, _temp_db) = bench_state();

    let created_at = Utc::now();
    state
        .store
        .insert_link(&LinkRecord {
            id: "benchlink0001".to_string(),
            parts_data: (0..20).map(|_| bench_part("pending-use")).collect(),
            technician_name: "Bench Tech".to_string(),
            technician_email: String::new(),
            manager_email: String::new(),
            created_at,
            expires_at: created_at + Duration::hours(48),
            status: LinkStatus::Active,
            completed_at: None,
        })
        .unwrap();

    let iterations = 1000;
    benchmark("Resolve link (20 parts)", iterations, || {
        let state_clone = state.clone();
        let params = PartsQuery {
            id: Some("benchlink0001".to_string()),
        };

        tokio::runtime::Handle::current().block_on(async {
            let _ = get_parts_data(State(state_clone), Query(params)).await;
        });
    });
}

#[tokio::test]
#[ignore]
async fn bench_submit_reports() {
    println!("\n=== Benchmark: Submit Reports ===\n");

    let (state, _temp_db) = bench_state();

    let created_at = Utc::now();
    state
        .store
        .insert_link(&LinkRecord {
            id: "benchlink0002".to_string(),
            parts_data: vec![bench_part("pending-use")],
            technician_name: "Bench Tech".to_string(),
            technician_email: String::new(),
            manager_email: String::new(),
            created_at,
            expires_at: created_at + Duration::hours(48),
            status: LinkStatus::Active,
            completed_at: None,
        })
        .unwrap();

    let iterations = 500;
    benchmark("Submit report (10 parts)", iterations, || {
        let state_clone = state.clone();
        let req = SubmitReportRequest {
            link_id: Some("benchlink0002".to_string()),
            parts_data: Some((0..10).map(|_| bench_part("used")).collect()),
            technician_info: None,
        };

        tokio::runtime::Handle::current().block_on(async {
            let _ = submit_parts_data(State(state_clone), Json(req)).await;
        });
    });
}

#[tokio::test]
#[ignore]
async fn bench_concurrent_submissions() {
    println!("\n=== Benchmark: Concurrent Operations ===\n");

    let (state, _temp_db) = bench_state();
    let state = Arc::new(state);

    let num_tasks = 100;
    let ops_per_task = 10;

    println!(
        "  Running {} concurrent tasks with {} ops each...",
        num_tasks, ops_per_task
    );

    let start = Instant::now();

    let mut handles = vec![];

    for task_id in 0..num_tasks {
        let state_clone = state.clone();

        let handle = tokio::spawn(async move {
            for op_id in 0..ops_per_task {
                let req = CreateLinkRequest {
                    parts_data: vec![bench_part("pending-use")],
                    technician_name: Some(format!("tech-{}-{}", task_id, op_id)),
                    technician_email: None,
                    manager_email: None,
                };
                let _ = create_link(State(state_clone.as_ref().clone()), Json(req)).await;
            }
        });

        handles.push(handle);
    }

    // Wait for all tasks
    for handle in handles {
        handle.await.unwrap();
    }

    let duration = start.elapsed();
    let total_ops = num_tasks * ops_per_task;
    let ops_per_sec = total_ops as f64 / duration.as_secs_f64();

    println!("  Total operations: {}", total_ops);
    println!("  Total time: {:?}", duration);
    println!("  Throughput: {:.0} ops/sec\n", ops_per_sec);
}

#[test]
fn bench_usage() {
    println!("\n{}", "=".repeat(60));
    println!("Benchmark Test Suite");
    println!("{}", "=".repeat(60));
    println!("\nTo run benchmarks, use:");
    println!("  cargo test --release bench -- --ignored --nocapture");
    println!("\nAvailable benchmarks:");
    println!("  • bench_create_links          - Link issuing performance");
    println!("  • bench_resolve_links         - Link resolution performance");
    println!("  • bench_submit_reports        - Report intake performance");
    println!("  • bench_concurrent_submissions - Concurrent access patterns");
    println!("\n{}\n", "=".repeat(60));
}
