//! Ad-hoc database inspection tool
//!
//! Prints a one-shot snapshot of the link and report tables for the database
//! named by `DATABASE_URL`. Run with: cargo run --bin inspect

use std::env;
use std::sync::Arc;

use chrono::Utc;
use dotenvy::dotenv;

use partstracker::database::init_db;
use partstracker::model::LinkStatus;
use partstracker::store::Store;

fn main() {
    dotenv().ok();

    let db_name = env::var("DATABASE_URL").unwrap_or_else(|_| "data.db".to_string());
    let db = init_db(&db_name).expect("Failed to open database");
    let store = Store::new(Arc::new(db));

    println!("📂 Database: {}", db_name);
    println!("Timestamp: {}\n", Utc::now().to_rfc3339());

    let links = store.links().expect("Failed to read links table");
    let now = Utc::now();
    let active = links
        .iter()
        .filter(|link| link.status == LinkStatus::Active)
        .count();
    let completed = links
        .iter()
        .filter(|link| link.status == LinkStatus::Completed)
        .count();
    let expired = links.iter().filter(|link| now >= link.expires_at).count();

    println!(
        "🔗 Links: {} total ({} active, {} completed, {} past expiry)",
        links.len(),
        active,
        completed,
        expired
    );

    let reports = store.reports().expect("Failed to read reports table");
    println!("📋 Completed reports: {}", reports.len());

    for (report_id, report) in &reports {
        println!(
            "  {} -> link {} ({} parts, submitted {})",
            report_id,
            report.link_id,
            report.parts.len(),
            report.completed_at.to_rfc3339()
        );
        for (label, count) in &report.summary {
            if *count > 0 {
                println!("      {}: {}", label, count);
            }
        }
    }
}
