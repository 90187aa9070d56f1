use std::env;
use uuid::Uuid;

use lead_finder::data::db::Database;
use lead_finder::models::{Lead, LeadStatus};
use lead_finder::repository::LeadRepository;

fn lead(place_id: &str, name: &str) -> Lead {
    Lead {
        id: None,
        place_id: place_id.to_string(),
        name: name.to_string(),
        category: Some("plumber".to_string()),
        address: "1 Test St".to_string(),
        city: String::new(),
        phone: None,
        website: None,
        has_website: false,
        email: None,
        latitude: Some(49.28),
        longitude: Some(-123.12),
        rating: Some(4.0),
        status: LeadStatus::New,
        created_at: None,
    }
}

/// Upsert smoke test against a real `business_leads` table (see sql/business_leads.sql).
/// Marked ignored to avoid running against production by accident; set TEST_DATABASE_URL to run.
#[tokio::test]
#[ignore]
async fn upsert_same_place_twice_smoke_test() -> anyhow::Result<()> {
    let db_url = env::var("TEST_DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("Set TEST_DATABASE_URL to run this test"))?;

    let db = Database::new(&db_url).await?;
    let repo = db.lead_repository();

    // Use a unique place id to avoid conflicts on repeated runs.
    let place_id = format!("test-{}", Uuid::new_v4());

    repo.upsert_leads(&[lead(&place_id, "First Write")]).await?;
    repo.upsert_leads(&[lead(&place_id, "Second Write")]).await?;

    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT name FROM business_leads WHERE place_id = $1")
            .bind(&place_id)
            .fetch_all(&db.pool)
            .await?;
    assert_eq!(rows, vec![("Second Write".to_string(),)]);

    let recent = repo.list_recent_leads(100).await?;
    assert!(recent.len() <= 100);
    assert!(recent
        .windows(2)
        .all(|w| w[0].created_at >= w[1].created_at));

    sqlx::query("DELETE FROM business_leads WHERE place_id = $1")
        .bind(&place_id)
        .execute(&db.pool)
        .await?;

    Ok(())
}

/// A single batch that repeats a place id writes one row, last occurrence winning.
#[tokio::test]
#[ignore]
async fn upsert_batch_with_repeated_place_smoke_test() -> anyhow::Result<()> {
    let db_url = env::var("TEST_DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("Set TEST_DATABASE_URL to run this test"))?;

    let db = Database::new(&db_url).await?;
    let repo = db.lead_repository();

    let place_id = format!("test-dup-{}", Uuid::new_v4());
    let written = repo
        .upsert_leads(&[lead(&place_id, "first"), lead(&place_id, "second")])
        .await?;
    assert_eq!(written, 1);

    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT name FROM business_leads WHERE place_id = $1")
            .bind(&place_id)
            .fetch_all(&db.pool)
            .await?;
    assert_eq!(rows, vec![("second".to_string(),)]);

    sqlx::query("DELETE FROM business_leads WHERE place_id = $1")
        .bind(&place_id)
        .execute(&db.pool)
        .await?;

    Ok(())
}
