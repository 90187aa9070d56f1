use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::errors::{AppError, ResultExt};
use crate::models::Lead;
use crate::repository::{dedupe_by_place_id, LeadRepository};

/// Rows per INSERT statement; keeps the bind count well under the Postgres limit.
const UPSERT_CHUNK_SIZE: usize = 1000;

const LEAD_COLUMNS: &str = "id, place_id, name, category, address, city, phone, website, \
    has_website, email, latitude, longitude, rating, status, created_at";

/// Postgres-backed lead store over the `business_leads` table.
#[derive(Clone)]
pub struct PgLeadRepository {
    pool: PgPool,
}

impl PgLeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn upsert_query(leads: &[Lead]) -> QueryBuilder<'static, Postgres> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO business_leads (place_id, name, category, address, city, phone, \
             website, has_website, email, latitude, longitude, rating, status) ",
        );

        qb.push_values(leads, |mut row, lead| {
            row.push_bind(lead.place_id.clone())
                .push_bind(lead.name.clone())
                .push_bind(lead.category.clone())
                .push_bind(lead.address.clone())
                .push_bind(lead.city.clone())
                .push_bind(lead.phone.clone())
                .push_bind(lead.website.clone())
                .push_bind(lead.has_website)
                .push_bind(lead.email.clone())
                .push_bind(lead.latitude)
                .push_bind(lead.longitude)
                .push_bind(lead.rating)
                .push_bind(lead.status.as_str());
        });

        // id and created_at stay as first assigned
        qb.push(
            r#"
            ON CONFLICT (place_id) DO UPDATE SET
                name = EXCLUDED.name,
                category = EXCLUDED.category,
                address = EXCLUDED.address,
                city = EXCLUDED.city,
                phone = EXCLUDED.phone,
                website = EXCLUDED.website,
                has_website = EXCLUDED.has_website,
                email = EXCLUDED.email,
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                rating = EXCLUDED.rating,
                status = EXCLUDED.status
            "#,
        );

        qb
    }
}

#[async_trait]
impl LeadRepository for PgLeadRepository {
    async fn list_recent_leads(&self, limit: usize) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>(&format!(
            "SELECT {} FROM business_leads ORDER BY created_at DESC LIMIT $1",
            LEAD_COLUMNS
        ))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list leads")?;

        Ok(leads)
    }

    async fn get_website_flags(&self) -> Result<Vec<bool>, AppError> {
        let flags = sqlx::query_scalar::<_, Option<bool>>("SELECT has_website FROM business_leads")
            .fetch_all(&self.pool)
            .await
            .context("Failed to read website flags")?;

        // A NULL flag counts as no website.
        Ok(flags.into_iter().map(|f| f.unwrap_or(false)).collect())
    }

    async fn upsert_leads(&self, leads: &[Lead]) -> Result<usize, AppError> {
        if leads.is_empty() {
            return Ok(0);
        }

        // One statement cannot touch the same conflict row twice.
        let leads = dedupe_by_place_id(leads.to_vec());

        if leads.len() <= UPSERT_CHUNK_SIZE {
            let result = Self::upsert_query(&leads)
                .build()
                .execute(&self.pool)
                .await
                .context("business_leads upsert")?;
            return Ok(usize::try_from(result.rows_affected()).unwrap_or(usize::MAX));
        }

        let mut tx = self.pool.begin().await.context("business_leads upsert")?;
        let mut written = 0usize;
        for chunk in leads.chunks(UPSERT_CHUNK_SIZE) {
            let result = Self::upsert_query(chunk)
                .build()
                .execute(&mut *tx)
                .await
                .context("business_leads upsert")?;
            written = written.saturating_add(
                usize::try_from(result.rows_affected()).unwrap_or(usize::MAX),
            );
        }
        tx.commit().await.context("business_leads upsert")?;

        Ok(written)
    }
}
