use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::config::DatabaseSettings;
use crate::models::{
    ConfirmMatchRequest, CreateFoundReportRequest, CreateLostPetRequest, FoundReport, LostPet,
    LostPetStatus, Notification, RejectReportRequest, ReportStatus, ScoredCandidate, Size, Species,
};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Filters for the lost-pet listing
///
/// `None` means "don't filter". When `status` is `None` the listing defaults
/// to active records still marked perdido, which is what the public map
/// shows.
#[derive(Debug, Clone, Default)]
pub struct LostPetFilter {
    pub species: Option<Species>,
    pub size: Option<Size>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub status: Option<LostPetStatus>,
    pub name: Option<String>,
}

/// PostgreSQL client for the lost-and-found store
///
/// Owns the connection pool and every query the service runs: lost-pet
/// records, found reports with their candidate sets, and notifications.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(settings: &DatabaseSettings) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections.unwrap_or(10))
            .min_connections(settings.min_connections.unwrap_or(1))
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs.unwrap_or(5)))
            .idle_timeout(Duration::from_secs(settings.idle_timeout_secs.unwrap_or(600)))
            .test_before_acquire(true)
            .connect(&settings.url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    // ----- lost pets -----

    /// Insert a new lost-pet record; it starts perdido and active
    pub async fn create_lost_pet(
        &self,
        req: &CreateLostPetRequest,
    ) -> Result<LostPet, PostgresError> {
        let pet = sqlx::query_as::<_, LostPet>(
            r#"
            INSERT INTO lost_pets (
                owner_id, name, species, breed, color, size, sex,
                distinguishing_marks, description, date_lost, latitude, longitude,
                address, neighborhood, city, state, contact_phone, contact_email,
                whatsapp, offers_reward, reward_amount
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7,
                $8, $9, $10, $11, $12,
                $13, $14, $15, $16, $17, $18,
                $19, $20, $21
            )
            RETURNING *
            "#,
        )
        .bind(&req.owner_id)
        .bind(&req.name)
        .bind(req.species)
        .bind(&req.breed)
        .bind(&req.color)
        .bind(req.size)
        .bind(req.sex)
        .bind(&req.distinguishing_marks)
        .bind(&req.description)
        .bind(req.date_lost)
        .bind(req.latitude)
        .bind(req.longitude)
        .bind(&req.address)
        .bind(&req.neighborhood)
        .bind(&req.city)
        .bind(&req.state)
        .bind(&req.contact_phone)
        .bind(&req.contact_email)
        .bind(&req.whatsapp)
        .bind(req.offers_reward)
        .bind(req.reward_amount)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created lost pet {} ({})", pet.id, pet.name);

        Ok(pet)
    }

    /// Fetch a lost-pet record by id
    pub async fn get_lost_pet(&self, id: i64) -> Result<LostPet, PostgresError> {
        sqlx::query_as::<_, LostPet>("SELECT * FROM lost_pets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("lost pet {}", id)))
    }

    /// Fetch a lost-pet record and bump its view counter in one round trip
    pub async fn view_lost_pet(&self, id: i64) -> Result<LostPet, PostgresError> {
        sqlx::query_as::<_, LostPet>(
            "UPDATE lost_pets SET views = views + 1 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| PostgresError::NotFound(format!("lost pet {}", id)))
    }

    /// List lost-pet records with optional filters, newest first
    pub async fn list_lost_pets(
        &self,
        filter: &LostPetFilter,
    ) -> Result<Vec<LostPet>, PostgresError> {
        // With no explicit status filter, only active records still marked
        // perdido are listed.
        let pets = sqlx::query_as::<_, LostPet>(
            r#"
            SELECT * FROM lost_pets
            WHERE ($1::species IS NULL OR species = $1)
              AND ($2::pet_size IS NULL OR size = $2)
              AND ($3::text IS NULL OR lower(city) = lower($3))
              AND ($4::text IS NULL OR lower(state) = lower($4))
              AND ($5::text IS NULL OR name ILIKE '%' || $5 || '%')
              AND CASE
                    WHEN $6::lost_pet_status IS NULL THEN status = 'perdido' AND active
                    ELSE status = $6
                  END
            ORDER BY created_at DESC
            LIMIT 200
            "#,
        )
        .bind(filter.species)
        .bind(filter.size)
        .bind(&filter.city)
        .bind(&filter.state)
        .bind(&filter.name)
        .bind(filter.status)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!("Listed {} lost pets", pets.len());

        Ok(pets)
    }

    /// Owner self-resolution: the pet came home
    pub async fn mark_lost_pet_found(&self, id: i64) -> Result<LostPet, PostgresError> {
        let pet = sqlx::query_as::<_, LostPet>(
            r#"
            UPDATE lost_pets
            SET status = 'encontrado', active = false, found_at = now(), updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| PostgresError::NotFound(format!("lost pet {}", id)))?;

        tracing::info!("Lost pet {} marked found by its owner", id);

        Ok(pet)
    }

    /// Cancel a lost-pet record (taken off the map, no resolution)
    pub async fn cancel_lost_pet(&self, id: i64) -> Result<LostPet, PostgresError> {
        sqlx::query_as::<_, LostPet>(
            r#"
            UPDATE lost_pets
            SET status = 'cancelado', active = false, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| PostgresError::NotFound(format!("lost pet {}", id)))
    }

    /// Relational pre-filter for the matching pass: active perdido records of
    /// the same species in the same city/state, lost inside the trailing
    /// window before the found-date
    pub async fn find_candidate_lost_pets(
        &self,
        species: Species,
        city: &str,
        state: &str,
        date_found: chrono::NaiveDate,
        window_days: i64,
    ) -> Result<Vec<LostPet>, PostgresError> {
        let pets = sqlx::query_as::<_, LostPet>(
            r#"
            SELECT * FROM lost_pets
            WHERE status = 'perdido' AND active
              AND species = $1
              AND lower(city) = lower($2)
              AND lower(state) = lower($3)
              AND date_lost >= $4 - $5
            "#,
        )
        .bind(species)
        .bind(city)
        .bind(state)
        .bind(date_found)
        .bind(window_days as i32)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(
            "Candidate pre-filter returned {} lost pets for {:?} in {}/{}",
            pets.len(),
            species,
            city,
            state
        );

        Ok(pets)
    }

    // ----- found reports -----

    /// Insert a new found report; it starts pendente with no candidates
    pub async fn create_found_report(
        &self,
        req: &CreateFoundReportRequest,
    ) -> Result<FoundReport, PostgresError> {
        let report = sqlx::query_as::<_, FoundReport>(
            r#"
            INSERT INTO found_reports (
                reporter_user_id, reporter_name, contact_phone, contact_email,
                species, color, size, sex, description, distinguishing_marks,
                date_found, latitude, longitude, address, neighborhood, city, state,
                pet_with_reporter, temp_location
            )
            VALUES (
                $1, $2, $3, $4,
                $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17,
                $18, $19
            )
            RETURNING *
            "#,
        )
        .bind(&req.reporter_user_id)
        .bind(&req.reporter_name)
        .bind(&req.contact_phone)
        .bind(&req.contact_email)
        .bind(req.species)
        .bind(&req.color)
        .bind(req.size)
        .bind(req.sex)
        .bind(&req.description)
        .bind(&req.distinguishing_marks)
        .bind(req.date_found)
        .bind(req.latitude)
        .bind(req.longitude)
        .bind(&req.address)
        .bind(&req.neighborhood)
        .bind(&req.city)
        .bind(&req.state)
        .bind(req.pet_with_reporter)
        .bind(&req.temp_location)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created found report {}", report.id);

        Ok(report)
    }

    /// Fetch a found report by id
    pub async fn get_found_report(&self, id: i64) -> Result<FoundReport, PostgresError> {
        sqlx::query_as::<_, FoundReport>("SELECT * FROM found_reports WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("found report {}", id)))
    }

    /// List found reports, optionally by status, newest first
    pub async fn list_found_reports(
        &self,
        status: Option<ReportStatus>,
    ) -> Result<Vec<FoundReport>, PostgresError> {
        let reports = sqlx::query_as::<_, FoundReport>(
            r#"
            SELECT * FROM found_reports
            WHERE ($1::report_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT 200
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    /// Candidate set of a found report, best score first
    pub async fn get_report_candidates(
        &self,
        report_id: i64,
    ) -> Result<Vec<ScoredCandidate>, PostgresError> {
        let rows = sqlx::query(
            r#"
            SELECT lost_pet_id, score, distance_km
            FROM found_report_candidates
            WHERE report_id = $1
            ORDER BY score DESC, distance_km ASC
            "#,
        )
        .bind(report_id)
        .fetch_all(&self.pool)
        .await?;

        let candidates = rows
            .iter()
            .map(|row| ScoredCandidate {
                lost_pet_id: row.get("lost_pet_id"),
                score: row.get::<i32, _>("score") as u32,
                distance_km: row.get("distance_km"),
            })
            .collect();

        Ok(candidates)
    }

    /// Replace a report's candidate set with the outcome of a matching pass
    ///
    /// Set semantics: any previous candidates are dropped first. A non-empty
    /// set moves a pendente report to em_analise; the status never moves
    /// back, so re-running the pass is idempotent.
    pub async fn replace_candidates(
        &self,
        report_id: i64,
        candidates: &[ScoredCandidate],
    ) -> Result<FoundReport, PostgresError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM found_report_candidates WHERE report_id = $1")
            .bind(report_id)
            .execute(&mut *tx)
            .await?;

        for candidate in candidates {
            sqlx::query(
                r#"
                INSERT INTO found_report_candidates (report_id, lost_pet_id, score, distance_km)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(report_id)
            .bind(candidate.lost_pet_id)
            .bind(candidate.score as i32)
            .bind(candidate.distance_km)
            .execute(&mut *tx)
            .await?;
        }

        let query = if candidates.is_empty() {
            "UPDATE found_reports SET updated_at = now() WHERE id = $1 RETURNING *"
        } else {
            r#"
            UPDATE found_reports
            SET status = CASE WHEN status = 'pendente' THEN 'em_analise'::report_status ELSE status END,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#
        };

        let report = sqlx::query_as::<_, FoundReport>(query)
            .bind(report_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("found report {}", report_id)))?;

        tx.commit().await?;

        tracing::info!(
            "Report {} now has {} candidates (status {:?})",
            report_id,
            candidates.len(),
            report.status
        );

        Ok(report)
    }

    /// Promote one candidate to the confirmed match
    ///
    /// The lost pet is resolved with a conditional update: only a record
    /// still marked perdido can be confirmed, so when two reports contend for
    /// the same record the second confirmation gets a Conflict instead of
    /// silently overwriting the first. The owner is notified with the
    /// finder's contact data inside the same transaction.
    pub async fn confirm_match(
        &self,
        report_id: i64,
        req: &ConfirmMatchRequest,
    ) -> Result<(FoundReport, LostPet), PostgresError> {
        let mut tx = self.pool.begin().await?;

        let report = sqlx::query_as::<_, FoundReport>(
            "SELECT * FROM found_reports WHERE id = $1 FOR UPDATE",
        )
        .bind(report_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| PostgresError::NotFound(format!("found report {}", report_id)))?;

        if report.status != ReportStatus::UnderReview {
            return Err(PostgresError::Conflict(format!(
                "report {} is not em_analise",
                report_id
            )));
        }

        let is_candidate = sqlx::query(
            "SELECT 1 FROM found_report_candidates WHERE report_id = $1 AND lost_pet_id = $2",
        )
        .bind(report_id)
        .bind(req.lost_pet_id)
        .fetch_optional(&mut *tx)
        .await?
        .is_some();

        if !is_candidate {
            return Err(PostgresError::InvalidInput(format!(
                "lost pet {} is not a candidate of report {}",
                req.lost_pet_id, report_id
            )));
        }

        let lost = sqlx::query_as::<_, LostPet>(
            r#"
            UPDATE lost_pets
            SET status = 'encontrado', active = false, found_at = now(), updated_at = now()
            WHERE id = $1 AND status = 'perdido'
            RETURNING *
            "#,
        )
        .bind(req.lost_pet_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            PostgresError::Conflict(format!(
                "lost pet {} was already resolved by another confirmation",
                req.lost_pet_id
            ))
        })?;

        let report = sqlx::query_as::<_, FoundReport>(
            r#"
            UPDATE found_reports
            SET status = 'aprovado', confirmed_lost_pet_id = $2, reviewed_by = $3,
                admin_notes = $4, reviewed_at = now(), owner_notified = true,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(report_id)
        .bind(req.lost_pet_id)
        .bind(&req.reviewer)
        .bind(&req.notes)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO notifications (id, user_id, kind, title, message, link, contact_phone, contact_email)
            VALUES ($1, $2, 'match_confirmado', $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&lost.owner_id)
        .bind("Seu pet pode ter sido encontrado!")
        .bind(format!(
            "Um pet compatível com \"{}\" foi encontrado em {}/{}. Entre em contato com quem o encontrou.",
            lost.name, report.city, report.state
        ))
        .bind(format!("/pets-perdidos/?pet={}", lost.id))
        .bind(&report.contact_phone)
        .bind(&report.contact_email)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Report {} confirmed as match for lost pet {} by {}",
            report_id,
            req.lost_pet_id,
            req.reviewer
        );

        Ok((report, lost))
    }

    /// Dismiss a found report
    pub async fn reject_report(
        &self,
        report_id: i64,
        req: &RejectReportRequest,
    ) -> Result<FoundReport, PostgresError> {
        let mut tx = self.pool.begin().await?;

        let report = sqlx::query_as::<_, FoundReport>(
            "SELECT * FROM found_reports WHERE id = $1 FOR UPDATE",
        )
        .bind(report_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| PostgresError::NotFound(format!("found report {}", report_id)))?;

        if report.status.is_terminal() {
            return Err(PostgresError::Conflict(format!(
                "report {} was already reviewed",
                report_id
            )));
        }

        let report = sqlx::query_as::<_, FoundReport>(
            r#"
            UPDATE found_reports
            SET status = 'rejeitado', reviewed_by = $2, admin_notes = $3,
                reviewed_at = now(), updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(report_id)
        .bind(&req.reviewer)
        .bind(&req.notes)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(reporter) = &report.reporter_user_id {
            sqlx::query(
                r#"
                INSERT INTO notifications (id, user_id, kind, title, message)
                VALUES ($1, $2, 'reporte_rejeitado', $3, $4)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(reporter)
            .bind("Reporte encerrado")
            .bind(format!(
                "Seu reporte de pet encontrado em {}/{} foi encerrado pela moderação.",
                report.city, report.state
            ))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!("Report {} rejected by {}", report_id, req.reviewer);

        Ok(report)
    }

    // ----- notifications -----

    /// List a user's notifications, newest first
    pub async fn list_notifications(
        &self,
        user_id: &str,
    ) -> Result<Vec<Notification>, PostgresError> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    /// Mark one notification as read
    pub async fn mark_notification_read(&self, id: Uuid) -> Result<Notification, PostgresError> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET is_read = true WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| PostgresError::NotFound(format!("notification {}", id)))
    }

    /// Mark all of a user's notifications as read; returns how many changed
    pub async fn mark_all_notifications_read(&self, user_id: &str) -> Result<u64, PostgresError> {
        let result =
            sqlx::query("UPDATE notifications SET is_read = true WHERE user_id = $1 AND NOT is_read")
                .bind(user_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_default_is_unfiltered() {
        let filter = LostPetFilter::default();
        assert!(filter.species.is_none());
        assert!(filter.status.is_none());
        assert!(filter.city.is_none());
    }
}
