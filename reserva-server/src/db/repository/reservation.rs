//! Reservation Repository
//!
//! No cross-entity validation lives here; the booking engine owns the
//! joint table/reservation invariants.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Reservation, ReservationStatus};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new reservation record
    ///
    /// The table/user references are bound natively so they are stored
    /// as record links, matching the equality binds in the lookups below.
    pub async fn create(&self, data: Reservation) -> RepoResult<Reservation> {
        let mut result = self
            .base
            .db()
            .query(
                "CREATE reservation CONTENT {
                    table_id: $table,
                    user_id: $user,
                    reserved_at: $reserved_at,
                    party_size: $party_size,
                    status: $status
                }",
            )
            .bind(("table", data.table_id))
            .bind(("user", data.user_id))
            .bind(("reserved_at", data.reserved_at))
            .bind(("party_size", data.party_size))
            .bind(("status", data.status))
            .await?;
        let created: Vec<Reservation> = result.take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    /// Find reservation by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let reservation: Option<Reservation> = self.base.db().select(thing).await?;
        Ok(reservation)
    }

    /// All reservations owned by a user, any status, insertion order
    pub async fn find_all_by_user(&self, user: &RecordId) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query("SELECT * FROM reservation WHERE user_id = $user")
            .bind(("user", user.clone()))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// ACTIVE reservations referencing a table
    pub async fn find_active_by_table(&self, table: &RecordId) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query("SELECT * FROM reservation WHERE table_id = $table AND status = $status")
            .bind(("table", table.clone()))
            .bind(("status", ReservationStatus::Active))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Update the status of a reservation
    pub async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> RepoResult<Reservation> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status")
            .bind(("thing", thing))
            .bind(("status", status))
            .await?;
        let updated: Vec<Reservation> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use chrono::{TimeZone, Utc};

    async fn test_repo() -> ReservationRepository {
        let db = DbService::memory().await.unwrap().db;
        ReservationRepository::new(db)
    }

    fn reservation(table_key: &str, user_key: &str) -> Reservation {
        Reservation {
            id: None,
            table_id: RecordId::from_table_key("restaurant_table", table_key),
            user_id: RecordId::from_table_key("user", user_key),
            reserved_at: Utc.with_ymd_and_hms(2026, 3, 14, 20, 0, 0).unwrap(),
            party_size: 2,
            status: ReservationStatus::Active,
        }
    }

    #[tokio::test]
    async fn create_and_update_status() {
        let repo = test_repo().await;
        let created = repo.create(reservation("t1", "u1")).await.unwrap();
        assert_eq!(created.status, ReservationStatus::Active);

        let id = created.id.unwrap().to_string();
        let updated = repo
            .update_status(&id, ReservationStatus::Canceled)
            .await
            .unwrap();
        assert_eq!(updated.status, ReservationStatus::Canceled);

        let fetched = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(fetched.status, ReservationStatus::Canceled);
    }

    #[tokio::test]
    async fn update_status_of_missing_reservation_is_not_found() {
        let repo = test_repo().await;
        let err = repo
            .update_status("reservation:missing", ReservationStatus::Canceled)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn find_all_by_user_filters_on_owner() {
        let repo = test_repo().await;
        repo.create(reservation("t1", "alice")).await.unwrap();
        repo.create(reservation("t2", "alice")).await.unwrap();
        repo.create(reservation("t3", "bob")).await.unwrap();

        let alice = RecordId::from_table_key("user", "alice");
        let found = repo.find_all_by_user(&alice).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn find_active_by_table_ignores_canceled() {
        let repo = test_repo().await;
        let first = repo.create(reservation("t1", "alice")).await.unwrap();
        repo.update_status(
            &first.id.unwrap().to_string(),
            ReservationStatus::Canceled,
        )
        .await
        .unwrap();
        repo.create(reservation("t1", "bob")).await.unwrap();

        let table = RecordId::from_table_key("restaurant_table", "t1");
        let active = repo.find_active_by_table(&table).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].status, ReservationStatus::Active);
    }
}
