//! Restaurant Table Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{RestaurantTable, RestaurantTableCreate, RestaurantTableUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "restaurant_table";

#[derive(Clone)]
pub struct RestaurantTableRepository {
    base: BaseRepository,
}

impl RestaurantTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all tables, lowest number first
    pub async fn find_all(&self) -> RepoResult<Vec<RestaurantTable>> {
        let tables: Vec<RestaurantTable> = self
            .base
            .db()
            .query("SELECT * FROM restaurant_table ORDER BY number")
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<RestaurantTable>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let table: Option<RestaurantTable> = self.base.db().select(thing).await?;
        Ok(table)
    }

    /// Find table by its public number
    pub async fn find_by_number(&self, number: i32) -> RepoResult<Option<RestaurantTable>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM restaurant_table WHERE number = $number LIMIT 1")
            .bind(("number", number))
            .await?;
        let tables: Vec<RestaurantTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Create a new table
    pub async fn create(&self, data: RestaurantTableCreate) -> RepoResult<RestaurantTable> {
        // Check duplicate number
        if self.find_by_number(data.number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Table number {} already used",
                data.number
            )));
        }

        let table = RestaurantTable {
            id: None,
            number: data.number,
            capacity: data.capacity,
            status: data.status,
        };

        let created: Option<RestaurantTable> =
            self.base.db().create(TABLE).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create table".to_string()))
    }

    /// Partially update a table; absent fields keep their stored value
    pub async fn update(
        &self,
        id: &str,
        data: RestaurantTableUpdate,
    ) -> RepoResult<RestaurantTable> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))?;

        // Check duplicate number if the number is changing
        if let Some(number) = data.number
            && number != existing.number
            && let Some(found) = self.find_by_number(number).await?
            && found.id != existing.id
        {
            return Err(RepoError::Duplicate(format!(
                "Table number {} already used",
                number
            )));
        }

        let number = data.number.unwrap_or(existing.number);
        let capacity = data.capacity.unwrap_or(existing.capacity);
        let status = data.status.unwrap_or(existing.status);

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET number = $number, capacity = $capacity, status = $status")
            .bind(("thing", thing))
            .bind(("number", number))
            .bind(("capacity", capacity))
            .bind(("status", status))
            .await?;
        let updated: Vec<RestaurantTable> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))
    }

    /// Hard delete a table
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Table {} not found", id)));
        }
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::TableStatus;

    async fn test_repo() -> RestaurantTableRepository {
        let db = DbService::memory().await.unwrap().db;
        RestaurantTableRepository::new(db)
    }

    fn table(number: i32, capacity: i32) -> RestaurantTableCreate {
        RestaurantTableCreate {
            number,
            capacity,
            status: TableStatus::Available,
        }
    }

    #[tokio::test]
    async fn duplicate_number_is_rejected() {
        let repo = test_repo().await;
        repo.create(table(1, 4)).await.unwrap();

        let err = repo.create(table(1, 2)).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn partial_update_keeps_absent_fields() {
        let repo = test_repo().await;
        let created = repo.create(table(3, 4)).await.unwrap();
        let id = created.id.unwrap().to_string();

        let updated = repo
            .update(
                &id,
                RestaurantTableUpdate {
                    number: None,
                    capacity: Some(6),
                    status: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.number, 3);
        assert_eq!(updated.capacity, 6);
        assert_eq!(updated.status, TableStatus::Available);
    }

    #[tokio::test]
    async fn update_to_taken_number_is_rejected() {
        let repo = test_repo().await;
        repo.create(table(1, 4)).await.unwrap();
        let second = repo.create(table(2, 4)).await.unwrap();
        let id = second.id.unwrap().to_string();

        let err = repo
            .update(
                &id,
                RestaurantTableUpdate {
                    number: Some(1),
                    capacity: None,
                    status: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn delete_missing_table_is_not_found() {
        let repo = test_repo().await;
        let err = repo
            .delete("restaurant_table:doesnotexist")
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let repo = test_repo().await;
        let created = repo.create(table(9, 2)).await.unwrap();
        let id = created.id.unwrap().to_string();

        repo.delete(&id).await.unwrap();
        assert!(repo.find_by_id(&id).await.unwrap().is_none());
        assert!(repo.find_by_number(9).await.unwrap().is_none());
    }
}
