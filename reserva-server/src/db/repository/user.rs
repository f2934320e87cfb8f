//! User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserCreate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let user: Option<User> = self.base.db().select(thing).await?;
        Ok(user)
    }

    /// Create a new user, hashing the password
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email {} already used",
                data.email
            )));
        }

        let hash_pass = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: None,
            name: data.name,
            email: data.email,
            hash_pass,
            role: data.role,
        };

        let created: Option<User> = self.base.db().create(TABLE).content(user).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::UserRole;

    async fn test_repo() -> UserRepository {
        let db = DbService::memory().await.unwrap().db;
        UserRepository::new(db)
    }

    fn diner(email: &str) -> UserCreate {
        UserCreate {
            name: "Test Diner".to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
            role: UserRole::User,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = test_repo().await;
        repo.create(diner("diner@example.com")).await.unwrap();

        let err = repo.create(diner("diner@example.com")).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn find_by_id_round_trip() {
        let repo = test_repo().await;
        let user = repo.create(diner("diner@example.com")).await.unwrap();
        let id = user.id.unwrap().to_string();

        let found = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(found.email, "diner@example.com");
        assert_eq!(found.role, UserRole::User);
    }

    #[tokio::test]
    async fn password_round_trips_through_the_hash() {
        let repo = test_repo().await;
        let user = repo.create(diner("diner@example.com")).await.unwrap();

        assert!(user.verify_password("secret123").unwrap());
        assert!(!user.verify_password("wrong").unwrap());
    }
}
