//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::users::{
        data::{NewUser, UserUpdate},
        errors::UsersServiceError,
        records::{UserId, UserRecord},
        repository::PgUsersRepository,
    },
    validation::Validate,
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError> {
        let mut conn = self.db.acquire().await?;

        let users = self.repository.list_users(&mut conn).await?;

        Ok(users)
    }

    async fn get_user(&self, user: UserId) -> Result<UserRecord, UsersServiceError> {
        let mut conn = self.db.acquire().await?;

        let user = self.repository.get_user(&mut conn, user).await?;

        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        user.validate()?;

        let mut conn = self.db.acquire().await?;

        if self
            .repository
            .find_user_by_email(&mut conn, &user.email)
            .await?
            .is_some()
        {
            return Err(UsersServiceError::Conflict);
        }

        let created = self.repository.create_user(&mut conn, &user).await?;

        Ok(created)
    }

    async fn update_user(
        &self,
        user: UserId,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let update = update.without_blank_text();

        update.validate()?;

        let mut conn = self.db.acquire().await?;

        let existing = self.repository.get_user(&mut conn, user).await?;

        if let Some(email) = update.email.as_deref().filter(|email| *email != existing.email) {
            let owner = self.repository.find_user_by_email(&mut conn, email).await?;

            if owner.is_some_and(|owner| owner.id != existing.id) {
                return Err(UsersServiceError::Conflict);
            }
        }

        let updated = self.repository.update_user(&mut conn, user, &update).await?;

        Ok(updated)
    }

    async fn delete_user(&self, user: UserId) -> Result<(), UsersServiceError> {
        let mut conn = self.db.acquire().await?;

        if !self.repository.user_exists(&mut conn, user).await? {
            return Err(UsersServiceError::NotFound);
        }

        self.repository.delete_user(&mut conn, user).await?;

        Ok(())
    }

    async fn search_users_by_name(&self, name: &str) -> Result<Vec<UserRecord>, UsersServiceError> {
        let mut conn = self.db.acquire().await?;

        let users = self.repository.search_users_by_name(&mut conn, name).await?;

        Ok(users)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<UserRecord, UsersServiceError> {
        let mut conn = self.db.acquire().await?;

        self.repository
            .find_user_by_email(&mut conn, email)
            .await?
            .ok_or(UsersServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Retrieves all users.
    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserId) -> Result<UserRecord, UsersServiceError>;

    /// Creates a user after checking the email is not already taken.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Overwrites the fields present in `update`.
    async fn update_user(
        &self,
        user: UserId,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Deletes a user.
    async fn delete_user(&self, user: UserId) -> Result<(), UsersServiceError>;

    /// Users whose name contains `name`, case-sensitively.
    async fn search_users_by_name(&self, name: &str) -> Result<Vec<UserRecord>, UsersServiceError>;

    /// The user registered with exactly `email`.
    async fn find_user_by_email(&self, email: &str) -> Result<UserRecord, UsersServiceError>;
}
