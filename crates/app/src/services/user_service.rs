//! User service — registration and profile management.

use devbook_domain::error::{ConflictError, DevbookError, ValidationError};
use devbook_domain::id::UserId;
use devbook_domain::user::User;

use crate::dto::{NewUser, UserDto, UserUpdate};
use crate::ports::{CredentialHasher, UserRepository};

/// Shortest password accepted unless configured otherwise.
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 4;

/// Application service for user CRUD operations.
///
/// Plaintext passwords are hashed through the [`CredentialHasher`] before
/// anything reaches the repository.
pub struct UserService<R, H> {
    repo: R,
    hasher: H,
    min_password_length: usize,
}

impl<R: UserRepository, H: CredentialHasher> UserService<R, H> {
    /// Create a new service backed by the given repository and hasher.
    pub fn new(repo: R, hasher: H) -> Self {
        Self {
            repo,
            hasher,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }

    /// Override the minimum accepted password length.
    #[must_use]
    pub fn with_min_password_length(mut self, min_length: usize) -> Self {
        self.min_password_length = min_length;
        self
    }

    fn hash_password(&self, password: &str) -> Result<String, DevbookError> {
        if password.chars().count() < self.min_password_length {
            return Err(ValidationError::PasswordTooShort {
                min_length: self.min_password_length,
            }
            .into());
        }
        self.hasher.hash(password)
    }

    async fn ensure_email_free(
        &self,
        email: &str,
        owner: Option<UserId>,
    ) -> Result<(), DevbookError> {
        match self.repo.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != owner => {
                tracing::debug!("email already registered");
                Err(ConflictError::EmailTaken(email.to_string()).into())
            }
            _ => Ok(()),
        }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::Validation`] for malformed fields or a short
    /// password, [`DevbookError::Conflict`] when the email is registered,
    /// [`DevbookError::Credential`] if hashing fails, or a storage error.
    #[tracing::instrument(skip(self, input))]
    pub async fn create_user(&self, input: NewUser) -> Result<UserDto, DevbookError> {
        let mut user = User::builder()
            .first_name(input.first_name)
            .last_name(input.last_name)
            .email(input.email)
            .build()?;
        self.ensure_email_free(&user.email, None).await?;
        user.password_hash = self.hash_password(&input.password)?;

        let created = self.repo.create(user).await?;
        tracing::info!(user_id = %created.id, "user registered");
        Ok(created.into())
    }

    /// Whether a user is registered with `email`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DevbookError> {
        Ok(self.repo.find_by_email(email).await?.is_some())
    }

    /// Look up a user by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::NotFound`] when no user with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_user(&self, id: UserId) -> Result<UserDto, DevbookError> {
        self.repo
            .get_by_id(id)
            .await?
            .map(UserDto::from)
            .ok_or_else(|| DevbookError::not_found("User", id))
    }

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_users(&self) -> Result<Vec<UserDto>, DevbookError> {
        let users = self.repo.get_all().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    /// Overwrite names and email of a user, re-hashing the password when a
    /// new one is supplied.
    ///
    /// Returns `Ok(None)` when the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::Validation`] for malformed fields,
    /// [`DevbookError::Conflict`] when another user owns the email,
    /// [`DevbookError::Credential`] if hashing fails, or a storage error.
    #[tracing::instrument(skip(self, input))]
    pub async fn update_user(
        &self,
        id: UserId,
        input: UserUpdate,
    ) -> Result<Option<UserDto>, DevbookError> {
        let Some(mut user) = self.repo.get_by_id(id).await? else {
            tracing::debug!("user does not exist");
            return Ok(None);
        };
        self.ensure_email_free(&input.email, Some(id)).await?;

        user.first_name = input.first_name;
        user.last_name = input.last_name;
        user.email = input.email;
        user.validate()?;
        if let Some(password) = input.password {
            user.password_hash = self.hash_password(&password)?;
        }

        let saved = self.repo.update(user).await?;
        Ok(Some(saved.into()))
    }

    /// Delete a user by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, id: UserId) -> Result<(), DevbookError> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{InMemoryUserRepo, StubHasher};
    use std::sync::Arc;

    type Service = UserService<Arc<InMemoryUserRepo>, Arc<StubHasher>>;

    fn make_service() -> (Service, Arc<InMemoryUserRepo>, Arc<StubHasher>) {
        let repo = Arc::new(InMemoryUserRepo::default());
        let hasher = Arc::new(StubHasher::returning("hashed"));
        let svc = UserService::new(Arc::clone(&repo), Arc::clone(&hasher));
        (svc, repo, hasher)
    }

    fn new_user(email: &str, password: &str) -> NewUser {
        NewUser {
            first_name: "Ali".to_string(),
            last_name: "Test".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn update(email: &str, password: Option<&str>) -> UserUpdate {
        UserUpdate {
            first_name: "New".to_string(),
            last_name: "Name".to_string(),
            email: email.to_string(),
            password: password.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn should_store_hash_instead_of_plaintext_when_creating_user() {
        let (svc, repo, hasher) = make_service();

        let created = svc
            .create_user(new_user("ali@test.com", "1234"))
            .await
            .unwrap();

        let stored = repo.stored(created.id).unwrap();
        assert_eq!(stored.password_hash, "hashed");
        assert_eq!(hasher.calls(), vec!["1234".to_string()]);
        assert_eq!(repo.writes(), 1);
    }

    #[tokio::test]
    async fn should_reject_registered_email() {
        let (svc, repo, _) = make_service();
        svc.create_user(new_user("ali@test.com", "1234"))
            .await
            .unwrap();

        let result = svc.create_user(new_user("ali@test.com", "5678")).await;

        assert!(matches!(
            result,
            Err(DevbookError::Conflict(ConflictError::EmailTaken(_)))
        ));
        assert_eq!(repo.writes(), 1);
    }

    #[tokio::test]
    async fn should_reject_short_password_without_hashing() {
        let (svc, repo, hasher) = make_service();

        let result = svc.create_user(new_user("ali@test.com", "123")).await;

        assert!(matches!(
            result,
            Err(DevbookError::Validation(ValidationError::PasswordTooShort {
                min_length: 4
            }))
        ));
        assert!(hasher.calls().is_empty());
        assert_eq!(repo.writes(), 0);
    }

    #[tokio::test]
    async fn should_honour_configured_min_password_length() {
        let repo = Arc::new(InMemoryUserRepo::default());
        let svc = UserService::new(Arc::clone(&repo), StubHasher::returning("hashed"))
            .with_min_password_length(12);

        let result = svc.create_user(new_user("ali@test.com", "1234")).await;
        assert!(matches!(
            result,
            Err(DevbookError::Validation(ValidationError::PasswordTooShort {
                min_length: 12
            }))
        ));
    }

    #[tokio::test]
    async fn should_reject_malformed_email() {
        let (svc, _, _) = make_service();
        let result = svc.create_user(new_user("not-an-email", "1234")).await;
        assert!(matches!(
            result,
            Err(DevbookError::Validation(ValidationError::InvalidEmail(_)))
        ));
    }

    #[tokio::test]
    async fn should_report_existing_email() {
        let (svc, _, _) = make_service();
        svc.create_user(new_user("test@test.com", "1234"))
            .await
            .unwrap();

        assert!(svc.email_exists("test@test.com").await.unwrap());
        assert!(!svc.email_exists("other@test.com").await.unwrap());
    }

    #[tokio::test]
    async fn should_list_all_users() {
        let (svc, _, _) = make_service();
        svc.create_user(new_user("a@test.com", "1234"))
            .await
            .unwrap();
        svc.create_user(new_user("b@test.com", "1234"))
            .await
            .unwrap();

        let users = svc.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn should_return_user_by_id() {
        let (svc, _, _) = make_service();
        let created = svc
            .create_user(new_user("ali@test.com", "1234"))
            .await
            .unwrap();

        let fetched = svc.get_user(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn should_return_not_found_when_user_missing() {
        let (svc, _, _) = make_service();
        let result = svc.get_user(UserId::new()).await;
        assert!(matches!(result, Err(DevbookError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_update_profile_and_rehash_password() {
        let (svc, repo, hasher) = make_service();
        let created = svc
            .create_user(new_user("ali@test.com", "1234"))
            .await
            .unwrap();

        let updated = svc
            .update_user(created.id, update("new@test.com", Some("pass")))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.first_name, "New");
        assert_eq!(updated.email, "new@test.com");
        assert_eq!(hasher.calls(), vec!["1234".to_string(), "pass".to_string()]);
        assert_eq!(repo.stored(created.id).unwrap().password_hash, "hashed");
    }

    #[tokio::test]
    async fn should_keep_password_hash_when_update_has_no_password() {
        let repo = Arc::new(InMemoryUserRepo::with([User::builder()
            .first_name("Ali")
            .last_name("Test")
            .email("ali@test.com")
            .password_hash("original")
            .build()
            .unwrap()]));
        let id = repo.store.lock().unwrap().keys().copied().next().unwrap();
        let hasher = Arc::new(StubHasher::returning("hashed"));
        let svc = UserService::new(Arc::clone(&repo), Arc::clone(&hasher));

        svc.update_user(id, update("ali@test.com", None))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(repo.stored(id).unwrap().password_hash, "original");
        assert!(hasher.calls().is_empty());
    }

    #[tokio::test]
    async fn should_return_none_when_updating_missing_user() {
        let (svc, repo, _) = make_service();

        let result = svc
            .update_user(UserId::new(), update("new@test.com", Some("pass")))
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(repo.writes(), 0);
    }

    #[tokio::test]
    async fn should_reject_update_taking_another_users_email() {
        let (svc, _, _) = make_service();
        svc.create_user(new_user("taken@test.com", "1234"))
            .await
            .unwrap();
        let other = svc
            .create_user(new_user("ali@test.com", "1234"))
            .await
            .unwrap();

        let result = svc
            .update_user(other.id, update("taken@test.com", None))
            .await;
        assert!(matches!(
            result,
            Err(DevbookError::Conflict(ConflictError::EmailTaken(_)))
        ));
    }

    #[tokio::test]
    async fn should_call_repository_on_delete() {
        let (svc, repo, _) = make_service();
        let id = UserId::new();

        svc.delete_user(id).await.unwrap();

        assert_eq!(*repo.deleted.lock().unwrap(), vec![id]);
    }
}
