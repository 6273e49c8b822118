//! User registration.

use std::sync::Arc;

use ledger_types::{
    AppError, Clock, CreateUserRequest, CreateUserResponse, RepoError, User, UserRepository,
};

use super::storage_failure;

/// Registers users, at most one per mobile number.
pub struct UserService<U: UserRepository> {
    users: U,
    clock: Arc<dyn Clock>,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(users: U, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }

    /// Registers a new user.
    ///
    /// Fails with `Conflict` if the mobile number is already registered.
    pub async fn create_user(&self, req: CreateUserRequest) -> Result<CreateUserResponse, AppError> {
        let existing = self
            .users
            .find_user_by_mobile_number(&req.mobile_number)
            .await
            .map_err(storage_failure("find_user_by_mobile_number"))?;

        if existing.is_some() {
            tracing::info!("user already registered for mobile number");
            return Err(AppError::Conflict);
        }

        let user = User::register(req.name, req.email, req.mobile_number, self.clock.utc());

        match self.users.create_user(&user).await {
            Ok(()) => {}
            // Lost a race with a concurrent registration of the same number.
            Err(RepoError::Conflict(e)) => {
                tracing::warn!(error = %e, "mobile number claimed concurrently");
                return Err(AppError::Conflict);
            }
            Err(e) => return Err(storage_failure("create_user")(e)),
        }

        tracing::info!(user_id = %user.user_id, "user created");
        Ok(CreateUserResponse {
            user_id: user.user_id,
        })
    }
}
