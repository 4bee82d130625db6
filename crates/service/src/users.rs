use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use models::user::{User, UserCreated, UserInput, UserSummary};

use crate::errors::ServiceError;
use crate::repository::UserRepository;

struct UserTable {
    users: Vec<User>,
    next_id: u64,
}

/// In-memory user store with sequential integer ids starting at 1.
///
/// The counter and the collection share one lock so allocation and append
/// happen together. Ids are never reused; the counter only moves forward.
pub struct UserStore {
    inner: RwLock<UserTable>,
}

impl Default for UserStore {
    fn default() -> Self {
        Self { inner: RwLock::new(UserTable { users: Vec::new(), next_id: 1 }) }
    }
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id and store the record. No validation happens here.
    #[instrument(skip_all)]
    pub async fn create(&self, input: UserInput) -> UserCreated {
        let mut table = self.inner.write().await;
        let id = table.next_id;
        table.next_id += 1;
        let user = User::new(id, input);
        let view = user.created_view();
        table.users.push(user);
        debug!(id, "user stored");
        view
    }

    pub async fn get_by_id(&self, id: u64) -> Result<UserSummary, ServiceError> {
        let table = self.inner.read().await;
        table
            .users
            .iter()
            .find(|u| u.id == id)
            .map(User::summary)
            .ok_or_else(|| ServiceError::not_found("user"))
    }

    #[instrument(skip(self, input))]
    pub async fn replace(&self, id: u64, input: UserInput) -> Result<User, ServiceError> {
        let mut table = self.inner.write().await;
        let user = table
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| ServiceError::not_found("user"))?;
        user.apply(input);
        Ok(user.clone())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, input: UserInput) -> UserCreated { self.create(input).await }
    async fn get_by_id(&self, id: u64) -> Result<UserSummary, ServiceError> { self.get_by_id(id).await }
    async fn replace(&self, id: u64, input: UserInput) -> Result<User, ServiceError> { self.replace(id, input).await }
}
