use async_trait::async_trait;
use models::{
    product::Product,
    user::{User, UserCreated, UserInput, UserSummary},
};
use serde_json::Value;

use crate::errors::ServiceError;

/// User storage as seen by the transport layer.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, input: UserInput) -> UserCreated;
    async fn get_by_id(&self, id: u64) -> Result<UserSummary, ServiceError>;
    async fn replace(&self, id: u64, input: UserInput) -> Result<User, ServiceError>;
}

/// Product storage as seen by the transport layer.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_by_id(&self, id: &str) -> Result<Product, ServiceError>;
    async fn replace(&self, id: &str, payload: Value) -> Result<Product, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}
