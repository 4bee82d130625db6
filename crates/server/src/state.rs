use std::sync::Arc;

use configs::{ValidationConfig, ValidationMode};
use service::{
    products::ProductStore,
    repository::{ProductRepository, UserRepository},
    users::UserStore,
    validation::{product_schema, user_schema, AcceptAll, ObjectSchema, PayloadValidator, SchemaValidator},
};

/// Handles shared by every handler. Built once at startup; stores are never
/// reached through globals.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub products: Arc<dyn ProductRepository>,
    /// Gate in front of the user write routes.
    pub user_gate: Arc<dyn PayloadValidator>,
    /// Gate in front of `PUT /productos/{id}`; the store runs its own predicate either way.
    pub product_gate: Arc<dyn PayloadValidator>,
}

impl AppState {
    /// Fresh stores (products seeded) with gates chosen by `validation`.
    pub fn new(validation: &ValidationConfig) -> Self {
        Self {
            users: Arc::new(UserStore::new()),
            products: Arc::new(ProductStore::seeded()),
            user_gate: gate_for(user_schema(), validation.users),
            product_gate: gate_for(product_schema(), validation.products),
        }
    }
}

pub fn gate_for(schema: ObjectSchema, mode: ValidationMode) -> Arc<dyn PayloadValidator> {
    match mode {
        ValidationMode::Schema => Arc::new(SchemaValidator::new(schema)),
        ValidationMode::Disabled => Arc::new(AcceptAll),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_gates_users_by_schema_and_leaves_products_to_the_store() {
        let state = AppState::new(&ValidationConfig::default());
        assert_eq!(state.user_gate.name(), "schema");
        assert_eq!(state.product_gate.name(), "none");
    }

    #[test]
    fn both_gates_follow_configuration() {
        let cfg = ValidationConfig { users: ValidationMode::Disabled, products: ValidationMode::Schema };
        let state = AppState::new(&cfg);
        assert_eq!(state.user_gate.name(), "none");
        assert_eq!(state.product_gate.name(), "schema");
    }
}
