use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Stored user record; also the body returned by a successful update.
///
/// `age` keeps the number exactly as the caller sent it, so `30` echoes back
/// as `30` and `41.5` as `41.5`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub age: Number,
    pub email: String,
}

/// Caller-settable fields for create and update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserInput {
    pub name: String,
    pub age: Number,
    pub email: String,
}

/// Create response: the id goes out as its decimal string form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserCreated {
    pub id: String,
    pub name: String,
    pub age: Number,
    pub email: String,
}

/// Read view; only the id and name are exposed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: u64,
    pub name: String,
}

impl User {
    pub fn new(id: u64, input: UserInput) -> Self {
        Self { id, name: input.name, age: input.age, email: input.email }
    }

    /// Overwrite all mutable fields at once.
    pub fn apply(&mut self, input: UserInput) {
        self.name = input.name;
        self.age = input.age;
        self.email = input.email;
    }

    pub fn created_view(&self) -> UserCreated {
        UserCreated {
            id: self.id.to_string(),
            name: self.name.clone(),
            age: self.age.clone(),
            email: self.email.clone(),
        }
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary { id: self.id, name: self.name.clone() }
    }
}

/// Numeric coercion of a path key. `"1"`, `" 1 "`, `"01"` and `"1.0"` all
/// resolve to 1; keys that do not denote a positive integer resolve to
/// nothing and therefore match no user.
pub fn parse_user_id(raw: &str) -> Option<u64> {
    let n: f64 = raw.trim().parse().ok()?;
    if !n.is_finite() || n < 1.0 || n.fract() != 0.0 || n > u64::MAX as f64 {
        return None;
    }
    Some(n as u64)
}
