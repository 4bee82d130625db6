//! Payload validation.
//!
//! Every strategy sits behind [`PayloadValidator`] and reports all violations
//! it finds rather than stopping at the first one.

mod predicate;
mod schema;

pub use predicate::{check_product, ProductPredicate};
pub use schema::{product_schema, user_schema, FieldSchema, FieldType, ObjectSchema, SchemaValidator};

use serde_json::Value;

/// Field a violation is filed under when it concerns the body as a whole.
pub const BODY_FIELD: &str = "body";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Violation {
    field: String,
    message: String,
}

/// Verdict plus the full list of human-readable violations, each filed under
/// the field it concerns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation { field: field.into(), message: message.into() });
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }

    /// Append the violations of `other` for fields this report has not
    /// already flagged. The first report's wording wins per field.
    pub fn merge(&mut self, other: ValidationReport) {
        let flagged: Vec<String> = self.violations.iter().map(|v| v.field.clone()).collect();
        self.violations.extend(other.violations.into_iter().filter(|v| !flagged.contains(&v.field)));
    }

    pub fn into_errors(self) -> Vec<String> {
        self.violations.into_iter().map(|v| v.message).collect()
    }
}

/// A pluggable check run over a parsed JSON body.
///
/// Implementations may normalize the payload in place (type coercion) before
/// judging it.
pub trait PayloadValidator: Send + Sync {
    fn name(&self) -> &'static str;
    fn validate(&self, payload: &mut Value) -> ValidationReport;
}

/// Passes every payload through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl PayloadValidator for AcceptAll {
    fn name(&self) -> &'static str {
        "none"
    }

    fn validate(&self, _payload: &mut Value) -> ValidationReport {
        ValidationReport::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accept_all_never_reports() {
        let mut v = json!(42);
        let report = AcceptAll.validate(&mut v);
        assert!(report.is_valid());
        assert_eq!(v, json!(42));
    }

    #[test]
    fn report_collects_in_push_order() {
        let mut r = ValidationReport::new();
        r.push("name", "first");
        r.push("price", String::from("second"));
        assert!(!r.is_valid());
        assert_eq!(r.errors(), ["first", "second"]);
    }

    #[test]
    fn merge_keeps_one_voice_per_field() {
        let mut structural = ValidationReport::new();
        structural.push("price", "price must be a number");

        let mut rules = ValidationReport::new();
        rules.push("name", "name must be between 2 and 40 characters");
        rules.push("price", "price must be a finite number");
        rules.push("category", "category values must be one of: electronics, books, clothes, food");

        structural.merge(rules);
        assert_eq!(
            structural.errors(),
            [
                "price must be a number",
                "name must be between 2 and 40 characters",
                "category values must be one of: electronics, books, clothes, food",
            ]
        );
    }

    #[test]
    fn merge_keeps_repeated_messages_of_other_fields() {
        let mut structural = ValidationReport::new();
        structural.push(BODY_FIELD, "request body must be an object (Product)");

        let mut rules = ValidationReport::new();
        rules.push(BODY_FIELD, "body must be a JSON object");
        structural.merge(rules);
        assert_eq!(structural.len(), 1);

        let mut empty = ValidationReport::new();
        let mut rules = ValidationReport::new();
        rules.push("tags", "tags must be a non-empty array of strings");
        empty.merge(rules);
        assert_eq!(empty.into_errors(), vec!["tags must be a non-empty array of strings".to_string()]);
    }
}
