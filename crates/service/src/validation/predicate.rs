use models::product::Category;
use serde_json::{Map, Value};

use super::{PayloadValidator, ValidationReport, BODY_FIELD};

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 40;
const CENTS_TOLERANCE: f64 = 1e-6;

/// The product replace predicate as a [`PayloadValidator`]. It never rewrites
/// the payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductPredicate;

impl PayloadValidator for ProductPredicate {
    fn name(&self) -> &'static str {
        "product-predicate"
    }

    fn validate(&self, payload: &mut Value) -> ValidationReport {
        check_product(payload)
    }
}

/// Check a candidate product body against every field rule and collect all
/// violations. Order of the messages follows the field order below.
pub fn check_product(payload: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();
    let Some(fields) = payload.as_object() else {
        report.push(BODY_FIELD, "body must be a JSON object");
        return report;
    };

    check_name(fields, &mut report);
    check_price(fields, &mut report);
    check_category(fields, &mut report);
    check_tags(fields, &mut report);
    check_in_stock(fields, &mut report);
    check_description(fields, &mut report);
    report
}

fn check_name(fields: &Map<String, Value>, report: &mut ValidationReport) {
    match fields.get("name").and_then(Value::as_str) {
        None => report.push("name", "name must be a string"),
        Some(name) => {
            let len = name.chars().count();
            if !(NAME_MIN..=NAME_MAX).contains(&len) {
                report.push("name", format!("name must be between {NAME_MIN} and {NAME_MAX} characters"));
            }
        }
    }
}

fn check_price(fields: &Map<String, Value>, report: &mut ValidationReport) {
    let Some(price) = fields.get("price").and_then(Value::as_f64).filter(|p| p.is_finite()) else {
        report.push("price", "price must be a finite number");
        return;
    };
    if price < 0.0 {
        report.push("price", "price must be greater than or equal to 0");
    }
    let cents = price * 100.0;
    if (cents.round() - cents).abs() > CENTS_TOLERANCE {
        report.push("price", "price must have at most two decimal places");
    }
}

fn check_category(fields: &Map<String, Value>, report: &mut ValidationReport) {
    let items = match fields.get("category").and_then(Value::as_array) {
        Some(items) if !items.is_empty() => items,
        _ => {
            report.push("category", "category must be a non-empty array");
            return;
        }
    };
    let all_allowed = items
        .iter()
        .all(|item| item.as_str().and_then(Category::parse).is_some());
    if !all_allowed {
        report.push("category", format!("category values must be one of: {}", Category::allowed_list()));
    }
}

fn check_tags(fields: &Map<String, Value>, report: &mut ValidationReport) {
    let Some(tags) = fields.get("tags") else { return };
    let ok = tags
        .as_array()
        .is_some_and(|items| !items.is_empty() && items.iter().all(Value::is_string));
    if !ok {
        report.push("tags", "tags must be a non-empty array of strings");
    }
}

fn check_in_stock(fields: &Map<String, Value>, report: &mut ValidationReport) {
    if fields.get("inStock").is_some_and(|v| !v.is_boolean()) {
        report.push("inStock", "inStock must be a boolean");
    }
}

fn check_description(fields: &Map<String, Value>, report: &mut ValidationReport) {
    if fields.get("description").is_some_and(|v| !v.is_string()) {
        report.push("description", "description must be a string");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "name": "Laptop Pro 14",
            "description": "refurbished",
            "price": 999.99,
            "category": ["electronics", "books"],
            "tags": ["computer"],
            "inStock": true
        })
    }

    fn errors_for(v: Value) -> Vec<String> {
        check_product(&v).into_errors()
    }

    #[test]
    fn complete_payload_passes() {
        assert!(check_product(&valid()).is_valid());
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let v = json!({"name": "Tea", "price": 0, "category": ["food"]});
        assert!(check_product(&v).is_valid());
    }

    #[test]
    fn non_object_body_is_a_single_violation() {
        assert_eq!(errors_for(json!([1, 2])), ["body must be a JSON object"]);
    }

    #[test]
    fn reports_name_price_and_category_together() {
        let errs = errors_for(json!({"name": "L", "price": -1, "category": ["toys"]}));
        assert_eq!(errs.len(), 3);
        assert!(errs[0].starts_with("name"));
        assert!(errs[1].starts_with("price"));
        assert!(errs[2].contains("electronics, books, clothes, food"));
    }

    #[test]
    fn name_bounds_are_inclusive_and_count_characters() {
        let mut v = valid();
        v["name"] = json!("ab");
        assert!(check_product(&v).is_valid());
        v["name"] = json!("x".repeat(40));
        assert!(check_product(&v).is_valid());
        v["name"] = json!("x".repeat(41));
        assert!(!check_product(&v).is_valid());
        v["name"] = json!("ñé");
        assert!(check_product(&v).is_valid());
        v["name"] = json!(12);
        assert_eq!(errors_for(v), ["name must be a string"]);
    }

    #[test]
    fn price_rules() {
        let mut v = valid();
        v["price"] = json!(0.1);
        assert!(check_product(&v).is_valid());
        v["price"] = json!(19.999);
        assert_eq!(errors_for(v.clone()), ["price must have at most two decimal places"]);
        v["price"] = json!(-0.005);
        assert_eq!(errors_for(v.clone()).len(), 2);
        v["price"] = json!("10");
        assert_eq!(errors_for(v.clone()), ["price must be a finite number"]);
        v.as_object_mut().unwrap().remove("price");
        assert_eq!(errors_for(v), ["price must be a finite number"]);
    }

    #[test]
    fn category_violations_collapse_into_one_message() {
        let mut v = valid();
        v["category"] = json!(["toys", 3, "garden"]);
        assert_eq!(errors_for(v.clone()).len(), 1);
        v["category"] = json!([]);
        assert_eq!(errors_for(v.clone()), ["category must be a non-empty array"]);
        v["category"] = json!("books");
        assert_eq!(errors_for(v), ["category must be a non-empty array"]);
    }

    #[test]
    fn optional_fields_are_checked_when_present() {
        let mut v = valid();
        v["tags"] = json!([]);
        v["inStock"] = json!("yes");
        v["description"] = json!(5);
        let errs = errors_for(v.clone());
        assert_eq!(
            errs,
            [
                "tags must be a non-empty array of strings",
                "inStock must be a boolean",
                "description must be a string",
            ]
        );

        v["tags"] = json!(["ok", 1]);
        v["inStock"] = Value::Null;
        v["description"] = json!("fine");
        assert_eq!(errors_for(v).len(), 2);
    }

    #[test]
    fn predicate_strategy_does_not_touch_payload() {
        let mut v = json!({"name": "Tea", "price": "5", "category": ["food"]});
        let before = v.clone();
        let report = ProductPredicate.validate(&mut v);
        assert!(!report.is_valid());
        assert_eq!(v, before);
    }
}
