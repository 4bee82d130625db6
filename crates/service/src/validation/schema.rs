use serde_json::{Number, Value};

use super::{PayloadValidator, ValidationReport, BODY_FIELD};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Boolean,
    StringArray,
}

impl FieldType {
    fn describe(self) -> &'static str {
        match self {
            FieldType::String => "a string",
            FieldType::Number => "a number",
            FieldType::Boolean => "a boolean",
            FieldType::StringArray => "an array of strings",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Number => value.is_number(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::StringArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }

    /// Scalar coercion in the spirit of an OpenAPI validator running with
    /// `coerceTypes` on. Values that cannot be coerced are left as they are.
    fn coerce(self, value: &mut Value) {
        let coerced = match (self, &*value) {
            (FieldType::Number, Value::String(s)) => {
                let s = s.trim();
                s.parse::<i64>()
                    .map(Value::from)
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number))
            }
            (FieldType::Number, Value::Bool(b)) => Some(Value::from(u8::from(*b))),
            (FieldType::Boolean, Value::String(s)) => match s.as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            (FieldType::String, Value::Number(n)) => Some(Value::String(n.to_string())),
            (FieldType::String, Value::Bool(b)) => Some(Value::String(b.to_string())),
            _ => None,
        };
        if let Some(v) = coerced {
            *value = v;
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: &'static str,
    pub ty: FieldType,
    pub required: bool,
}

impl FieldSchema {
    pub const fn required(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty, required: true }
    }

    pub const fn optional(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty, required: false }
    }
}

/// Declarative shape of a JSON request body.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    pub title: &'static str,
    pub fields: Vec<FieldSchema>,
}

/// Request body for `POST /users` and `POST /users/{id}`.
pub fn user_schema() -> ObjectSchema {
    ObjectSchema {
        title: "UserInput",
        fields: vec![
            FieldSchema::required("name", FieldType::String),
            FieldSchema::required("age", FieldType::Number),
            FieldSchema::required("email", FieldType::String),
        ],
    }
}

/// Structural shape of a product replace body. Value rules (length, cents,
/// allowed categories) belong to the product predicate.
pub fn product_schema() -> ObjectSchema {
    ObjectSchema {
        title: "ProductInput",
        fields: vec![
            FieldSchema::required("name", FieldType::String),
            FieldSchema::optional("description", FieldType::String),
            FieldSchema::required("price", FieldType::Number),
            FieldSchema::required("category", FieldType::StringArray),
            FieldSchema::optional("tags", FieldType::StringArray),
            FieldSchema::optional("inStock", FieldType::Boolean),
        ],
    }
}

/// Checks a body against an [`ObjectSchema`], coercing scalar fields first.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    schema: ObjectSchema,
}

impl SchemaValidator {
    pub fn new(schema: ObjectSchema) -> Self {
        Self { schema }
    }
}

impl PayloadValidator for SchemaValidator {
    fn name(&self) -> &'static str {
        "schema"
    }

    fn validate(&self, payload: &mut Value) -> ValidationReport {
        let mut report = ValidationReport::new();
        let Some(fields) = payload.as_object_mut() else {
            report.push(BODY_FIELD, format!("request body must be an object ({})", self.schema.title));
            return report;
        };

        for field in &self.schema.fields {
            match fields.get_mut(field.name) {
                None if field.required => {
                    report.push(field.name, format!("must have required property '{}'", field.name));
                }
                None => {}
                Some(value) => {
                    field.ty.coerce(value);
                    if !field.ty.matches(value) {
                        report.push(field.name, format!("{} must be {}", field.name, field.ty.describe()));
                    }
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_body_passes_as_is() {
        let v = SchemaValidator::new(user_schema());
        let mut body = json!({"name": "Ann", "age": 30, "email": "a@x.com"});
        assert!(v.validate(&mut body).is_valid());
        assert_eq!(body["age"], 30);
    }

    #[test]
    fn missing_properties_are_all_reported() {
        let v = SchemaValidator::new(user_schema());
        let mut body = json!({"name": "Ann"});
        let report = v.validate(&mut body);
        assert_eq!(
            report.errors(),
            [
                "must have required property 'age'",
                "must have required property 'email'",
            ]
        );
    }

    #[test]
    fn numeric_strings_are_coerced_in_place() {
        let v = SchemaValidator::new(user_schema());
        let mut body = json!({"name": "Ann", "age": " 30 ", "email": "a@x.com"});
        assert!(v.validate(&mut body).is_valid());
        assert_eq!(body["age"], 30);
        assert!(body["age"].is_i64());

        let mut body = json!({"name": "Ann", "age": "30.5", "email": "a@x.com"});
        assert!(v.validate(&mut body).is_valid());
        assert_eq!(body["age"].as_f64(), Some(30.5));
    }

    #[test]
    fn uncoercible_values_fail_with_the_expected_type() {
        let v = SchemaValidator::new(user_schema());
        let mut body = json!({"name": ["Ann"], "age": "thirty", "email": null});
        let report = v.validate(&mut body);
        assert_eq!(
            report.errors(),
            ["name must be a string", "age must be a number", "email must be a string"]
        );
        assert_eq!(body["age"], "thirty");
    }

    #[test]
    fn scalars_coerce_to_string_and_boolean() {
        let v = SchemaValidator::new(product_schema());
        let mut body = json!({
            "name": 12345,
            "price": "10.5",
            "category": ["food"],
            "inStock": "false"
        });
        assert!(v.validate(&mut body).is_valid());
        assert_eq!(body["name"], "12345");
        assert_eq!(body["price"].as_f64(), Some(10.5));
        assert_eq!(body["inStock"], false);
    }

    #[test]
    fn product_schema_checks_array_items() {
        let v = SchemaValidator::new(product_schema());
        let mut body = json!({"name": "Tea", "price": 1, "category": ["food", 2], "tags": "x"});
        let report = v.validate(&mut body);
        assert_eq!(
            report.errors(),
            ["category must be an array of strings", "tags must be an array of strings"]
        );
    }

    #[test]
    fn non_object_body_is_rejected() {
        let v = SchemaValidator::new(user_schema());
        let mut body = json!("Ann");
        let report = v.validate(&mut body);
        assert_eq!(report.errors(), ["request body must be an object (UserInput)"]);
    }
}
