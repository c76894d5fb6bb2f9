use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Top-level keys every recipe object must carry, in client order.
pub const RECIPE_KEYS: [&str; 8] = [
    "name",
    "description",
    "prepTimeMinutes",
    "cookTimeMinutes",
    "servings",
    "difficulty",
    "ingredients",
    "steps",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One entry of the `ingredients` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// How much of the recipe object is checked before it is returned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Only the presence of the eight top-level keys
    #[default]
    Lenient,
    /// Key presence plus value types, the difficulty enum and nested shapes
    Strict,
}

/// A field whose value does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub expected: &'static str,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (expected {})", self.field, self.expected)
    }
}

/// Outcome of checking a parsed object against the recipe schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReport {
    pub missing: Vec<String>,
    pub invalid: Vec<FieldViolation>,
}

impl SchemaReport {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }
}

/// Check a parsed model response against the recipe schema.
pub fn validate(object: &Map<String, Value>, mode: ValidationMode) -> SchemaReport {
    let missing = RECIPE_KEYS
        .iter()
        .filter(|key| !object.contains_key(**key))
        .map(|key| key.to_string())
        .collect();

    let invalid = match mode {
        ValidationMode::Lenient => Vec::new(),
        ValidationMode::Strict => check_value_shapes(object),
    };

    SchemaReport { missing, invalid }
}

fn check_value_shapes(object: &Map<String, Value>) -> Vec<FieldViolation> {
    let mut invalid = Vec::new();
    let mut check = |key: &str, ok: fn(&Value) -> bool, expected: &'static str| {
        if let Some(value) = object.get(key) {
            if !ok(value) {
                invalid.push(FieldViolation {
                    field: key.to_string(),
                    expected,
                });
            }
        }
    };

    check("name", Value::is_string, "string");
    check("description", Value::is_string, "string");
    check("prepTimeMinutes", is_count_or_null, "non-negative integer or null");
    check("cookTimeMinutes", is_count_or_null, "non-negative integer or null");
    check("servings", is_count_or_null, "non-negative integer or null");
    check(
        "difficulty",
        is_difficulty_or_null,
        "\"easy\", \"medium\", \"hard\" or null",
    );
    check("steps", is_string_list, "array of strings");

    if let Some(ingredients) = object.get("ingredients") {
        match ingredients.as_array() {
            Some(items) => {
                for (index, item) in items.iter().enumerate() {
                    if serde_json::from_value::<Ingredient>(item.clone()).is_err() {
                        invalid.push(FieldViolation {
                            field: format!("ingredients[{}]", index),
                            expected: "ingredient object with a string name",
                        });
                    }
                }
            }
            None => invalid.push(FieldViolation {
                field: "ingredients".to_string(),
                expected: "array of ingredient objects",
            }),
        }
    }

    invalid
}

fn is_count_or_null(value: &Value) -> bool {
    value.is_null() || value.is_u64()
}

fn is_difficulty_or_null(value: &Value) -> bool {
    value.is_null() || serde_json::from_value::<Difficulty>(value.clone()).is_ok()
}

fn is_string_list(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(Value::is_string))
}
