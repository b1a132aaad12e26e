//! Declarative required-field validation for carrier value objects.
//!
//! A [`Schema`] names the object it describes and a [`Rule`]:
//! either "the object carries every field of at least one of these sets"
//! or "every item of the list carries these fields".

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Object must contain all fields of at least one set.
    OneOf(&'static [&'static [&'static str]]),
    /// Each list item must be an object containing all of these fields.
    Items(&'static [&'static str]),
    /// Any JSON object.
    AnyObject,
}

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub name: &'static str,
    pub rule: Rule,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{object}: expected a JSON object")]
    NotAnObject { object: &'static str },

    #[error("{object}: expected a JSON array")]
    NotAnArray { object: &'static str },

    #[error("{object}: no accepted field set is complete (tried {})", describe_sets(.tried))]
    NoMatchingFieldSet {
        object: &'static str,
        tried: Vec<Vec<&'static str>>,
    },

    #[error("{object}[{index}]: expected a JSON object")]
    ItemNotAnObject { object: &'static str, index: usize },

    #[error("{object}[{index}]: missing required field '{field}'")]
    MissingItemField {
        object: &'static str,
        index: usize,
        field: &'static str,
    },
}

fn describe_sets(sets: &[Vec<&'static str>]) -> String {
    sets.iter()
        .map(|set| format!("[{}]", set.join(", ")))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn has_all(map: &Map<String, Value>, fields: &[&str]) -> bool {
    fields.iter().all(|field| map.contains_key(*field))
}

impl Schema {
    pub const fn one_of(name: &'static str, sets: &'static [&'static [&'static str]]) -> Self {
        Self {
            name,
            rule: Rule::OneOf(sets),
        }
    }

    pub const fn items(name: &'static str, required: &'static [&'static str]) -> Self {
        Self {
            name,
            rule: Rule::Items(required),
        }
    }

    pub const fn any_object(name: &'static str) -> Self {
        Self {
            name,
            rule: Rule::AnyObject,
        }
    }

    /// Validate a single value against this schema.
    ///
    /// `Items` schemas expect a JSON array.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        match self.rule {
            Rule::Items(_) => match value {
                Value::Array(items) => self.validate_items(items),
                _ => Err(ValidationError::NotAnArray { object: self.name }),
            },
            Rule::AnyObject => value
                .as_object()
                .map(|_| ())
                .ok_or(ValidationError::NotAnObject { object: self.name }),
            Rule::OneOf(sets) => {
                let map = value
                    .as_object()
                    .ok_or(ValidationError::NotAnObject { object: self.name })?;
                if sets.iter().any(|set| has_all(map, set)) {
                    Ok(())
                } else {
                    Err(ValidationError::NoMatchingFieldSet {
                        object: self.name,
                        tried: sets.iter().map(|set| set.to_vec()).collect(),
                    })
                }
            }
        }
    }

    /// Validate a list of items. Non-`Items` schemas are applied to every item.
    pub fn validate_items(&self, items: &[Value]) -> Result<(), ValidationError> {
        let Rule::Items(required) = self.rule else {
            return items.iter().try_for_each(|item| self.validate(item));
        };

        for (index, item) in items.iter().enumerate() {
            let map = item.as_object().ok_or(ValidationError::ItemNotAnObject {
                object: self.name,
                index,
            })?;
            if let Some(field) = required.iter().find(|field| !map.contains_key(**field)) {
                return Err(ValidationError::MissingItemField {
                    object: self.name,
                    index,
                    field: *field,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PARTY: Schema = Schema::one_of("Party", &[&["name", "city"], &["quickId"]]);
    const ITEMS: Schema = Schema::items("Items", &["copies", "weight"]);

    #[test]
    fn test_one_of_accepts_any_complete_set() {
        assert!(PARTY.validate(&json!({"name": "A", "city": "B"})).is_ok());
        assert!(PARTY.validate(&json!({"quickId": "1"})).is_ok());
        assert!(PARTY.validate(&json!({"quickId": "1", "name": "A"})).is_ok());
    }

    #[test]
    fn test_one_of_reports_tried_sets() {
        let err = PARTY.validate(&json!({"name": "A"})).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NoMatchingFieldSet {
                object: "Party",
                tried: vec![vec!["name", "city"], vec!["quickId"]],
            }
        );
        assert_eq!(
            err.to_string(),
            "Party: no accepted field set is complete (tried [name, city] | [quickId])"
        );
    }

    #[test]
    fn test_one_of_rejects_non_objects() {
        assert_eq!(
            PARTY.validate(&json!("quickId")).unwrap_err(),
            ValidationError::NotAnObject { object: "Party" }
        );
    }

    #[test]
    fn test_items_missing_field_names_index() {
        let items = vec![json!({"copies": 1, "weight": 2.0}), json!({"copies": 1})];
        assert_eq!(
            ITEMS.validate_items(&items).unwrap_err(),
            ValidationError::MissingItemField {
                object: "Items",
                index: 1,
                field: "weight",
            }
        );
    }

    #[test]
    fn test_items_rejects_scalar_item() {
        let items = vec![json!(3)];
        assert_eq!(
            ITEMS.validate_items(&items).unwrap_err(),
            ValidationError::ItemNotAnObject {
                object: "Items",
                index: 0
            }
        );
    }

    #[test]
    fn test_items_via_validate_requires_array() {
        assert!(ITEMS.validate(&json!([])).is_ok());
        assert_eq!(
            ITEMS.validate(&json!({"copies": 1})).unwrap_err(),
            ValidationError::NotAnArray { object: "Items" }
        );
    }

    #[test]
    fn test_null_value_counts_as_present() {
        assert!(PARTY.validate(&json!({"quickId": null})).is_ok());
    }
}
