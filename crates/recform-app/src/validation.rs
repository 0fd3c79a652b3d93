//! Field validation
//!
//! Pure function over the schema and current values. Runs synchronously at
//! submit time (authoritative) and optionally on field change.

use recform_core::FieldMap;

use crate::form::FieldSpec;

/// Compute validation messages for `fields`.
///
/// Each field reports at most one message: the first rule it violates. A
/// declared field missing from `fields` is validated as `""`. Returned
/// messages follow declared field order; an empty map means valid.
pub fn validate(schema: &[FieldSpec], fields: &FieldMap) -> FieldMap {
    let mut errors = FieldMap::new();
    for spec in schema {
        let value = fields.get(&spec.name).unwrap_or_default();
        if let Some(message) = spec.rules.iter().find_map(|rule| rule.check(value)) {
            errors.set(spec.name.as_str(), message);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{default_schema, NAME_REQUIRED_MESSAGE};

    fn fields(name: &str) -> FieldMap {
        [("name", name)].into_iter().collect()
    }

    #[test]
    fn test_blank_names_are_rejected() {
        for blank in ["", " ", "\t\n", "     "] {
            let errors = validate(&default_schema(), &fields(blank));
            assert_eq!(errors.get("name"), Some(NAME_REQUIRED_MESSAGE), "{blank:?}");
        }
    }

    #[test]
    fn test_non_blank_name_is_valid() {
        assert!(validate(&default_schema(), &fields("Widget")).is_empty());
        assert!(validate(&default_schema(), &fields("  x  ")).is_empty());
    }

    #[test]
    fn test_missing_field_counts_as_empty() {
        let errors = validate(&default_schema(), &FieldMap::new());
        assert_eq!(errors.get("name"), Some(NAME_REQUIRED_MESSAGE));
    }

    #[test]
    fn test_errors_follow_declared_order() {
        let schema = vec![
            FieldSpec::text("title").required("Please enter a title"),
            FieldSpec::text("notes"),
            FieldSpec::text("name").required(NAME_REQUIRED_MESSAGE),
        ];

        let errors = validate(&schema, &FieldMap::new());

        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["title", "name"]);
    }
}
