//! String-keyed validation rules (`"required|email|max_length:50"`), additive to the
//! derive-based [`validator::Validate`] path in [`super::json_data`]. Both read from the
//! same decoded body; this engine is for handlers that want field rules expressed as data
//! rather than derive attributes.

use crate::error::FieldErrors;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rule {
    Required,
    Email,
    Numeric,
    MinLength(usize),
    MaxLength(usize),
}

impl Rule {
    fn parse(token: &str) -> Option<Self> {
        let (name, arg) = match token.split_once(':') {
            Some((n, a)) => (n, Some(a)),
            None => (token, None),
        };
        match name {
            "required" => Some(Rule::Required),
            "email" => Some(Rule::Email),
            "numeric" => Some(Rule::Numeric),
            "min_length" => arg.and_then(|a| a.parse().ok()).map(Rule::MinLength),
            "max_length" => arg.and_then(|a| a.parse().ok()).map(Rule::MaxLength),
            _ => None,
        }
    }

    /// Checks `value`; returns the failure message for this rule if it doesn't hold.
    ///
    /// Every rule but `Required` treats an absent/empty value as passing — a field that
    /// must also be present declares `required` explicitly, same as Laravel-style rule
    /// strings this engine's syntax is modeled on.
    fn check(&self, value: Option<&Value>) -> Result<(), String> {
        match self {
            Rule::Required => {
                if is_present(value) {
                    Ok(())
                } else {
                    Err("is required".to_string())
                }
            }
            Rule::Email => match value_as_str(value) {
                Some(s) if is_email(&s) || s.is_empty() => Ok(()),
                Some(_) => Err("must be a valid email".to_string()),
                None => Ok(()),
            },
            Rule::Numeric => match value_as_str(value) {
                Some(s) if s.is_empty() || s.parse::<f64>().is_ok() => Ok(()),
                Some(_) => Err("must be numeric".to_string()),
                None => Ok(()),
            },
            Rule::MinLength(n) => match value_as_str(value) {
                Some(s) if s.chars().count() >= *n => Ok(()),
                Some(_) => Err(format!("must be at least {n} characters")),
                None => Ok(()),
            },
            Rule::MaxLength(n) => match value_as_str(value) {
                Some(s) if s.chars().count() <= *n => Ok(()),
                Some(_) => Err(format!("must be at most {n} characters")),
                None => Ok(()),
            },
        }
    }
}

fn is_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

fn value_as_str(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    }
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        _ => true,
    }
}

/// One field's parsed rule list, e.g. `("email", "required|email")`.
#[derive(Debug, Clone)]
pub struct FieldRules {
    field: String,
    rules: Vec<Rule>,
    bail: bool,
}

impl FieldRules {
    /// Parses a pipe-separated rule string for `field`. Unknown rule names are skipped
    /// rather than rejected, so adding a new rule keyword is never a breaking change for
    /// callers who already pass one through.
    pub fn parse(field: impl Into<String>, spec: &str) -> Self {
        let mut bail = false;
        let mut rules = Vec::new();
        for token in spec.split('|').map(str::trim).filter(|s| !s.is_empty()) {
            if token == "bail" {
                bail = true;
                continue;
            }
            if let Some(rule) = Rule::parse(token) {
                rules.push(rule);
            }
        }
        Self { field: field.into(), rules, bail }
    }
}

/// Types that declare string-keyed field rules for [`validate_rules`].
///
/// Implemented by hand (or by a future derive) on request bodies that want
/// `"required|email|max_length:50"`-style validation instead of, or alongside,
/// `#[derive(Validate)]` attributes.
pub trait HasFieldRules {
    /// Returns this type's field rules as `(field_name, rule_spec)` pairs.
    fn field_rules() -> Vec<(&'static str, &'static str)>;
}

/// Parses `specs` (`(field, rule_string)` pairs, the shape [`HasFieldRules::field_rules`]
/// returns) and runs them against `fields` in one call.
pub fn validate_field_specs(
    fields: &serde_json::Map<String, Value>,
    specs: &[(&str, &str)],
) -> Result<(), FieldErrors> {
    let rule_sets: Vec<FieldRules> = specs
        .iter()
        .map(|(field, spec)| FieldRules::parse(*field, spec))
        .collect();
    validate_rule_sets(fields, &rule_sets)
}

/// Runs parsed [`FieldRules`] against `fields`, collecting failures into a [`FieldErrors`].
pub fn validate_rule_sets(
    fields: &serde_json::Map<String, Value>,
    rule_sets: &[FieldRules],
) -> Result<(), FieldErrors> {
    let mut errors = std::collections::BTreeMap::new();
    for rule_set in rule_sets {
        let value = fields.get(&rule_set.field);
        let mut messages = Vec::new();
        for rule in &rule_set.rules {
            if let Err(msg) = rule.check(value) {
                messages.push(format!("{} {}", rule_set.field, msg));
                if rule_set.bail {
                    break;
                }
            }
        }
        if !messages.is_empty() {
            errors.insert(rule_set.field.clone(), messages);
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(FieldErrors(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> serde_json::Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn required_rejects_missing_and_empty_fields() {
        let data = fields(json!({ "name": "" }));
        let rules = vec![FieldRules::parse("name", "required"), FieldRules::parse("age", "required")];
        let err = validate_rule_sets(&data, &rules).unwrap_err();
        assert!(err.0.contains_key("name"));
        assert!(err.0.contains_key("age"));
    }

    #[test]
    fn email_rule_rejects_malformed_addresses() {
        let data = fields(json!({ "email": "not-an-email" }));
        let rules = vec![FieldRules::parse("email", "required|email")];
        let err = validate_rule_sets(&data, &rules).unwrap_err();
        assert_eq!(err.0["email"], vec!["email must be a valid email".to_string()]);
    }

    #[test]
    fn valid_fields_produce_no_errors() {
        let data = fields(json!({ "email": "a@b.com", "name": "Alice" }));
        let rules = vec![
            FieldRules::parse("email", "required|email"),
            FieldRules::parse("name", "required|max_length:50"),
        ];
        assert!(validate_rule_sets(&data, &rules).is_ok());
    }

    #[test]
    fn max_length_is_enforced() {
        let data = fields(json!({ "name": "this name is far too long" }));
        let rules = vec![FieldRules::parse("name", "max_length:5")];
        let err = validate_rule_sets(&data, &rules).unwrap_err();
        assert_eq!(err.0["name"], vec!["name must be at most 5 characters".to_string()]);
    }

    #[test]
    fn bail_stops_at_the_first_failing_rule_for_that_field() {
        let data = fields(json!({ "name": "" }));
        let rules = vec![FieldRules::parse("name", "required|max_length:3|bail")];
        let err = validate_rule_sets(&data, &rules).unwrap_err();
        assert_eq!(err.0["name"].len(), 1);
        assert_eq!(err.0["name"][0], "name is required");
    }

    #[test]
    fn without_bail_every_failing_rule_for_a_field_is_reported() {
        let data = fields(json!({ "name": "toolong" }));
        let rules = vec![FieldRules::parse("name", "numeric|max_length:3")];
        let err = validate_rule_sets(&data, &rules).unwrap_err();
        assert_eq!(err.0["name"].len(), 2);
    }
}
