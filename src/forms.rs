//! Raw form input and the lenient numeric coercions applied before submit.
//!
//! Coercion never fails: input with no numeric prefix becomes `None`, which
//! serializes as JSON `null`.

use crate::models::{Credentials, ProfilePayload};
use std::collections::BTreeMap;

/// Values of named form fields as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    values: BTreeMap<String, String>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Missing fields read as empty, like an untouched input.
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn clear(&mut self, name: &str) {
        if let Some(value) = self.values.get_mut(name) {
            value.clear();
        }
    }
}

pub fn credentials(fields: &FormFields) -> Credentials {
    Credentials {
        email: fields.value("email").to_string(),
        password: fields.value("password").to_string(),
    }
}

pub fn profile_payload(user_id: i64, fields: &FormFields) -> ProfilePayload {
    ProfilePayload {
        user_id,
        age: parse_int(fields.value("age")),
        gender: fields.value("gender").to_string(),
        height_cm: parse_float(fields.value("height_cm")),
        weight_kg: parse_float(fields.value("weight_kg")),
        fitness_goal: fields.value("fitness_goal").to_string(),
        experience_level: fields.value("experience_level").to_string(),
        workout_days_per_week: parse_int(fields.value("workout_days")),
        workout_time_minutes: parse_int(fields.value("workout_time")),
        diet_type: fields.value("diet_type").to_string(),
        monthly_budget: parse_float(fields.value("monthly_budget")),
    }
}

/// Parses the leading integer of `input`, truncating anything after it.
pub fn parse_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let digits_start = usize::from(trimmed.starts_with(['+', '-']));
    let digits_len = trimmed[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    trimmed[..digits_start + digits_len].parse().ok()
}

/// Parses the longest leading decimal number of `input`, exponent included.
pub fn parse_float(input: &str) -> Option<f64> {
    let trimmed = input.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = usize::from(trimmed.starts_with(['+', '-']));
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut last_valid = None;

    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                last_valid = Some(end + 1);
            }
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = bytes[exp_end.min(bytes.len())..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            last_valid = Some(exp_end + exp_digits);
        }
    }

    last_valid.and_then(|end| trimmed[..end].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_int_truncates() {
        assert_eq!(parse_int("25"), Some(25));
        assert_eq!(parse_int(" 12.7"), Some(12));
        assert_eq!(parse_int("4days"), Some(4));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
    }

    #[test]
    fn parse_float_reads_prefix() {
        assert_eq!(parse_float("72.5"), Some(72.5));
        assert_eq!(parse_float("180cm"), Some(180.0));
        assert_eq!(parse_float(".5"), Some(0.5));
        assert_eq!(parse_float("3."), Some(3.0));
        assert_eq!(parse_float("1.2.3"), Some(1.2));
        assert_eq!(parse_float("n/a"), None);
        assert_eq!(parse_float("."), None);
    }

    #[test]
    fn parse_float_reads_exponent() {
        assert_eq!(parse_float("1e3"), Some(1000.0));
        assert_eq!(parse_float("2.5E-2kg"), Some(0.025));
        assert_eq!(parse_float("1e+2x"), Some(100.0));
        assert_eq!(parse_float("4e"), Some(4.0));
        assert_eq!(parse_float("4e-"), Some(4.0));
        assert_eq!(parse_float("e5"), None);
    }

    #[test]
    fn profile_payload_maps_form_fields() {
        let fields = FormFields::new()
            .with("age", "30")
            .with("gender", "female")
            .with("height_cm", "165.5")
            .with("weight_kg", "abc")
            .with("fitness_goal", "weight_loss")
            .with("experience_level", "beginner")
            .with("workout_days", "4")
            .with("workout_time", "45")
            .with("diet_type", "veg")
            .with("monthly_budget", "5000");

        let payload = profile_payload(7, &fields);
        assert_eq!(payload.user_id, 7);
        assert_eq!(payload.age, Some(30));
        assert_eq!(payload.height_cm, Some(165.5));
        assert_eq!(payload.weight_kg, None);
        assert_eq!(payload.workout_days_per_week, Some(4));
        assert_eq!(payload.workout_time_minutes, Some(45));
        assert_eq!(payload.monthly_budget, Some(5000.0));

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["weight_kg"].is_null());
        assert_eq!(json["fitness_goal"], "weight_loss");
    }
}
