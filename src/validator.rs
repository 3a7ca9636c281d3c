//! Field-level validation: collects every failure instead of stopping at the first.

use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

pub static EMAIL_RX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

/// Request-scoped accumulator of `field -> message`. One message per field;
/// the last recorded message wins.
#[derive(Debug, Default)]
pub struct Validator {
    errors: BTreeMap<String, String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, key: &str, message: &str) {
        self.errors.insert(key.to_string(), message.to_string());
    }

    /// Records `message` under `key` when `is_error` holds.
    pub fn check(&mut self, is_error: bool, key: &str, message: &str) {
        if is_error {
            self.add_error(key, message);
        }
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn into_errors(self) -> BTreeMap<String, String> {
        self.errors
    }
}

/// True when `value` is NOT one of `list`.
pub fn out<S: AsRef<str>>(value: &str, list: &[S]) -> bool {
    !list.iter().any(|item| item.as_ref() == value)
}

pub fn matches(value: &str, rx: &Regex) -> bool {
    rx.is_match(value)
}

pub fn unmatches(value: &str, rx: &Regex) -> bool {
    !rx.is_match(value)
}

pub fn has_duplicate<S: AsRef<str>>(values: &[S]) -> bool {
    let unique: HashSet<&str> = values.iter().map(AsRef::as_ref).collect();
    unique.len() != values.len()
}
