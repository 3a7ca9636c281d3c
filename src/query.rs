//! Query-string readers for list endpoints. Parse failures go to the validator, not the caller.

use crate::validator::Validator;
use std::collections::HashMap;

pub type QueryParams = HashMap<String, String>;

pub fn read_string(params: &QueryParams, key: &str, default: &str) -> String {
    match params.get(key) {
        Some(s) if !s.is_empty() => s.clone(),
        _ => default.to_string(),
    }
}

/// Comma-separated list; empty entries are dropped.
pub fn read_csv(params: &QueryParams, key: &str) -> Vec<String> {
    params
        .get(key)
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

pub fn read_int(params: &QueryParams, key: &str, default: i64, v: &mut Validator) -> i64 {
    match params.get(key) {
        None => default,
        Some(s) if s.is_empty() => default,
        Some(s) => match s.parse() {
            Ok(n) => n,
            Err(_) => {
                v.add_error(key, "must be an integer value");
                default
            }
        },
    }
}

/// `sort=-year` means `sort=year&order=desc`; otherwise `order` (default `asc`) applies.
pub fn read_sort(params: &QueryParams, default_sort: &str) -> (String, String) {
    let sort = read_string(params, "sort", default_sort);
    match sort.strip_prefix('-') {
        Some(column) => (column.to_string(), "desc".to_string()),
        None => (sort, read_string(params, "order", "asc")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn csv_splits_and_trims() {
        let p = params(&[("genres", "drama, war,,romance")]);
        assert_eq!(read_csv(&p, "genres"), vec!["drama", "war", "romance"]);
        assert!(read_csv(&p, "missing").is_empty());
    }

    #[test]
    fn bad_int_records_error_and_uses_default() {
        let p = params(&[("page", "two"), ("page_size", "10")]);
        let mut v = Validator::new();
        assert_eq!(read_int(&p, "page", 1, &mut v), 1);
        assert_eq!(read_int(&p, "page_size", 20, &mut v), 10);
        assert_eq!(v.errors()["page"], "must be an integer value");
        assert_eq!(v.errors().len(), 1);
    }

    #[test]
    fn sort_prefix_sets_descending() {
        assert_eq!(read_sort(&params(&[("sort", "-year")]), "id"), ("year".into(), "desc".into()));
        assert_eq!(
            read_sort(&params(&[("sort", "title"), ("order", "desc")]), "id"),
            ("title".into(), "desc".into())
        );
        assert_eq!(read_sort(&params(&[]), "id"), ("id".into(), "asc".into()));
    }
}
