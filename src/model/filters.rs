//! Pagination and sort parameters for list queries, and the page metadata
//! derived from a total record count.

use crate::validator::{out, Validator};
use serde::Serialize;

pub const MAX_PAGE: i64 = 10_000_000;
pub const MAX_PAGE_SIZE: i64 = 50;

/// Columns a list may be ordered by. Only these names ever reach ORDER BY.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Title,
    Year,
    Runtime,
}

impl SortColumn {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "id" => Some(SortColumn::Id),
            "title" => Some(SortColumn::Title),
            "year" => Some(SortColumn::Year),
            "runtime" => Some(SortColumn::Runtime),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Title => "title",
            SortColumn::Year => "year",
            SortColumn::Runtime => "runtime",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    pub sort: String,
    pub sort_safelist: Vec<String>,
    pub order: String,
}

impl Filters {
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// Pages are 1-indexed.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }

    /// Sort column, provided it is both safelisted and a known column.
    /// Falls back to `id` otherwise; callers validate first.
    pub fn sort_column(&self) -> SortColumn {
        if out(&self.sort, &self.sort_safelist) {
            return SortColumn::Id;
        }
        SortColumn::parse(&self.sort).unwrap_or(SortColumn::Id)
    }

    pub fn sort_direction(&self) -> SortOrder {
        if self.order == "desc" {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

pub fn validate_filters(v: &mut Validator, f: &Filters) {
    v.check(f.page < 1, "page", "must be greater than zero");
    v.check(f.page > MAX_PAGE, "page", "must be a maximum of 10 million");
    v.check(f.page_size < 1, "page_size", "must be greater than zero");
    v.check(f.page_size > MAX_PAGE_SIZE, "page_size", "must be a maximum of 50");
    v.check(out(&f.order, &["asc", "desc"]), "order", "invalid order value");
    v.check(out(&f.sort, &f.sort_safelist), "sort", "invalid sort value");
}

/// Zero fields are omitted, so an empty result set serializes as `{}`.
#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(skip_serializing_if = "is_zero")]
    pub current_page: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub page_size: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub first_page: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub last_page: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub total_records: i64,
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

pub fn calculate_metadata(total_records: i64, page: i64, page_size: i64) -> Metadata {
    if total_records == 0 || page_size < 1 {
        return Metadata::default();
    }
    Metadata {
        current_page: page,
        page_size,
        first_page: 1,
        last_page: (total_records + page_size - 1) / page_size,
        total_records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(page: i64, page_size: i64, sort: &str, order: &str) -> Filters {
        Filters {
            page,
            page_size,
            sort: sort.into(),
            sort_safelist: vec!["id".into(), "title".into(), "year".into(), "runtime".into()],
            order: order.into(),
        }
    }

    #[test]
    fn limit_and_offset_follow_page_size() {
        for page_size in 1..=MAX_PAGE_SIZE {
            for page in [1, 2, 7, 1000] {
                let f = filters(page, page_size, "id", "asc");
                assert_eq!(f.limit(), page_size);
                assert_eq!(f.offset(), (page - 1) * page_size);
            }
        }
    }

    #[test]
    fn metadata_for_empty_result_is_zero() {
        assert_eq!(calculate_metadata(0, 3, 20), Metadata::default());
        assert_eq!(serde_json::to_value(Metadata::default()).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn metadata_rounds_last_page_up() {
        assert_eq!(
            calculate_metadata(101, 2, 20),
            Metadata {
                current_page: 2,
                page_size: 20,
                first_page: 1,
                last_page: 6,
                total_records: 101,
            }
        );
        assert_eq!(calculate_metadata(100, 1, 20).last_page, 5);
        assert_eq!(calculate_metadata(1, 1, 50).last_page, 1);
    }

    #[test]
    fn metadata_serializes_camel_case() {
        let json = serde_json::to_value(calculate_metadata(3, 1, 2)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "currentPage": 1,
                "pageSize": 2,
                "firstPage": 1,
                "lastPage": 2,
                "totalRecords": 3
            })
        );
    }

    #[test]
    fn all_filter_violations_reported() {
        let mut v = Validator::new();
        validate_filters(&mut v, &filters(0, 51, "budget", "sideways"));
        let errors = v.into_errors();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors["page"], "must be greater than zero");
        assert_eq!(errors["page_size"], "must be a maximum of 50");
        assert_eq!(errors["sort"], "invalid sort value");
        assert_eq!(errors["order"], "invalid order value");
    }

    #[test]
    fn page_bounds() {
        let mut v = Validator::new();
        validate_filters(&mut v, &filters(MAX_PAGE + 1, 0, "id", "asc"));
        assert_eq!(v.errors()["page"], "must be a maximum of 10 million");
        assert_eq!(v.errors()["page_size"], "must be greater than zero");

        let mut v = Validator::new();
        validate_filters(&mut v, &filters(MAX_PAGE, MAX_PAGE_SIZE, "year", "desc"));
        assert!(v.valid());
    }

    #[test]
    fn sort_column_only_from_safelist() {
        let f = filters(1, 20, "year", "desc");
        assert_eq!(f.sort_column(), SortColumn::Year);
        assert_eq!(f.sort_direction(), SortOrder::Desc);

        let mut f = filters(1, 20, "runtime", "asc");
        f.sort_safelist = vec!["id".into()];
        assert_eq!(f.sort_column(), SortColumn::Id);
        assert_eq!(f.sort_direction(), SortOrder::Asc);
    }
}
