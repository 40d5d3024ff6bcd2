//! Listing filters for the seller's product management page.

use chrono::NaiveDate;
use serde::Deserialize;

use super::domain::{parse_flag, ProductSummary};
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Independent, optional equality filters. Unset filters match everything;
/// set filters are combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub is_sell: Option<bool>,
    pub is_discount: Option<bool>,
    pub is_display: Option<bool>,
    pub name: Option<String>,
    pub code_number: Option<String>,
    pub product_number: Option<String>,
    pub brand: Option<String>,
    /// inclusive, compared against the registration date
    pub start_date: Option<NaiveDate>,
    /// inclusive
    pub end_date: Option<NaiveDate>,
}

fn eq_opt<T: PartialEq + ?Sized>(want: Option<&T>, got: &T) -> bool {
    want.map_or(true, |w| w == got)
}

impl ProductFilter {
    pub fn matches(&self, p: &ProductSummary) -> bool {
        let created = p.created_at.date_naive();
        eq_opt(self.is_sell.as_ref(), &p.is_sell)
            && eq_opt(self.is_discount.as_ref(), &p.is_discount)
            && eq_opt(self.is_display.as_ref(), &p.is_display)
            && eq_opt(self.name.as_deref(), p.name.as_str())
            && eq_opt(self.code_number.as_deref(), p.code_number.as_str())
            && eq_opt(self.product_number.as_deref(), p.product_number.as_str())
            && eq_opt(self.brand.as_deref(), p.brand.as_str())
            && self.start_date.map_or(true, |d| created >= d)
            && self.end_date.map_or(true, |d| created <= d)
    }

    /// Keep only matching entries, preserving order.
    pub fn apply(&self, items: Vec<ProductSummary>) -> Vec<ProductSummary> {
        items.into_iter().filter(|p| self.matches(p)).collect()
    }
}

/// Raw query string of `GET /product/management`.
///
/// Everything arrives as text; [`ProductListQuery::into_parts`] does the
/// parsing so malformed values become validation errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductListQuery {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
    pub is_sell: Option<String>,
    pub is_discount: Option<String>,
    pub is_display: Option<String>,
    pub name: Option<String>,
    #[serde(alias = "code")]
    pub code_number: Option<String>,
    #[serde(alias = "number")]
    pub product_number: Option<String>,
    pub brand: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn flag_param(key: &str, raw: Option<String>) -> Result<Option<bool>, ServiceError> {
    raw.map(|v| parse_flag(&v).ok_or_else(|| ServiceError::Validation(format!("{key} must be 0 or 1"))))
        .transpose()
}

fn date_param(key: &str, raw: Option<String>) -> Result<Option<NaiveDate>, ServiceError> {
    raw.map(|v| {
        NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d")
            .map_err(|_| ServiceError::Validation(format!("{key} must be formatted as YYYY-MM-DD")))
    })
    .transpose()
}

impl ProductListQuery {
    pub fn into_parts(self) -> Result<(ProductFilter, Pagination), ServiceError> {
        let filter = ProductFilter {
            is_sell: flag_param("is_sell", self.is_sell)?,
            is_discount: flag_param("is_discount", self.is_discount)?,
            is_display: flag_param("is_display", self.is_display)?,
            name: self.name,
            code_number: self.code_number,
            product_number: self.product_number,
            brand: self.brand,
            start_date: date_param("start_date", self.start_date)?,
            end_date: date_param("end_date", self.end_date)?,
        };
        if let (Some(s), Some(e)) = (filter.start_date, filter.end_date) {
            if e < s {
                return Err(ServiceError::Validation("end_date precedes start_date".into()));
            }
        }
        Ok((filter, Pagination::new(self.offset, self.limit)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};
    use uuid::Uuid;

    fn at(ts: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(ts).unwrap()
    }

    fn summary(i: usize) -> ProductSummary {
        ProductSummary {
            id: Uuid::new_v4(),
            name: format!("item-{}", i % 4),
            code_number: format!("P{i:012}"),
            product_number: format!("N-{}", i % 3),
            main_image: "https://img/x.jpg".into(),
            brand: if i % 5 == 0 { "Five".into() } else { "Other".into() },
            price: 1000,
            discount_rate: 0,
            discounted_price: 1000,
            is_sell: i % 2 == 0,
            is_discount: i % 3 == 0,
            is_display: i % 7 != 0,
            created_at: at(&format!("2024-03-{:02}T12:00:00+09:00", 1 + i % 28)),
        }
    }

    fn catalog() -> Vec<ProductSummary> { (0..60).map(summary).collect() }

    #[test]
    fn empty_filter_matches_all() {
        assert_eq!(ProductFilter::default().apply(catalog()).len(), 60);
    }

    #[test]
    fn each_filter_narrows_to_exact_matches() {
        let all = catalog();
        let cases: Vec<(ProductFilter, Box<dyn Fn(&ProductSummary) -> bool>)> = vec![
            (ProductFilter { is_sell: Some(true), ..Default::default() }, Box::new(|p: &ProductSummary| p.is_sell)),
            (ProductFilter { is_discount: Some(false), ..Default::default() }, Box::new(|p: &ProductSummary| !p.is_discount)),
            (ProductFilter { is_display: Some(false), ..Default::default() }, Box::new(|p: &ProductSummary| !p.is_display)),
            (ProductFilter { name: Some("item-2".into()), ..Default::default() }, Box::new(|p: &ProductSummary| p.name == "item-2")),
            (ProductFilter { code_number: Some("P000000000007".into()), ..Default::default() }, Box::new(|p: &ProductSummary| p.code_number == "P000000000007")),
            (ProductFilter { product_number: Some("N-1".into()), ..Default::default() }, Box::new(|p: &ProductSummary| p.product_number == "N-1")),
            (ProductFilter { brand: Some("Five".into()), ..Default::default() }, Box::new(|p: &ProductSummary| p.brand == "Five")),
        ];
        for (filter, pred) in cases {
            let got = filter.apply(all.clone());
            let want: Vec<_> = all.iter().filter(|p| pred(p)).cloned().collect();
            assert!(!want.is_empty(), "{filter:?} should match something");
            assert_eq!(got, want, "{filter:?}");
        }
    }

    #[test]
    fn filters_combine_with_and() {
        let filter = ProductFilter { is_sell: Some(true), is_discount: Some(true), ..Default::default() };
        let got = filter.apply(catalog());
        assert!(got.iter().all(|p| p.is_sell && p.is_discount));
        assert_eq!(got.len(), 10);
    }

    #[test]
    fn date_range_is_inclusive() {
        let filter = ProductFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 3, 2),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 3),
            ..Default::default()
        };
        let got = filter.apply(catalog());
        assert!(!got.is_empty());
        assert!(got.iter().all(|p| {
            let d = p.created_at.date_naive();
            d >= NaiveDate::from_ymd_opt(2024, 3, 2).unwrap() && d <= NaiveDate::from_ymd_opt(2024, 3, 3).unwrap()
        }));
    }

    #[test]
    fn query_parses_flags_aliases_and_paging() {
        let q = ProductListQuery {
            offset: Some(20),
            is_sell: Some("1".into()),
            is_display: Some("0".into()),
            code_number: Some("P1".into()),
            start_date: Some("2024-03-01".into()),
            ..Default::default()
        };
        let (filter, page) = q.into_parts().unwrap();
        assert_eq!(filter.is_sell, Some(true));
        assert_eq!(filter.is_display, Some(false));
        assert_eq!(filter.code_number.as_deref(), Some("P1"));
        assert_eq!(filter.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(page, Pagination { offset: 20, limit: 10 });
    }

    #[test]
    fn malformed_query_values_are_rejected() {
        let bad_flag = ProductListQuery { is_sell: Some("maybe".into()), ..Default::default() };
        assert_eq!(bad_flag.into_parts().unwrap_err().status_code(), 400);
        let bad_date = ProductListQuery { end_date: Some("03/01/2024".into()), ..Default::default() };
        assert_eq!(bad_date.into_parts().unwrap_err().status_code(), 400);
        let inverted = ProductListQuery {
            start_date: Some("2024-03-05".into()),
            end_date: Some("2024-03-01".into()),
            ..Default::default()
        };
        assert!(inverted.into_parts().is_err());
    }
}
