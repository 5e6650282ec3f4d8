//! In-memory search and ordering over an already fetched customer list.
//!
//! Name search ignores case; phone search is a plain substring match. Both
//! orderings are string orderings, so phone `"10"` sorts before `"9"`.

use std::{cmp::Ordering, str::FromStr};

use models::customer::CustomerSummary;

use crate::errors::ServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    /// `"first last"`, compared case-insensitively
    Name,
    Phone,
}

impl FromStr for SortKey {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(Self::Name),
            "phone" => Ok(Self::Phone),
            other => Err(ServiceError::Validation(format!("unknown sort key: {other}"))),
        }
    }
}

pub fn matches_term(c: &CustomerSummary, term: &str) -> bool {
    let needle = term.to_lowercase();
    c.first_name.to_lowercase().contains(&needle)
        || c.last_name.to_lowercase().contains(&needle)
        || c.phone_number.contains(term)
}

pub fn filter_by_term(rows: Vec<CustomerSummary>, term: &str) -> Vec<CustomerSummary> {
    if term.is_empty() {
        return rows;
    }
    rows.into_iter().filter(|c| matches_term(c, term)).collect()
}

fn full_name(c: &CustomerSummary) -> String {
    format!("{} {}", c.first_name, c.last_name)
}

fn compare_names(a: &CustomerSummary, b: &CustomerSummary) -> Ordering {
    let (a, b) = (full_name(a), full_name(b));
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(&b))
}

/// Stable sort in place.
pub fn sort_customers(rows: &mut [CustomerSummary], key: SortKey) {
    match key {
        SortKey::Name => rows.sort_by(compare_names),
        SortKey::Phone => rows.sort_by(|a, b| a.phone_number.cmp(&b.phone_number)),
    }
}
