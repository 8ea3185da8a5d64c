// Lawyer listings and the filters the consultation page sends
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use shared::utils::validation::is_valid_fee;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lawyer {
    pub id: String,
    pub name: String,
    pub practices: Vec<String>,
    pub experience_years: i32,
    pub location: String,
    /// Consultation fee per session in INR
    pub fee: f64,
}

#[derive(Debug, Clone, FromRow)]
pub struct LawyerRow {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub practices: Option<Vec<String>>,
    pub experience_years: Option<i32>,
    pub office_location: Option<String>,
    pub fee: Option<f64>,
    pub verification_status: Option<String>,
}

impl From<LawyerRow> for Lawyer {
    fn from(row: LawyerRow) -> Self {
        Self {
            id: row.id.to_string(),
            name: row.full_name.unwrap_or_else(|| "(Unnamed)".to_string()),
            practices: row.practices.unwrap_or_default(),
            experience_years: row.experience_years.unwrap_or(0),
            location: row.office_location.unwrap_or_default(),
            fee: row.fee.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct LawyerQuery {
    /// Free text matched against name, location and practices
    pub q: Option<String>,
    /// Practice area, or "all"
    pub practice: Option<String>,
    /// Office location, or "all"
    pub location: Option<String>,
    /// Maximum fee in INR; blank or 0 means no limit
    pub max_fee: Option<String>,
}

/// Normalised lawyer filter; `None` means "do not filter on this"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LawyerFilter {
    pub text: Option<String>,
    pub practice: Option<String>,
    pub location: Option<String>,
    pub max_fee: Option<f64>,
}

fn selection(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
        .map(str::to_string)
}

impl LawyerQuery {
    pub fn to_filter(&self) -> Result<LawyerFilter, String> {
        let max_fee = match self.max_fee.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => {
                let fee: f64 = raw
                    .parse()
                    .map_err(|_| format!("maxFee must be a number, got '{}'", raw))?;
                is_valid_fee(fee).then_some(fee)
            }
            None => None,
        };

        Ok(LawyerFilter {
            text: self
                .q
                .as_deref()
                .map(|q| q.trim().to_lowercase())
                .filter(|q| !q.is_empty()),
            practice: selection(self.practice.as_deref()),
            location: selection(self.location.as_deref()),
            max_fee,
        })
    }
}

impl LawyerFilter {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.trim().to_lowercase()).filter(|t| !t.is_empty()),
            ..Self::default()
        }
    }

    /// In-memory version of the database query, used for the built-in list
    pub fn matches(&self, lawyer: &Lawyer) -> bool {
        let text_ok = self.text.as_ref().is_none_or(|q| {
            let haystack = format!("{} {} {}", lawyer.name, lawyer.location, lawyer.practices.join(" "));
            haystack.to_lowercase().contains(q.as_str())
        });
        let practice_ok = self
            .practice
            .as_ref()
            .is_none_or(|p| lawyer.practices.iter().any(|lp| lp == p));
        let location_ok = self.location.as_ref().is_none_or(|l| &lawyer.location == l);
        let fee_ok = self.max_fee.is_none_or(|max| lawyer.fee <= max);

        text_ok && practice_ok && location_ok && fee_ok
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LawyerListResponse {
    pub items: Vec<Lawyer>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LawyerFilterOptions {
    pub practices: Vec<String>,
    pub locations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lawyer() -> Lawyer {
        Lawyer {
            id: "l4".to_string(),
            name: "Adv. Rohan Gupta".to_string(),
            practices: vec!["Family".to_string(), "Rental".to_string(), "Civil".to_string()],
            experience_years: 6,
            location: "Delhi".to_string(),
            fee: 1200.0,
        }
    }

    fn query(q: &str, practice: &str, location: &str, max_fee: &str) -> LawyerQuery {
        let opt = |v: &str| Some(v.to_string());
        LawyerQuery {
            q: opt(q),
            practice: opt(practice),
            location: opt(location),
            max_fee: opt(max_fee),
        }
    }

    #[test]
    fn test_all_and_blank_mean_no_filter() {
        let filter = query("  ", "all", "ALL", "").to_filter().unwrap();
        assert_eq!(filter, LawyerFilter::default());

        let filter = query("", "", "", "0").to_filter().unwrap();
        assert_eq!(filter.max_fee, None);
    }

    #[test]
    fn test_invalid_fee_is_rejected() {
        assert!(query("", "all", "all", "cheap").to_filter().is_err());
    }

    #[test]
    fn test_filter_matching() {
        let l = lawyer();
        assert!(LawyerFilter::default().matches(&l));
        assert!(query("rental", "all", "all", "").to_filter().unwrap().matches(&l));
        assert!(query("GUPTA", "Family", "Delhi", "1200").to_filter().unwrap().matches(&l));
        assert!(!query("", "Criminal", "all", "").to_filter().unwrap().matches(&l));
        assert!(!query("", "all", "delhi", "").to_filter().unwrap().matches(&l));
        assert!(!query("", "all", "all", "1000").to_filter().unwrap().matches(&l));
    }

    #[test]
    fn test_row_defaults() {
        let row = LawyerRow {
            id: Uuid::nil(),
            full_name: None,
            practices: None,
            experience_years: None,
            office_location: None,
            fee: None,
            verification_status: Some("verified".to_string()),
        };
        let lawyer = Lawyer::from(row);
        assert_eq!(lawyer.name, "(Unnamed)");
        assert!(lawyer.practices.is_empty());
        assert_eq!(lawyer.fee, 0.0);
        assert_eq!(lawyer.location, "");
    }
}
