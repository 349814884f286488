//! # Donation Statistics
//!
//! Aggregate figures shown on the donation page. There is no database
//! behind the gateway yet, so these are served from a placeholder; the
//! shape matches what the front end renders.

use serde::{Deserialize, Serialize};

/// A recent donation entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentDonation {
    /// Donor display name (already abbreviated)
    pub name: String,

    /// Amount in major currency units
    pub amount: i64,

    /// Date string, YYYY-MM-DD
    pub date: String,
}

/// Aggregate donation statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationStats {
    pub total_raised: i64,
    pub donors_count: u32,
    pub projects_supported: u32,
    pub recent_donations: Vec<RecentDonation>,
}

impl DonationStats {
    /// Placeholder figures until a persistence layer exists.
    pub fn placeholder() -> Self {
        Self {
            total_raised: 127_500,
            donors_count: 43,
            projects_supported: 5,
            recent_donations: vec![
                RecentDonation {
                    name: "Rahul S.".to_string(),
                    amount: 2000,
                    date: "2025-05-15".to_string(),
                },
                RecentDonation {
                    name: "Priya M.".to_string(),
                    amount: 3500,
                    date: "2025-05-14".to_string(),
                },
                RecentDonation {
                    name: "Anil K.".to_string(),
                    amount: 200,
                    date: "2025-05-14".to_string(),
                },
                RecentDonation {
                    name: "Sunita R.".to_string(),
                    amount: 5000,
                    date: "2025-05-12".to_string(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_shape() {
        let stats = DonationStats::placeholder();
        assert_eq!(stats.recent_donations.len(), 4);
        assert_eq!(stats.donors_count, 43);
    }

    #[test]
    fn test_stats_serializes_camel_case() {
        let json = serde_json::to_value(DonationStats::placeholder()).unwrap();
        assert!(json.get("totalRaised").is_some());
        assert!(json.get("recentDonations").is_some());
        assert!(json.get("total_raised").is_none());
    }
}
