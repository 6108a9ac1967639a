//! Consultation lead models for plaza.

use std::fmt;
use std::str::FromStr;

/// Lead workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadStatus {
    /// Newly submitted, not yet contacted.
    Pending,
    /// A consultant is working the lead.
    InProgress,
    /// Consultation finished.
    Done,
}

impl LeadStatus {
    /// Convert status to its database string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::Pending => "pending",
            LeadStatus::InProgress => "in_progress",
            LeadStatus::Done => "done",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(LeadStatus::Pending),
            "in_progress" => Ok(LeadStatus::InProgress),
            "done" => Ok(LeadStatus::Done),
            _ => Err(format!("unknown lead status: {s}")),
        }
    }
}

/// Stored consultation lead; contact fields are encryption tokens.
#[derive(Debug, Clone)]
pub struct ConsultationLead {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub region: Option<String>,
    pub budget: Option<String>,
    pub experience: Option<String>,
    pub path: Option<String>,
    pub message: Option<String>,
    pub status: LeadStatus,
    pub create_ip: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Raw lead-form input, plaintext.
#[derive(Debug, Clone)]
pub struct LeadSubmission {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub region: Option<String>,
    pub budget: Option<String>,
    pub experience: Option<String>,
    pub path: Option<String>,
    pub message: Option<String>,
}

/// Data for inserting a lead, after encryption.
#[derive(Debug, Clone)]
pub struct NewLead {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub region: Option<String>,
    pub budget: Option<String>,
    pub experience: Option<String>,
    pub path: Option<String>,
    pub message: Option<String>,
    pub create_ip: String,
}

/// Lead with contact fields decrypted for the admin console.
#[derive(Debug, Clone)]
pub struct DecryptedLead {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub region: Option<String>,
    pub budget: Option<String>,
    pub experience: Option<String>,
    pub path: Option<String>,
    pub message: Option<String>,
    pub status: LeadStatus,
    pub create_ip: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// One page of decrypted leads plus the total row count.
#[derive(Debug, Clone)]
pub struct LeadPage {
    pub leads: Vec<DecryptedLead>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_status_round_trip() {
        for status in [LeadStatus::Pending, LeadStatus::InProgress, LeadStatus::Done] {
            assert_eq!(LeadStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert!(LeadStatus::from_str("archived").is_err());
    }
}
