use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where an application stands. No transition rules are enforced;
/// any status may be set at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Applied,
    // Earlier data may carry the longer spelling.
    #[serde(alias = "Interviewing")]
    Interview,
    Offer,
    Rejected,
}

impl Status {
    /// Cycle to the next status, wrapping around. Used by the form's
    /// status selector.
    pub fn next(self) -> Status {
        match self {
            Status::Applied => Status::Interview,
            Status::Interview => Status::Offer,
            Status::Offer => Status::Rejected,
            Status::Rejected => Status::Applied,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Applied => "Applied",
            Status::Interview => "Interview",
            Status::Offer => "Offer",
            Status::Rejected => "Rejected",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Status {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "applied" => Ok(Status::Applied),
            "interview" | "interviewing" => Ok(Status::Interview),
            "offer" => Ok(Status::Offer),
            "rejected" => Ok(Status::Rejected),
            _ => Err(anyhow!(
                "Unknown status '{}'. Available: applied, interview, offer, rejected",
                s
            )),
        }
    }
}

pub fn default_location() -> String {
    "Remote".to_string()
}

/// One tracked job application. The whole list is serialized as a JSON
/// array, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: Uuid,
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub status: Status,
    pub date_applied: NaiveDate,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
}

impl JobApplication {
    /// Build a new record dated today with a fresh id. Blank locations
    /// fall back to "Remote".
    pub fn new(
        role: &str,
        company: &str,
        location: Option<&str>,
        salary: Option<&str>,
        status: Status,
    ) -> Self {
        let location = location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .unwrap_or_else(default_location);
        let salary = salary
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        Self {
            id: Uuid::new_v4(),
            role: role.trim().to_string(),
            company: company.trim().to_string(),
            status,
            date_applied: chrono::Local::now().date_naive(),
            location,
            salary,
        }
    }
}

/// Fields pulled out of a free-text job description by the AI backend.
/// Only ever used to pre-fill a draft; never persisted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractionResult {
    pub role: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!("applied".parse::<Status>().unwrap(), Status::Applied);
        assert_eq!("Interview".parse::<Status>().unwrap(), Status::Interview);
        assert_eq!("interviewing".parse::<Status>().unwrap(), Status::Interview);
        assert_eq!("OFFER".parse::<Status>().unwrap(), Status::Offer);
        assert!("ghosted".parse::<Status>().is_err());
    }

    #[test]
    fn test_status_cycle_covers_all() {
        let mut status = Status::Applied;
        for _ in 0..4 {
            status = status.next();
        }
        assert_eq!(status, Status::Applied);
    }

    #[test]
    fn test_new_application_defaults() {
        let job = JobApplication::new("Engineer", "Acme", None, None, Status::default());
        assert_eq!(job.status, Status::Applied);
        assert_eq!(job.location, "Remote");
        assert_eq!(job.salary, None);
        assert_eq!(job.date_applied, chrono::Local::now().date_naive());
    }

    #[test]
    fn test_new_application_blank_location_is_remote() {
        let job = JobApplication::new("PM", "Globex", Some("   "), Some(""), Status::Offer);
        assert_eq!(job.location, "Remote");
        assert_eq!(job.salary, None);
        assert_eq!(job.status, Status::Offer);
    }

    #[test]
    fn test_record_serde_round_trip() {
        let job = JobApplication::new("PM", "Globex", Some("NYC"), Some("$120k"), Status::Applied);
        let json = serde_json::to_string(&job).unwrap();
        let back: JobApplication = serde_json::from_str(&json).unwrap();
        assert_eq!(back, job);
    }

    #[test]
    fn test_record_accepts_legacy_interviewing_status() {
        let json = r#"{
            "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "role": "Frontend Dev",
            "company": "Google",
            "status": "Interviewing",
            "date_applied": "2026-01-28"
        }"#;
        let job: JobApplication = serde_json::from_str(json).unwrap();
        assert_eq!(job.status, Status::Interview);
        assert_eq!(job.location, "Remote");
    }
}
