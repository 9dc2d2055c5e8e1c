//! Content Models
//! Mission: Define the document shapes stored in named collections
//!
//! Each struct corresponds to one collection in the content store; the
//! collection name is the lowercase of the type name. Defaults mirror the
//! public site's forms, so partial submissions deserialize cleanly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sales lead captured from the public contact/lead form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(default = "default_source")]
    pub source: String,
    pub message: Option<String>,
    #[serde(default)]
    pub status: LeadStatus,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Converted,
    Lost,
}

/// Consultation booking from the public site. Date/time are the raw form
/// strings (YYYY-MM-DD / HH:MM); they are stored, not validated as
/// calendar values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub user_email: Option<String>,
    pub name: String,
    pub phone: Option<String>,
    pub package_id: Option<String>,
    pub date: String,
    pub time: String,
    pub notes: Option<String>,
    #[serde(default)]
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// Consulting package shown in the public catalog. Admin-created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    /// Whole rupees, not paise.
    pub price_inr: i64,
    #[serde(default)]
    pub is_popular: bool,
}

/// Blog post. Admin-created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_true")]
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

/// Message from the public contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

/// Client testimonial shown on the public site. Admin-created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub title: Option<String>,
    pub quote: String,
}

/// One-time-passcode request record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpRequest {
    /// "email" or "phone"
    pub channel: String,
    pub target: String,
    pub code: String,
    /// "signup", "login", "booking"
    pub purpose: String,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub verified: bool,
}

/// Upload metadata. Only the filename and a synthesized URL are stored;
/// file bytes are not persisted by this backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRecord {
    pub user_email: Option<String>,
    pub filename: String,
    pub url: String,
    pub purpose: Option<String>,
}

fn default_source() -> String {
    "website".to_string()
}

fn default_author() -> String {
    "Shreyash Suryawanshi".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_defaults() {
        let lead: Lead = serde_json::from_str(r#"{"name":"A","email":"a@x.com"}"#).unwrap();
        assert_eq!(lead.source, "website");
        assert_eq!(lead.status, LeadStatus::New);
        assert!(lead.phone.is_none());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&AppointmentStatus::Pending).unwrap();
        assert_eq!(json, r#""pending""#);

        let status: LeadStatus = serde_json::from_str(r#""converted""#).unwrap();
        assert_eq!(status, LeadStatus::Converted);
    }

    #[test]
    fn test_package_defaults() {
        let pkg: Package = serde_json::from_str(
            r#"{"slug":"starter","title":"Starter","description":"Intro","price_inr":4999}"#,
        )
        .unwrap();
        assert!(pkg.features.is_empty());
        assert!(!pkg.is_popular);
    }

    #[test]
    fn test_blog_post_defaults() {
        let post: BlogPost =
            serde_json::from_str(r#"{"title":"T","slug":"t","content":"body"}"#).unwrap();
        assert!(post.published);
        assert!(!post.author.is_empty());
        assert!(post.published_at.is_none());
    }
}
