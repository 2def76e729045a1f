//! Wire types for the alumni API.
//!
//! Profiles are created and updated server-side; the client only reads them
//! and, in the profile-edit flow, submits a partial replacement. Every field
//! except the identifier is optional on the wire and unknown fields are
//! ignored, so older and newer backends decode alike.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// An alumni record as returned by search, Elo and profile endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Search relevance score, present on search results only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Stored explanation shown for results outside the live annotation window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(
        rename = "raw_linkedin_data",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub raw_linkedin_data: Option<RawLinkedinData>,
    #[serde(
        rename = "created_at",
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "updated_at",
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Display name, falling back to `"Unknown"` for unnamed records.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Unknown")
    }

    /// The fields the generation endpoint needs to explain this profile.
    #[must_use]
    pub fn summary_fields(&self) -> ProfileSummary {
        ProfileSummary {
            name: self.name.clone().unwrap_or_default(),
            role: self.role.clone().unwrap_or_default(),
            company: self.company.clone().unwrap_or_default(),
            summary: self.summary.clone().unwrap_or_default(),
        }
    }

    /// Up to `limit` `"title at company"` lines from the scraped position history.
    #[must_use]
    pub fn experience_lines(&self, limit: usize) -> Vec<String> {
        self.raw_linkedin_data
            .as_ref()
            .map(|raw| {
                raw.full_positions
                    .iter()
                    .filter_map(Position::headline)
                    .take(limit)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Up to `limit` education lines from the scraped education history.
    #[must_use]
    pub fn education_lines(&self, limit: usize) -> Vec<String> {
        self.raw_linkedin_data
            .as_ref()
            .map(|raw| {
                raw.educations
                    .iter()
                    .filter_map(Education::describe)
                    .take(limit)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Raw scraped source data nested inside a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLinkedinData {
    #[serde(default, alias = "position")]
    pub full_positions: Vec<Position>,
    #[serde(default)]
    pub educations: Vec<Education>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_logo: Option<String>,
}

impl Position {
    /// `"title at company"`, or `None` unless both parts are present.
    #[must_use]
    pub fn headline(&self) -> Option<String> {
        let title = self.title.as_deref().filter(|s| !s.is_empty())?;
        let company = self.company_name.as_deref().filter(|s| !s.is_empty())?;
        Some(format!("{title} at {company}"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default)]
    pub school_name: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub field_of_study: Option<String>,
}

impl Education {
    /// `"degree in field at school"`, omitting absent parts. `None` without a school.
    #[must_use]
    pub fn describe(&self) -> Option<String> {
        let school = self.school_name.as_deref().filter(|s| !s.is_empty())?;
        let mut line = String::new();
        if let Some(degree) = self.degree.as_deref().filter(|s| !s.is_empty()) {
            line.push_str(degree);
            line.push_str(" in ");
        }
        if let Some(field) = self.field_of_study.as_deref().filter(|s| !s.is_empty()) {
            line.push_str(field);
            line.push_str(" at ");
        }
        line.push_str(school);
        Some(line)
    }
}

/// The salient profile fields posted to the generation endpoint.
///
/// Missing values are sent as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub name: String,
    pub role: String,
    pub company: String,
    pub summary: String,
}

/// Partial profile replacement for `PUT /api/users/profile`.
///
/// Absent fields are omitted from the request body and left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// One row of the rating leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub rating: f64,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
}

/// Two profiles offered for a pairwise comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct EloPair {
    pub left: Profile,
    pub right: Profile,
}

/// Outcome of a pairwise comparison from the voter's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteOutcome {
    Left,
    Right,
    Equal,
}

impl std::fmt::Display for VoteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteOutcome::Left => write!(f, "left"),
            VoteOutcome::Right => write!(f, "right"),
            VoteOutcome::Equal => write!(f, "equal"),
        }
    }
}

impl std::str::FromStr for VoteOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(VoteOutcome::Left),
            "right" => Ok(VoteOutcome::Right),
            "equal" => Ok(VoteOutcome::Equal),
            other => Err(format!("invalid vote '{other}': expected left, right or equal")),
        }
    }
}

/// Body of `POST /api/elo/vote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRequest {
    pub profile_id_a: String,
    pub profile_id_b: String,
    pub result: VoteOutcome,
}

/// A value per side of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingPair {
    pub profile_a: f64,
    pub profile_b: f64,
}

/// Response of `POST /api/elo/vote`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteResult {
    #[serde(default)]
    pub success: Option<bool>,
    pub new_ratings: RatingPair,
    pub elo_changes: RatingPair,
}

/// Accepts RFC 3339 timestamps and the naive ISO form the backend emits for
/// UTC datetimes. Anything unparseable decodes as `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| parse_timestamp(&s)))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
