use serde::Serialize;

/// Substituted for blank company, location and date values.
pub const NOT_AVAILABLE: &str = "N/A";

/// A scraped job posting as returned by `GET /jobs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    pub id: u64,
    #[serde(rename = "name")]
    pub title: String,
    #[serde(rename = "link")]
    pub detail_url: String,
    pub description: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "datePosted")]
    pub date_posted: String,
}

/// Field values read from a detail page, before an id is assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFields {
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub date_posted: String,
}

impl JobFields {
    pub fn into_job(self, id: u64, detail_url: &str) -> Job {
        Job {
            id,
            title: self.title,
            detail_url: detail_url.to_string(),
            description: self.description,
            company: self.company,
            location: self.location,
            date_posted: self.date_posted,
        }
    }
}

impl Job {
    /// Replace blank company, location and date with `N/A`.
    /// Non-blank values are kept untouched; title and description are never changed.
    pub fn normalized(self) -> Job {
        Job {
            company: or_not_available(self.company),
            location: or_not_available(self.location),
            date_posted: or_not_available(self.date_posted),
            ..self
        }
    }
}

fn or_not_available(value: String) -> String {
    if value.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value
    }
}
