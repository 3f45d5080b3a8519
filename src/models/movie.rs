use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

/// One row of the processed movies table
///
/// Only `title` is required. Every other column may be missing in the source
/// export, so nullable columns are modeled as `Option` and list columns
/// default to empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Movie {
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub directors: Vec<String>,
    /// Release date; unparseable values are treated as missing
    #[serde(default, deserialize_with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub release_year: Option<i32>,
    /// Popularity score as published by the source
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub revenue: Option<f64>,
    /// Revenue over budget
    #[serde(default, rename = "return")]
    pub return_ratio: Option<f64>,
}

impl Movie {
    /// Creates a movie with only a title set
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Release year, falling back to the year of the release date
    pub fn year(&self) -> Option<i32> {
        self.release_year
            .or_else(|| self.release_date.map(|d| d.year()))
    }

    pub fn release_month(&self) -> Option<u32> {
        self.release_date.map(|d| d.month())
    }

    pub fn release_weekday(&self) -> Option<Weekday> {
        self.release_date.map(|d| d.weekday())
    }

    /// Whether `name` appears in the cast, ignoring case
    pub fn has_actor(&self, name: &str) -> bool {
        self.cast.iter().any(|a| same_name(a, name))
    }

    /// Whether `name` is credited as director, ignoring case
    pub fn has_director(&self, name: &str) -> bool {
        self.directors.iter().any(|d| same_name(d, name))
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        // Some exports carry a time component after the date
        let date_part = s.get(..10).unwrap_or(&s);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }))
}
