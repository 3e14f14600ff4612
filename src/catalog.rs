use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::StatsError;

const DEFAULT_CITIES: &[(&str, &str)] = &[
    ("chicago", "chicago.csv"),
    ("new york city", "new_york_city.csv"),
    ("washington", "washington.csv"),
];

/// Maps city names to the location of their trip CSV (file path or URL).
///
/// Stored as a plain JSON object on disk:
/// ```json
/// {
///   "chicago": "data/chicago.csv",
///   "boston": "https://example.org/boston.csv.gz"
/// }
/// ```
/// Names are matched case-insensitively.
#[derive(Debug, Clone, PartialEq)]
pub struct CityCatalog {
    entries: BTreeMap<String, String>,
}

impl Default for CityCatalog {
    fn default() -> Self {
        Self::from_entries(
            DEFAULT_CITIES
                .iter()
                .map(|(city, file)| (city.to_string(), file.to_string())),
        )
    }
}

impl CityCatalog {
    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(city, location)| (normalize(&city), location))
                .collect(),
        }
    }

    /// The built-in cities, with relative file names resolved against `data_dir`.
    pub fn with_data_dir(data_dir: &Path) -> Self {
        let mut catalog = Self::default();
        catalog.resolve_relative(data_dir);
        catalog
    }

    /// Loads the catalog from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read city catalog '{}'", path.display()))?;
        let entries: BTreeMap<String, String> = serde_json::from_str(&content)
            .with_context(|| format!("invalid city catalog '{}'", path.display()))?;
        Ok(Self::from_entries(entries))
    }

    /// Rewrites relative file locations to live under `data_dir`. URLs and
    /// absolute paths are left alone.
    pub fn resolve_relative(&mut self, data_dir: &Path) {
        for location in self.entries.values_mut() {
            let is_url = location.starts_with("http://") || location.starts_with("https://");
            if !is_url && Path::new(location.as_str()).is_relative() {
                *location = data_dir.join(location.as_str()).display().to_string();
            }
        }
    }

    /// Returns the source location for `city`.
    pub fn location(&self, city: &str) -> Result<&str, StatsError> {
        self.entries
            .get(&normalize(city))
            .map(String::as_str)
            .ok_or_else(|| StatsError::UnknownCity(city.trim().to_string()))
    }

    pub fn contains(&self, city: &str) -> bool {
        self.entries.contains_key(&normalize(city))
    }

    /// Iterates over all `(city, location)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// City names joined for prompts, e.g. `Chicago, New York City, Washington`.
    pub fn display_names(&self) -> String {
        self.entries
            .keys()
            .map(|city| title_case(city))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn normalize(city: &str) -> String {
    city.trim().to_lowercase()
}

pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
