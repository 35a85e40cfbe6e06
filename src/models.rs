use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MediaType {
    #[default]
    Movie,
    Tv,
}

impl MediaType {
    /// Path segment used by the catalog endpoints.
    pub fn as_path(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaType::Movie => "Movies",
            MediaType::Tv => "TV Shows",
        }
    }

    /// Capitalised type name used in the "not found" diagnostic.
    pub fn not_found_label(&self) -> &'static str {
        match self {
            MediaType::Movie => "Movie",
            MediaType::Tv => "Tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

impl FromStr for MediaType {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            _ => Err(anyhow::anyhow!("media type must be 'movie' or 'tv'")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub title: String,
    pub media_type: MediaType,
}

impl SearchQuery {
    pub fn new(title: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            title: title.into(),
            media_type,
        }
    }
}

/// A movie or TV entry as returned by the catalog. Movies carry `title` and
/// `release_date`, shows carry `name` and `first_air_date`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogItem {
    pub id: serde_json::Value,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl CatalogItem {
    /// Identifier rendered as text; numbers and strings both come back bare.
    pub fn id_string(&self) -> String {
        match &self.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    pub fn display_title(&self) -> &str {
        non_empty(self.title.as_deref())
            .or_else(|| non_empty(self.name.as_deref()))
            .unwrap_or("")
    }

    pub fn release_year(&self) -> Option<&str> {
        non_empty(self.release_date.as_deref())
            .or_else(|| non_empty(self.first_air_date.as_deref()))
    }

    pub fn poster_url(&self, image_base: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .and_then(|p| non_empty(Some(p)))
            .map(|p| format!("{}{}", image_base.trim_end_matches('/'), p))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Match first, then the recommendations in the order the catalog sent them.
pub type RecommendationResult = Vec<CatalogItem>;

#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationOutcome {
    Found(RecommendationResult),
    NotFound,
    TransportError(String),
}

impl RecommendationOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            RecommendationOutcome::Found(_) => "found",
            RecommendationOutcome::NotFound => "not_found",
            RecommendationOutcome::TransportError(_) => "error",
        }
    }

    pub fn items(&self) -> &[CatalogItem] {
        match self {
            RecommendationOutcome::Found(items) => items,
            _ => &[],
        }
    }

    pub fn into_items(self) -> RecommendationResult {
        match self {
            RecommendationOutcome::Found(items) => items,
            _ => Vec::new(),
        }
    }
}

/// Flattened item shape served by the JSON endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ItemView {
    pub id: String,
    pub display_title: String,
    pub year: Option<String>,
    pub poster_url: Option<String>,
}

impl ItemView {
    pub fn from_item(item: &CatalogItem, image_base: &str) -> Self {
        Self {
            id: item.id_string(),
            display_title: item.display_title().to_string(),
            year: item.release_year().map(|s| s.to_string()),
            poster_url: item.poster_url(image_base),
        }
    }
}
