use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sections of the public site whose text can be edited from the admin area.
pub const EDITABLE_SECTIONS: [&str; 9] = [
    "hero", "about", "services", "team", "news", "events", "contact", "footer", "values",
];

pub const DEFAULT_SERVICE_ICON: &str = "fas fa-gavel";
pub const DEFAULT_SERVICE_COLOR: &str = "#3b82f6";

/// Site text keyed by section, then by key.
pub type SiteContent = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub detailed_content: String,
    pub order_position: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    pub position: String,
    pub description: String,
    pub image_path: Option<String>,
    pub order_position: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image_path: Option<String>,
    pub publish_date: NaiveDateTime,
    pub order_position: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image_path: Option<String>,
    pub event_date: NaiveDateTime,
    pub order_position: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Everything the content editor needs in one response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentOverview {
    pub content: SiteContent,
    pub services: Vec<Service>,
    pub team: Vec<TeamMember>,
    pub news: Vec<NewsItem>,
    pub events: Vec<Event>,
}

/// Fields shared by service creation and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceFields {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub detailed_content: String,
}

/// Fields shared by team member creation and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMemberFields {
    pub name: String,
    pub position: String,
    pub description: String,
}

/// Fields shared by news and event entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleFields {
    pub title: String,
    pub content: String,
    /// Publication or event date. When absent, creation uses the current
    /// time and updates keep the stored date.
    pub date: Option<NaiveDateTime>,
}

/// The two article-like lists of the site, which share their shape apart
/// from the meaning of the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleKind {
    News,
    Events,
}

impl ArticleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleKind::News => "news",
            ArticleKind::Events => "events",
        }
    }
}
