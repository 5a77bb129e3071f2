//! Event record shape returned by the events search API.
//!
//! The search tool passes responses through untyped; this struct documents
//! the fields of a single event result for clients and tests.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One event listing as returned in a search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_schedule_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_detail_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critic_name: Option<String>,

    /// First date of a recurring event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_start_date: Option<String>,

    /// Days of the week the event recurs on (e.g. `["mon", "wed"]`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recur_days: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_running_show: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub festival: Option<bool>,

    /// Marked as a critic's pick.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub times_pick: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_chance: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid_friendly: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previews_and_openings: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub film_rating: Option<bool>,
}
