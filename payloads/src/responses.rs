use crate::{StatusCounts, Vintage, Wine, WineId, WineStatus, Winery};
use serde::{Deserialize, Serialize};

/// One page of wines plus the count of all wines matching the query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WineList {
    pub total: u64,
    #[serde(default)]
    pub wines: Vec<Wine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WineryList {
    pub total: u64,
    #[serde(default)]
    pub wineries: Vec<Winery>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarietyCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarietyList {
    #[serde(default)]
    pub varieties: Vec<VarietyCount>,
}

impl VarietyList {
    pub fn names(&self) -> Vec<String> {
        self.varieties.iter().map(|v| v.name.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VintageCount {
    pub year: Vintage,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VintageList {
    #[serde(default)]
    pub vintages: Vec<VintageCount>,
}

impl VintageList {
    pub fn years(&self) -> Vec<Vintage> {
        self.vintages.iter().map(|v| v.year.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: WineStatus,
    pub count: u64,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub database: Option<String>,
}

/// Body of `GET /wines/admin/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WineStats {
    #[serde(default)]
    pub stats: Vec<StatusCount>,
}

impl WineStats {
    /// Statuses missing from the list count as zero.
    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for entry in &self.stats {
            *counts.get_mut(entry.status) += entry.count;
        }
        counts
    }
}

impl From<StatusCounts> for WineStats {
    fn from(counts: StatusCounts) -> Self {
        WineStats {
            stats: WineStatus::ALL
                .into_iter()
                .filter(|status| counts.get(*status) > 0)
                .map(|status| StatusCount {
                    status,
                    count: counts.get(status),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WineCreated {
    pub id: WineId,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessMessage {
    pub message: String,
}

/// Response to a moderation decision. `status` is absent after a reject,
/// since the wine no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationOutcome {
    pub message: String,
    pub wine_id: WineId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WineStatus>,
}

/// Error body used by the backend for every non-success response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}
