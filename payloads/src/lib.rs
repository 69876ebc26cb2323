pub mod api_client;
pub mod credentials;
pub mod filters;
pub mod pagination;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError, ErrorKind};
pub use credentials::AdminCredentials;

use derive_more::Display;
use jiff::civil::DateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct WineId(pub i64);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct WineryId(pub i64);

/// Harvest year, or the non-vintage marker for blends across years.
///
/// The backend stores vintages as free text, so anything that is neither
/// a year nor NV survives as [`Vintage::Other`] rather than failing the
/// whole response. [`FromStr`] stays strict and is what admin input goes
/// through.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum Vintage {
    Year(u16),
    NonVintage,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Vintage must be a four digit year or NV, got {0:?}")]
pub struct VintageParseError(pub String);

impl FromStr for Vintage {
    type Err = VintageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "nv" | "n.v." | "n/v" | "non-vintage" | "non vintage" => {
                return Ok(Vintage::NonVintage);
            }
            _ => {}
        }
        if trimmed.len() == 4
            && let Ok(year) = trimmed.parse::<u16>()
        {
            return Ok(Vintage::Year(year));
        }
        Err(VintageParseError(s.to_string()))
    }
}

impl std::fmt::Display for Vintage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vintage::Year(year) => write!(f, "{year}"),
            Vintage::NonVintage => write!(f, "NV"),
            Vintage::Other(text) => f.write_str(text),
        }
    }
}

impl From<String> for Vintage {
    fn from(value: String) -> Self {
        value
            .parse()
            .unwrap_or_else(|_| Vintage::Other(value.trim().to_string()))
    }
}

impl From<Vintage> for String {
    fn from(value: Vintage) -> Self {
        value.to_string()
    }
}

/// Moderation status stored by the backend.
///
/// Rejection deletes the wine, so there is no stored "rejected" status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WineStatus {
    #[display("pending")]
    Pending,
    #[display("live")]
    Live,
    #[display("archived")]
    Archived,
}

impl WineStatus {
    pub const ALL: [WineStatus; 3] =
        [WineStatus::Pending, WineStatus::Live, WineStatus::Archived];

    pub fn label(&self) -> &'static str {
        match self {
            WineStatus::Pending => "Pending",
            WineStatus::Live => "Live",
            WineStatus::Archived => "Archived",
        }
    }

    /// The single transition function for moderation.
    ///
    /// Every status change in the admin UI, whether through the review
    /// queue or the wine management table, goes through here first.
    pub fn apply(
        self,
        decision: Decision,
    ) -> Result<Transition, InvalidTransition> {
        use Decision::*;
        use WineStatus::*;
        match (self, decision) {
            (Pending | Archived, Approve) => Ok(Transition::To(Live)),
            (Pending, Reject) => Ok(Transition::Removed),
            (Pending | Live, Archive) => Ok(Transition::To(Archived)),
            (Live | Archived, Requeue) => Ok(Transition::To(Pending)),
            (from, decision) => Err(InvalidTransition { from, decision }),
        }
    }

    /// The decision that moves a wine from this status to `to`, if any.
    pub fn decision_to(self, to: WineStatus) -> Option<Decision> {
        Decision::ALL
            .into_iter()
            .find(|decision| self.apply(*decision) == Ok(Transition::To(to)))
    }

    /// Decisions that are legal from this status, in display order.
    pub fn available_decisions(self) -> Vec<Decision> {
        Decision::ALL
            .into_iter()
            .filter(|decision| self.apply(*decision).is_ok())
            .collect()
    }
}

impl FromStr for WineStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(WineStatus::Pending),
            "live" => Ok(WineStatus::Live),
            "archived" => Ok(WineStatus::Archived),
            other => Err(format!(
                "Status must be 'pending', 'live', or 'archived', got {other:?}"
            )),
        }
    }
}

/// An admin moderation decision about a wine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Decision {
    #[display("approve")]
    Approve,
    #[display("reject")]
    Reject,
    #[display("archive")]
    Archive,
    #[display("requeue")]
    Requeue,
}

impl Decision {
    pub const ALL: [Decision; 4] = [
        Decision::Approve,
        Decision::Reject,
        Decision::Archive,
        Decision::Requeue,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Decision::Approve => "Approve",
            Decision::Reject => "Reject",
            Decision::Archive => "Archive",
            Decision::Requeue => "Return to review",
        }
    }
}

/// Outcome of applying a [`Decision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    To(WineStatus),
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Cannot {decision} a wine that is {from}")]
pub struct InvalidTransition {
    pub from: WineStatus,
    pub decision: Decision,
}

/// The winery reference embedded in every wine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinerySummary {
    pub id: WineryId,
    pub name: String,
    pub slug: String,
}

pub const DEFAULT_BOTTLE_SIZE: &str = "750ml";

fn default_bottle_size() -> Option<String> {
    Some(DEFAULT_BOTTLE_SIZE.to_string())
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wine {
    pub id: WineId,
    pub name: String,
    #[serde(default)]
    pub variety: Option<String>,
    #[serde(default)]
    pub vintage: Option<Vintage>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub product_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub alcohol_content: Option<String>,
    #[serde(default = "default_bottle_size")]
    pub bottle_size: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    pub status: WineStatus,
    pub winery: WinerySummary,
    #[serde(default)]
    pub created_at: Option<DateTime>,
    #[serde(default)]
    pub updated_at: Option<DateTime>,
}

impl Wine {
    /// Price formatted for display, e.g. `$24.00`.
    pub fn price_label(&self) -> Option<String> {
        self.price.map(format_price)
    }
}

pub fn format_price(price: Decimal) -> String {
    format!("${:.2}", price.round_dp(2))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Winery {
    pub id: WineryId,
    pub name: String,
    pub slug: String,
    pub shop_url: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Winery {
    pub fn summary(&self) -> WinerySummary {
        WinerySummary {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
        }
    }
}

/// Wine counts per moderation status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: u64,
    pub live: u64,
    pub archived: u64,
}

impl StatusCounts {
    pub fn get(&self, status: WineStatus) -> u64 {
        match status {
            WineStatus::Pending => self.pending,
            WineStatus::Live => self.live,
            WineStatus::Archived => self.archived,
        }
    }

    pub fn get_mut(&mut self, status: WineStatus) -> &mut u64 {
        match status {
            WineStatus::Pending => &mut self.pending,
            WineStatus::Live => &mut self.live,
            WineStatus::Archived => &mut self.archived,
        }
    }

    /// Pending plus live, the figure shown on the review dashboard.
    pub fn reviewable_total(&self) -> u64 {
        self.pending + self.live
    }

    /// Move one wine between statuses, saturating at zero.
    pub fn record(&mut self, from: WineStatus, transition: Transition) {
        let count = self.get_mut(from);
        *count = count.saturating_sub(1);
        if let Transition::To(to) = transition {
            *self.get_mut(to) += 1;
        }
    }
}
