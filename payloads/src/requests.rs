use crate::{Vintage, Wine, WineId, WineStatus, WineryId, WinerySummary};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const WINE_NAME_MAX_LEN: usize = 500;
pub const VARIETY_MAX_LEN: usize = 100;

/// Query parameters for `GET /wines/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WineQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variety: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vintage: Option<Vintage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winery_id: Option<WineryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,
}

/// Query parameters for `GET /wines/admin/pending`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winery_id: Option<WineryId>,
}

/// Query parameters for `GET /wines/admin/all`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminWineQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WineStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winery_id: Option<WineryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Body of `POST /wines/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWine {
    pub winery_id: WineryId,
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
    #[serde(default)]
    pub bottle_size: Option<String>,
    pub is_available: bool,
    pub status: WineStatus,
}

impl CreateWine {
    /// Materialize the wine the backend would store for this request.
    pub fn into_wine(self, id: WineId, winery: WinerySummary) -> Wine {
        Wine {
            id,
            name: self.name,
            variety: self.variety,
            vintage: self.vintage,
            price: self.price,
            description: self.description,
            product_url: self.product_url,
            image_url: self.image_url,
            alcohol_content: self.alcohol_content,
            bottle_size: self
                .bottle_size
                .or_else(|| Some(crate::DEFAULT_BOTTLE_SIZE.to_string())),
            is_available: self.is_available,
            status: self.status,
            winery,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Body of `PUT /wines/{id}`.
///
/// An absent field is left unchanged. The optional wine details are
/// tri-state: `Some(None)` goes out as `null` and clears the stored value.
/// Has no status field; status only moves through [`crate::Decision`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateWine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winery_id: Option<WineryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "clearable"
    )]
    pub variety: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "clearable"
    )]
    pub vintage: Option<Option<Vintage>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "clearable_price"
    )]
    pub price: Option<Option<Decimal>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "clearable"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "clearable"
    )]
    pub product_url: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "clearable"
    )]
    pub image_url: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "clearable"
    )]
    pub alcohol_content: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "clearable"
    )]
    pub bottle_size: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

/// A present key always decodes to `Some`, even when its value is `null`.
mod clearable {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(
        value: &Option<Option<T>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        value.as_ref().and_then(Option::as_ref).serialize(serializer)
    }

    pub fn deserialize<'de, D, T>(
        deserializer: D,
    ) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

mod clearable_price {
    use rust_decimal::Decimal;
    use rust_decimal::serde::float_option;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Option<Decimal>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        float_option::serialize(&value.flatten(), serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Option<Decimal>>, D::Error> {
        float_option::deserialize(deserializer).map(Some)
    }
}

impl UpdateWine {
    /// Merge the provided fields into `wine`; `null` details clear it.
    ///
    /// Does not touch the winery summary; callers that change `winery_id`
    /// must resolve the new winery themselves.
    pub fn apply_to(&self, wine: &mut Wine) {
        if let Some(name) = &self.name {
            wine.name = name.clone();
        }
        if let Some(variety) = &self.variety {
            wine.variety = variety.clone();
        }
        if let Some(vintage) = &self.vintage {
            wine.vintage = vintage.clone();
        }
        if let Some(price) = self.price {
            wine.price = price;
        }
        if let Some(description) = &self.description {
            wine.description = description.clone();
        }
        if let Some(product_url) = &self.product_url {
            wine.product_url = product_url.clone();
        }
        if let Some(image_url) = &self.image_url {
            wine.image_url = image_url.clone();
        }
        if let Some(alcohol_content) = &self.alcohol_content {
            wine.alcohol_content = alcohol_content.clone();
        }
        if let Some(bottle_size) = &self.bottle_size {
            wine.bottle_size = bottle_size.clone();
        }
        if let Some(is_available) = self.is_available {
            wine.is_available = is_available;
        }
    }
}

/// Body of `PATCH /wines/admin/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: WineStatus,
}

/// Validation result for a wine's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WineNameValidation {
    Valid,
    Empty,
    TooLong,
}

impl WineNameValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            Self::Valid => None,
            Self::Empty => Some("Wine name is required"),
            Self::TooLong => Some("Wine name must be at most 500 characters"),
        }
    }
}

pub fn validate_wine_name(name: &str) -> WineNameValidation {
    let name = name.trim();
    if name.is_empty() {
        return WineNameValidation::Empty;
    }
    if name.chars().count() > WINE_NAME_MAX_LEN {
        return WineNameValidation::TooLong;
    }
    WineNameValidation::Valid
}
