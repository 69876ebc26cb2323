//! Wine filter criteria.
//!
//! Used by the admin wine table to filter a fetched collection in the
//! browser, and turned into query parameters for server-side filtering on
//! the public catalog. All active criteria are ANDed; an empty criterion
//! matches everything.

use crate::pagination::Pagination;
use crate::requests::WineQuery;
use crate::{Vintage, Wine, WineryId};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WineFilters {
    /// Case-insensitive substring of the wine name.
    pub search: String,
    pub variety: Option<String>,
    pub vintage: Option<Vintage>,
    pub winery_id: Option<WineryId>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl WineFilters {
    pub fn matches(&self, wine: &Wine) -> bool {
        self.matches_search(wine)
            && self.matches_variety(wine)
            && self.matches_vintage(wine)
            && self.matches_winery(wine)
            && self.matches_price(wine)
    }

    /// The subset of `wines` that passes every active criterion, in input
    /// order.
    pub fn apply<'a>(&self, wines: &'a [Wine]) -> Vec<&'a Wine> {
        wines.iter().filter(|wine| self.matches(wine)).collect()
    }

    fn search_term(&self) -> Option<String> {
        let term = self.search.trim();
        (!term.is_empty()).then(|| term.to_lowercase())
    }

    fn active_variety(&self) -> Option<&str> {
        self.variety.as_deref().filter(|v| !v.is_empty())
    }

    fn matches_search(&self, wine: &Wine) -> bool {
        match self.search_term() {
            Some(term) => wine.name.to_lowercase().contains(&term),
            None => true,
        }
    }

    fn matches_variety(&self, wine: &Wine) -> bool {
        match self.active_variety() {
            Some(variety) => wine.variety.as_deref() == Some(variety),
            None => true,
        }
    }

    fn matches_vintage(&self, wine: &Wine) -> bool {
        match &self.vintage {
            Some(vintage) => wine.vintage.as_ref() == Some(vintage),
            None => true,
        }
    }

    fn matches_winery(&self, wine: &Wine) -> bool {
        match self.winery_id {
            Some(winery_id) => wine.winery.id == winery_id,
            None => true,
        }
    }

    // A wine with no price fails any active bound.
    fn matches_price(&self, wine: &Wine) -> bool {
        let above_min = match self.min_price {
            Some(min) => wine.price.is_some_and(|price| price >= min),
            None => true,
        };
        let below_max = match self.max_price {
            Some(max) => wine.price.is_some_and(|price| price <= max),
            None => true,
        };
        above_min && below_max
    }

    pub fn active_count(&self) -> usize {
        [
            self.search_term().is_some(),
            self.active_variety().is_some(),
            self.vintage.is_some(),
            self.winery_id.is_some(),
            self.min_price.is_some(),
            self.max_price.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Query parameters for the current criteria and page.
    pub fn to_query(&self, pagination: &Pagination) -> WineQuery {
        WineQuery {
            limit: Some(pagination.request_limit()),
            offset: Some(pagination.request_offset()),
            search: self.search_term().map(|_| self.search.trim().to_string()),
            variety: self.active_variety().map(str::to_string),
            vintage: self.vintage.clone(),
            winery_id: self.winery_id,
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

impl From<&WineQuery> for WineFilters {
    fn from(query: &WineQuery) -> Self {
        WineFilters {
            search: query.search.clone().unwrap_or_default(),
            variety: query.variety.clone(),
            vintage: query.vintage.clone(),
            winery_id: query.winery_id,
            min_price: query.min_price,
            max_price: query.max_price,
        }
    }
}

/// Parse a price text input. Blank or unparseable input means "no bound".
pub fn parse_price(input: &str) -> Option<Decimal> {
    let input = input.trim().trim_start_matches('$');
    if input.is_empty() {
        return None;
    }
    input.parse::<Decimal>().ok().filter(|price| !price.is_sign_negative())
}

/// Parse a select value holding a winery id. Blank means "any winery".
pub fn parse_winery_id(input: &str) -> Option<WineryId> {
    input.trim().parse::<i64>().ok().map(WineryId)
}

/// Parse a select value holding a vintage. Blank means "any vintage".
///
/// Options come from the catalog, so free-text vintages are kept.
pub fn parse_vintage(input: &str) -> Option<Vintage> {
    let input = input.trim();
    (!input.is_empty()).then(|| Vintage::from(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{WineId, WineStatus, WinerySummary};

    fn wine(id: i64, name: &str, price: Option<i64>) -> Wine {
        Wine {
            id: WineId(id),
            name: name.to_string(),
            variety: None,
            vintage: None,
            price: price.map(Decimal::from),
            description: None,
            product_url: None,
            image_url: None,
            alcohol_content: None,
            bottle_size: None,
            is_available: true,
            status: WineStatus::Live,
            winery: WinerySummary {
                id: WineryId(1),
                name: "Ridge Road".into(),
                slug: "ridge-road".into(),
            },
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn search_is_case_insensitive_substring_on_name() {
        let wines = vec![
            wine(1, "Reserve Shiraz", None),
            wine(2, "Chardonnay", None),
        ];
        let filters = WineFilters {
            search: "shiraz".into(),
            ..Default::default()
        };
        let names: Vec<_> =
            filters.apply(&wines).iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["Reserve Shiraz"]);
    }

    #[test]
    fn min_price_keeps_wines_at_or_above_bound() {
        let wines = vec![
            wine(1, "A", Some(30)),
            wine(2, "B", Some(55)),
            wine(3, "C", Some(80)),
            wine(4, "D", None),
        ];
        let filters = WineFilters {
            min_price: Some(Decimal::from(50)),
            ..Default::default()
        };
        let prices: Vec<_> =
            filters.apply(&wines).iter().map(|w| w.price).collect();
        assert_eq!(
            prices,
            vec![Some(Decimal::from(55)), Some(Decimal::from(80))]
        );
    }

    #[test]
    fn criteria_are_anded() {
        let mut shiraz = wine(1, "Old Vine Shiraz", Some(40));
        shiraz.variety = Some("Shiraz".into());
        let mut other_winery = shiraz.clone();
        other_winery.id = WineId(2);
        other_winery.winery.id = WineryId(9);
        let wines = vec![shiraz, other_winery];

        let filters = WineFilters {
            search: "vine".into(),
            variety: Some("Shiraz".into()),
            winery_id: Some(WineryId(1)),
            max_price: Some(Decimal::from(40)),
            ..Default::default()
        };
        let ids: Vec<_> = filters.apply(&wines).iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![WineId(1)]);
        assert_eq!(filters.active_count(), 4);
    }

    #[test]
    fn empty_criteria_match_everything() {
        let wines = vec![wine(1, "A", None), wine(2, "B", Some(10))];
        let filters = WineFilters {
            search: "   ".into(),
            variety: Some(String::new()),
            ..Default::default()
        };
        assert!(filters.is_empty());
        assert_eq!(filters.apply(&wines).len(), 2);
    }

    #[test]
    fn query_carries_only_active_criteria_and_page() {
        let mut pagination = Pagination::with_limit(20);
        pagination.next(100);
        let filters = WineFilters {
            search: "  rosé ".into(),
            min_price: Some(Decimal::from(15)),
            ..Default::default()
        };
        let query = filters.to_query(&pagination);
        assert_eq!(query.search.as_deref(), Some("rosé"));
        assert_eq!(query.variety, None);
        assert_eq!(query.offset, Some(20));
        assert_eq!(query.limit, Some(20));
        assert_eq!(query.min_price, Some(Decimal::from(15)));
    }

    #[test]
    fn text_inputs_parse_to_optional_criteria() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("$25.50"), Some(Decimal::new(2550, 2)));
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price("-5"), None);
        assert_eq!(parse_winery_id("12"), Some(WineryId(12)));
        assert_eq!(parse_winery_id(""), None);
        assert_eq!(parse_vintage("NV"), Some(Vintage::NonVintage));
        assert_eq!(parse_vintage(""), None);
        assert_eq!(
            parse_vintage("2019/20"),
            Some(Vintage::Other("2019/20".into()))
        );
    }
}
