//! The mock backend's in-memory wine and winery tables.

use jiff::civil::DateTime;
use jiff::{Timestamp, tz::TimeZone};
use payloads::filters::WineFilters;
use payloads::pagination::{DEFAULT_PAGE_SIZE, SHOW_ALL_PAGE_SIZE};
use payloads::requests::{
    AdminWineQuery, CreateWine, PendingQuery, UpdateWine, WineQuery,
    validate_wine_name,
};
use payloads::responses::{
    ModerationOutcome, VarietyCount, VarietyList, VintageCount, VintageList,
    WineList, WineStats, WineryList,
};
use payloads::{
    Decision, InvalidTransition, StatusCounts, Transition, Vintage, Wine,
    WineId, WineStatus, Winery, WineryId, WinerySummary,
};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Wine not found")]
    WineNotFound,
    #[error("Winery not found")]
    WineryNotFound,
    #[error("{0}")]
    InvalidName(&'static str),
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
    #[error("Wine is already {0}")]
    StatusUnchanged(WineStatus),
}

#[derive(Debug, Default)]
pub struct Catalog {
    wineries: Vec<Winery>,
    wines: BTreeMap<WineId, Wine>,
    next_wine_id: i64,
}

fn now() -> DateTime {
    Timestamp::now().to_zoned(TimeZone::UTC).datetime()
}

/// Apply offset and limit to an already filtered and sorted list.
fn page(
    wines: Vec<Wine>,
    offset: Option<u64>,
    limit: Option<u64>,
    default_limit: u64,
) -> WineList {
    let total = wines.len() as u64;
    let offset = offset.unwrap_or(0) as usize;
    let limit = limit.unwrap_or(default_limit).min(SHOW_ALL_PAGE_SIZE) as usize;
    WineList {
        total,
        wines: wines.into_iter().skip(offset).take(limit).collect(),
    }
}

fn newest_first(wines: &mut [Wine]) {
    wines.sort_by(|a, b| {
        b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id))
    });
}

impl Catalog {
    pub fn new(wineries: Vec<Winery>) -> Self {
        Catalog {
            wineries,
            wines: BTreeMap::new(),
            next_wine_id: 1,
        }
    }

    fn winery_summary(
        &self,
        winery_id: WineryId,
    ) -> Result<WinerySummary, CatalogError> {
        self.wineries
            .iter()
            .find(|winery| winery.id == winery_id)
            .map(Winery::summary)
            .ok_or(CatalogError::WineryNotFound)
    }

    fn wine_mut(&mut self, wine_id: WineId) -> Result<&mut Wine, CatalogError> {
        self.wines.get_mut(&wine_id).ok_or(CatalogError::WineNotFound)
    }

    pub fn wine_count(&self) -> usize {
        self.wines.len()
    }

    pub fn insert_wine(
        &mut self,
        details: CreateWine,
    ) -> Result<WineId, CatalogError> {
        if let Some(message) = validate_wine_name(&details.name).error_message()
        {
            return Err(CatalogError::InvalidName(message));
        }
        let winery = self.winery_summary(details.winery_id)?;
        let id = WineId(self.next_wine_id);
        self.next_wine_id += 1;

        let mut wine = details.into_wine(id, winery);
        let created = now();
        wine.created_at = Some(created);
        wine.updated_at = Some(created);
        self.wines.insert(id, wine);
        Ok(id)
    }

    /// A single wine. Anonymous callers only see live wines.
    pub fn wine(
        &self,
        wine_id: WineId,
        include_unpublished: bool,
    ) -> Result<Wine, CatalogError> {
        self.wines
            .get(&wine_id)
            .filter(|wine| {
                include_unpublished || wine.status == WineStatus::Live
            })
            .cloned()
            .ok_or(CatalogError::WineNotFound)
    }

    pub fn update_wine(
        &mut self,
        wine_id: WineId,
        details: &UpdateWine,
    ) -> Result<(), CatalogError> {
        if let Some(name) = &details.name
            && let Some(message) = validate_wine_name(name).error_message()
        {
            return Err(CatalogError::InvalidName(message));
        }
        let winery = details
            .winery_id
            .map(|winery_id| self.winery_summary(winery_id))
            .transpose()?;

        let wine = self.wine_mut(wine_id)?;
        details.apply_to(wine);
        if let Some(winery) = winery {
            wine.winery = winery;
        }
        wine.updated_at = Some(now());
        Ok(())
    }

    pub fn delete_wine(&mut self, wine_id: WineId) -> Result<(), CatalogError> {
        self.wines
            .remove(&wine_id)
            .map(|_| ())
            .ok_or(CatalogError::WineNotFound)
    }

    /// Live, available wines matching the query, sorted by name.
    pub fn public_wines(&self, query: &WineQuery) -> WineList {
        let filters = WineFilters::from(query);
        let mut wines: Vec<Wine> = self
            .published()
            .filter(|wine| filters.matches(wine))
            .cloned()
            .collect();
        wines.sort_by(|a, b| {
            a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id))
        });
        page(wines, query.offset, query.limit, DEFAULT_PAGE_SIZE)
    }

    pub fn pending_wines(&self, query: &PendingQuery) -> WineList {
        let mut wines: Vec<Wine> = self
            .wines
            .values()
            .filter(|wine| wine.status == WineStatus::Pending)
            .filter(|wine| {
                query.winery_id.is_none_or(|id| wine.winery.id == id)
            })
            .cloned()
            .collect();
        newest_first(&mut wines);
        page(wines, query.offset, query.limit, DEFAULT_PAGE_SIZE)
    }

    pub fn all_wines(&self, query: &AdminWineQuery) -> WineList {
        let filters = WineFilters {
            search: query.search.clone().unwrap_or_default(),
            winery_id: query.winery_id,
            ..Default::default()
        };
        let mut wines: Vec<Wine> = self
            .wines
            .values()
            .filter(|wine| query.status.is_none_or(|s| wine.status == s))
            .filter(|wine| filters.matches(wine))
            .cloned()
            .collect();
        newest_first(&mut wines);
        page(wines, query.offset, query.limit, DEFAULT_PAGE_SIZE)
    }

    fn published(&self) -> impl Iterator<Item = &Wine> {
        self.wines
            .values()
            .filter(|wine| wine.status == WineStatus::Live && wine.is_available)
    }

    /// Varieties of published wines, alphabetical.
    pub fn varieties(&self) -> VarietyList {
        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for variety in self.published().filter_map(|w| w.variety.as_deref()) {
            *counts.entry(variety).or_default() += 1;
        }
        VarietyList {
            varieties: counts
                .into_iter()
                .map(|(name, count)| VarietyCount {
                    name: name.to_string(),
                    count,
                })
                .collect(),
        }
    }

    /// Vintages of published wines, newest first, then NV, then free text.
    pub fn vintages(&self) -> VintageList {
        let mut counts: HashMap<Vintage, u64> = HashMap::new();
        for vintage in self.published().filter_map(|w| w.vintage.clone()) {
            *counts.entry(vintage).or_default() += 1;
        }
        let mut vintages: Vec<VintageCount> = counts
            .into_iter()
            .map(|(year, count)| VintageCount { year, count })
            .collect();
        vintages.sort_by(|a, b| match (&a.year, &b.year) {
            (Vintage::Year(a), Vintage::Year(b)) => b.cmp(a),
            (a, b) => a.cmp(b),
        });
        VintageList { vintages }
    }

    pub fn stats(&self) -> WineStats {
        let mut counts = StatusCounts::default();
        for wine in self.wines.values() {
            *counts.get_mut(wine.status) += 1;
        }
        WineStats::from(counts)
    }

    pub fn decide(
        &mut self,
        wine_id: WineId,
        decision: Decision,
    ) -> Result<ModerationOutcome, CatalogError> {
        let wine = self.wine_mut(wine_id)?;
        match wine.status.apply(decision)? {
            Transition::To(status) => {
                wine.status = status;
                wine.updated_at = Some(now());
                let message = match decision {
                    Decision::Approve => "Wine approved".to_string(),
                    _ => format!("Wine status updated to {status}"),
                };
                Ok(ModerationOutcome {
                    message,
                    wine_id,
                    status: Some(status),
                })
            }
            Transition::Removed => {
                self.wines.remove(&wine_id);
                Ok(ModerationOutcome {
                    message: "Wine rejected and deleted".to_string(),
                    wine_id,
                    status: None,
                })
            }
        }
    }

    /// Move a wine to `status` through whichever decision gets it there.
    pub fn set_status(
        &mut self,
        wine_id: WineId,
        status: WineStatus,
    ) -> Result<ModerationOutcome, CatalogError> {
        let current = self.wine_mut(wine_id)?.status;
        let decision = current
            .decision_to(status)
            .ok_or(CatalogError::StatusUnchanged(current))?;
        self.decide(wine_id, decision)
    }

    /// Active wineries, sorted by name.
    pub fn wineries(&self) -> WineryList {
        let mut wineries: Vec<Winery> = self
            .wineries
            .iter()
            .filter(|winery| winery.is_active)
            .cloned()
            .collect();
        wineries.sort_by(|a, b| a.name.cmp(&b.name));
        WineryList {
            total: wineries.len() as u64,
            wineries,
        }
    }

    pub fn winery(&self, winery_id: WineryId) -> Result<Winery, CatalogError> {
        self.wineries
            .iter()
            .find(|winery| winery.id == winery_id)
            .cloned()
            .ok_or(CatalogError::WineryNotFound)
    }

    pub fn winery_by_slug(&self, slug: &str) -> Result<Winery, CatalogError> {
        self.wineries
            .iter()
            .find(|winery| winery.slug == slug)
            .cloned()
            .ok_or(CatalogError::WineryNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;
    use rust_decimal::Decimal;

    fn catalog() -> Catalog {
        Catalog::new(mock::wineries())
    }

    fn wine(name: &str, status: WineStatus) -> CreateWine {
        crate::wine_details(WineryId(1), name, status)
    }

    #[test]
    fn public_list_hides_unpublished_and_sorts_by_name() {
        let mut catalog = catalog();
        catalog.insert_wine(wine("Shiraz", WineStatus::Live)).unwrap();
        catalog.insert_wine(wine("Merlot", WineStatus::Pending)).unwrap();
        catalog.insert_wine(wine("Cabernet", WineStatus::Live)).unwrap();
        let mut hidden = wine("Rosé", WineStatus::Live);
        hidden.is_available = false;
        catalog.insert_wine(hidden).unwrap();

        let list = catalog.public_wines(&WineQuery::default());
        assert_eq!(list.total, 2);
        let names: Vec<_> = list.wines.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["Cabernet", "Shiraz"]);
    }

    #[test]
    fn public_list_pages_after_filtering() {
        let mut catalog = catalog();
        for i in 0..12 {
            let mut details = wine(&format!("Wine {i:02}"), WineStatus::Live);
            details.price = Some(Decimal::from(10 * i));
            catalog.insert_wine(details).unwrap();
        }
        let query = WineQuery {
            min_price: Some(Decimal::from(30)),
            offset: Some(5),
            limit: Some(5),
            ..Default::default()
        };
        let list = catalog.public_wines(&query);
        assert_eq!(list.total, 9);
        assert_eq!(list.wines.len(), 4);
        assert_eq!(list.wines[0].name, "Wine 08");
    }

    #[test]
    fn pending_list_is_newest_first() {
        let mut catalog = catalog();
        let first = catalog.insert_wine(wine("A", WineStatus::Pending)).unwrap();
        let second =
            catalog.insert_wine(wine("B", WineStatus::Pending)).unwrap();
        let list = catalog.pending_wines(&PendingQuery::default());
        let ids: Vec<_> = list.wines.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[test]
    fn reject_removes_and_approve_publishes() {
        let mut catalog = catalog();
        let a = catalog.insert_wine(wine("A", WineStatus::Pending)).unwrap();
        let b = catalog.insert_wine(wine("B", WineStatus::Pending)).unwrap();

        let outcome = catalog.decide(a, Decision::Approve).unwrap();
        assert_eq!(outcome.status, Some(WineStatus::Live));
        let outcome = catalog.decide(b, Decision::Reject).unwrap();
        assert_eq!(outcome.status, None);

        assert!(matches!(
            catalog.wine(b, true),
            Err(CatalogError::WineNotFound)
        ));
        let counts = catalog.stats().counts();
        assert_eq!((counts.pending, counts.live), (0, 1));
    }

    #[test]
    fn illegal_decisions_leave_wine_untouched() {
        let mut catalog = catalog();
        let id = catalog.insert_wine(wine("A", WineStatus::Live)).unwrap();
        assert!(matches!(
            catalog.decide(id, Decision::Reject),
            Err(CatalogError::InvalidTransition(_))
        ));
        assert!(matches!(
            catalog.set_status(id, WineStatus::Live),
            Err(CatalogError::StatusUnchanged(WineStatus::Live))
        ));
        assert_eq!(catalog.wine(id, false).unwrap().status, WineStatus::Live);
    }

    #[test]
    fn update_clears_null_details_and_keeps_absent_ones() {
        let mut catalog = catalog();
        let mut details = wine("Priced", WineStatus::Live);
        details.price = Some(Decimal::from(30));
        details.description = Some("wrong text".into());
        let id = catalog.insert_wine(details).unwrap();

        let update = UpdateWine {
            price: Some(None),
            ..Default::default()
        };
        catalog.update_wine(id, &update).unwrap();
        let wine = catalog.wine(id, false).unwrap();
        assert_eq!(wine.price, None);
        assert_eq!(wine.description.as_deref(), Some("wrong text"));
    }

    #[test]
    fn update_resolves_new_winery() {
        let mut catalog = catalog();
        let id = catalog.insert_wine(wine("A", WineStatus::Live)).unwrap();
        let update = UpdateWine {
            winery_id: Some(WineryId(2)),
            ..Default::default()
        };
        catalog.update_wine(id, &update).unwrap();
        assert_eq!(catalog.wine(id, false).unwrap().winery.id, WineryId(2));

        let bad = UpdateWine {
            winery_id: Some(WineryId(999)),
            ..Default::default()
        };
        assert!(matches!(
            catalog.update_wine(id, &bad),
            Err(CatalogError::WineryNotFound)
        ));
    }

    #[test]
    fn vintages_are_newest_first_with_nv_last() {
        let mut catalog = catalog();
        for vintage in [
            Vintage::Other("2019/20".into()),
            Vintage::Year(2019),
            Vintage::NonVintage,
            Vintage::Year(2022),
        ] {
            let mut details = wine("W", WineStatus::Live);
            details.vintage = Some(vintage);
            catalog.insert_wine(details).unwrap();
        }
        assert_eq!(
            catalog.vintages().years(),
            vec![
                Vintage::Year(2022),
                Vintage::Year(2019),
                Vintage::NonVintage,
                Vintage::Other("2019/20".into()),
            ]
        );
    }
}
