//! Property tests for wine filtering and paging.

use payloads::filters::WineFilters;
use payloads::pagination::Pagination;
use payloads::{Vintage, Wine, WineId, WineStatus, WineryId, WinerySummary};
use proptest::prelude::*;
use rust_decimal::Decimal;

const NAMES: [&str; 6] = [
    "Reserve Shiraz",
    "Estate Chardonnay",
    "Old Vine Grenache",
    "Sparkling Rosé",
    "shiraz viognier",
    "Riesling",
];
const VARIETIES: [&str; 4] = ["Shiraz", "Chardonnay", "Riesling", "Grenache"];

fn vintage() -> impl Strategy<Value = Vintage> {
    prop_oneof![
        (2015u16..2025).prop_map(Vintage::Year),
        Just(Vintage::NonVintage),
    ]
}

fn price() -> impl Strategy<Value = Decimal> {
    (0i64..20_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn wine() -> impl Strategy<Value = Wine> {
    (
        0..NAMES.len(),
        proptest::option::of(0..VARIETIES.len()),
        proptest::option::of(vintage()),
        proptest::option::of(price()),
        1i64..4,
    )
        .prop_map(|(name, variety, vintage, price, winery)| Wine {
            id: WineId(0),
            name: NAMES[name].to_string(),
            variety: variety.map(|v| VARIETIES[v].to_string()),
            vintage,
            price,
            description: None,
            product_url: None,
            image_url: None,
            alcohol_content: None,
            bottle_size: None,
            is_available: true,
            status: WineStatus::Live,
            winery: WinerySummary {
                id: WineryId(winery),
                name: format!("Winery {winery}"),
                slug: format!("winery-{winery}"),
            },
            created_at: None,
            updated_at: None,
        })
}

fn wines() -> impl Strategy<Value = Vec<Wine>> {
    proptest::collection::vec(wine(), 0..40).prop_map(|mut wines| {
        for (i, wine) in wines.iter_mut().enumerate() {
            wine.id = WineId(i as i64);
        }
        wines
    })
}

fn filters() -> impl Strategy<Value = WineFilters> {
    (
        prop_oneof![
            Just(String::new()),
            Just("shiraz".to_string()),
            Just("ESTATE".to_string()),
            Just("  ros".to_string()),
        ],
        proptest::option::of(0..VARIETIES.len()),
        proptest::option::of(vintage()),
        proptest::option::of(1i64..4),
        proptest::option::of(price()),
        proptest::option::of(price()),
    )
        .prop_map(|(search, variety, vintage, winery, min, max)| WineFilters {
            search,
            variety: variety.map(|v| VARIETIES[v].to_string()),
            vintage,
            winery_id: winery.map(WineryId),
            min_price: min,
            max_price: max,
        })
}

/// Straightforward restatement of the filter rules.
fn brute_force(wines: &[Wine], f: &WineFilters) -> Vec<WineId> {
    let term = f.search.trim().to_lowercase();
    wines
        .iter()
        .filter(|w| term.is_empty() || w.name.to_lowercase().contains(&term))
        .filter(|w| match &f.variety {
            Some(v) => w.variety.as_ref() == Some(v),
            None => true,
        })
        .filter(|w| f.vintage.is_none() || w.vintage == f.vintage)
        .filter(|w| f.winery_id.is_none() || Some(w.winery.id) == f.winery_id)
        .filter(|w| match (f.min_price, w.price) {
            (Some(min), Some(price)) => price >= min,
            (Some(_), None) => false,
            (None, _) => true,
        })
        .filter(|w| match (f.max_price, w.price) {
            (Some(max), Some(price)) => price <= max,
            (Some(_), None) => false,
            (None, _) => true,
        })
        .map(|w| w.id)
        .collect()
}

proptest! {
    #[test]
    fn filtered_set_matches_brute_force(wines in wines(), f in filters()) {
        let filtered: Vec<WineId> =
            f.apply(&wines).iter().map(|w| w.id).collect();
        prop_assert_eq!(filtered, brute_force(&wines, &f));
    }

    #[test]
    fn filtered_set_is_an_ordered_subset(wines in wines(), f in filters()) {
        let filtered = f.apply(&wines);
        let mut rest = wines.iter();
        for wine in filtered {
            prop_assert!(rest.any(|w| w.id == wine.id));
        }
    }

    #[test]
    fn showing_range_is_consistent(
        total in 0u64..500,
        limit in 1u64..120,
        steps in 0usize..20,
        show_all in any::<bool>(),
    ) {
        let mut pagination = Pagination::with_limit(limit);
        for _ in 0..steps {
            pagination.next(total);
        }
        if show_all {
            pagination.enable_show_all();
        }
        let range = pagination.window(total);
        if total == 0 {
            prop_assert_eq!((range.from, range.to), (0, 0));
        } else {
            prop_assert!(1 <= range.from);
            prop_assert!(range.from <= range.to);
            prop_assert!(range.to <= total);
        }
    }

    #[test]
    fn window_counts_the_rows_slice_renders(
        len in 0usize..300,
        limit in 1u64..50,
        steps in 0usize..10,
        stale_shrink in 0usize..100,
    ) {
        let items: Vec<usize> = (0..len).collect();
        let mut pagination = Pagination::with_limit(limit);
        for _ in 0..steps {
            pagination.next(len as u64);
        }
        // The collection may shrink after the cursor moved.
        let shown = &items[..len.saturating_sub(stale_shrink)];
        let range = pagination.window(shown.len() as u64);
        prop_assert_eq!(range.rows() as usize, pagination.slice(shown).len());
    }
}
