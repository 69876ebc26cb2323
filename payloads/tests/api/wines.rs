use payloads::filters::WineFilters;
use payloads::pagination::Pagination;
use payloads::requests::{UpdateWine, WineQuery};
use payloads::{ErrorKind, Vintage, WineStatus, WineryId};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use test_helpers::{assert_status_code, spawn_app, wine_details};

#[tokio::test]
async fn create_read_update_delete_wine() -> anyhow::Result<()> {
    let app = spawn_app().await?;

    let mut details =
        wine_details(WineryId(2), "Old Vine Shiraz", WineStatus::Live);
    details.variety = Some("Shiraz".into());
    details.vintage = Some(Vintage::Year(2019));
    details.price = Some(Decimal::new(4550, 2));
    let wine_id = app.create_wine(&details).await?;

    let wine = app.client.get_wine(wine_id).await?;
    assert_eq!(wine.name, "Old Vine Shiraz");
    assert_eq!(wine.winery.slug, "valley-floor-cellars");
    assert_eq!(wine.price, Some(Decimal::new(4550, 2)));
    assert_eq!(wine.bottle_size.as_deref(), Some("750ml"));

    let update = UpdateWine {
        name: Some("Old Vine Shiraz Reserve".into()),
        price: Some(Some(Decimal::from(60))),
        ..Default::default()
    };
    app.admin.update_wine(wine_id, &update).await?;
    let wine = app.client.get_wine(wine_id).await?;
    assert_eq!(wine.name, "Old Vine Shiraz Reserve");
    assert_eq!(wine.price, Some(Decimal::from(60)));
    assert_eq!(wine.vintage, Some(Vintage::Year(2019)));

    app.admin.delete_wine(wine_id).await?;
    let err = app.client.get_wine(wine_id).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Wine not found");
    Ok(())
}

#[tokio::test]
async fn null_update_fields_clear_stored_details() -> anyhow::Result<()> {
    let app = spawn_app().await?;

    let mut details = wine_details(WineryId(1), "Priced", WineStatus::Live);
    details.price = Some(Decimal::from(30));
    details.description = Some("wrong text".into());
    details.alcohol_content = Some("14%".into());
    let wine_id = app.create_wine(&details).await?;

    let update = UpdateWine {
        price: Some(None),
        description: Some(None),
        ..Default::default()
    };
    app.admin.update_wine(wine_id, &update).await?;

    let wine = app.client.get_wine(wine_id).await?;
    assert_eq!(wine.price, None);
    assert_eq!(wine.description, None);
    assert_eq!(wine.alcohol_content.as_deref(), Some("14%"));
    assert_eq!(wine.name, "Priced");
    Ok(())
}

#[tokio::test]
async fn writes_require_admin_credentials() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let details = wine_details(WineryId(1), "Rosé", WineStatus::Live);

    let anonymous = app.client.create_wine(&details).await;
    assert_status_code(anonymous, StatusCode::UNAUTHORIZED);

    let wrong = app.client_with("admin", "not-the-password");
    let err = wrong.create_wine(&details).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(err.to_string(), "Not authenticated");

    assert_eq!(app.catalog.lock().unwrap().wine_count(), 0);
    Ok(())
}

#[tokio::test]
async fn create_rejects_blank_name_and_unknown_winery() -> anyhow::Result<()> {
    let app = spawn_app().await?;

    let blank = wine_details(WineryId(1), "   ", WineStatus::Live);
    let err = app.admin.create_wine(&blank).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Rejected);
    assert_eq!(err.to_string(), "Wine name is required");

    let orphan = wine_details(WineryId(404), "Orphan", WineStatus::Live);
    let err = app.admin.create_wine(&orphan).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Winery not found");
    Ok(())
}

#[tokio::test]
async fn public_list_shows_only_live_wines() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    app.create_named_wine("Chardonnay", WineStatus::Live).await?;
    let pending = app.create_named_wine("Fiano", WineStatus::Pending).await?;
    app.create_named_wine("Merlot", WineStatus::Archived).await?;

    let list = app.client.list_wines(&WineQuery::default()).await?;
    assert_eq!(list.total, 1);
    assert_eq!(list.wines[0].name, "Chardonnay");

    // Pending wines are only visible with credentials.
    assert!(app.client.get_wine(pending).await.unwrap_err().is_not_found());
    let seen_by_admin = app.admin.get_wine(pending).await?;
    assert_eq!(seen_by_admin.status, WineStatus::Pending);
    Ok(())
}

#[tokio::test]
async fn filters_and_paging_travel_as_query_parameters() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    for (name, price) in [
        ("Reserve Shiraz", 30),
        ("Estate Shiraz", 55),
        ("Single Vineyard Shiraz", 80),
        ("Chardonnay", 60),
    ] {
        let mut details = wine_details(WineryId(1), name, WineStatus::Live);
        details.price = Some(Decimal::from(price));
        let variety = if name.contains("Shiraz") {
            "Shiraz"
        } else {
            "Chardonnay"
        };
        details.variety = Some(variety.into());
        app.create_wine(&details).await?;
    }

    let filters = WineFilters {
        search: "shiraz".into(),
        min_price: Some(Decimal::from(50)),
        ..Default::default()
    };
    let query = filters.to_query(&Pagination::default());
    let list = app.client.list_wines(&query).await?;
    let names: Vec<_> = list.wines.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, vec!["Estate Shiraz", "Single Vineyard Shiraz"]);

    let mut pagination = Pagination::with_limit(3);
    let everything = WineFilters::default();
    let first =
        app.client.list_wines(&everything.to_query(&pagination)).await?;
    assert_eq!((first.total, first.wines.len()), (4, 3));
    assert!(pagination.next(first.total));
    let second =
        app.client.list_wines(&everything.to_query(&pagination)).await?;
    assert_eq!(second.wines.len(), 1);
    let window = pagination.window(second.total);
    assert_eq!((window.from, window.to), (4, 4));
    assert_eq!(window.rows(), second.wines.len() as u64);
    Ok(())
}

#[tokio::test]
async fn variety_and_vintage_options_cover_live_wines() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    for (name, variety, vintage, status) in [
        ("A", "Shiraz", Vintage::Year(2020), WineStatus::Live),
        ("B", "Shiraz", Vintage::Year(2022), WineStatus::Live),
        ("C", "Riesling", Vintage::NonVintage, WineStatus::Live),
        ("D", "Malbec", Vintage::Year(2018), WineStatus::Pending),
    ] {
        let mut details = wine_details(WineryId(1), name, status);
        details.variety = Some(variety.into());
        details.vintage = Some(vintage);
        app.create_wine(&details).await?;
    }

    let varieties = app.client.list_varieties().await?;
    assert_eq!(varieties.names(), vec!["Riesling", "Shiraz"]);
    assert_eq!(varieties.varieties[1].count, 2);

    let vintages = app.client.list_vintages().await?;
    assert_eq!(
        vintages.years(),
        vec![Vintage::Year(2022), Vintage::Year(2020), Vintage::NonVintage]
    );
    Ok(())
}
