use payloads::WineryId;
use test_helpers::spawn_app;

#[tokio::test]
async fn list_only_active_wineries_by_name() -> anyhow::Result<()> {
    let app = spawn_app().await?;

    let list = app.client.list_wineries().await?;
    assert_eq!(list.total, 4);
    let names: Vec<_> = list.wineries.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Coastal Breeze Vineyards",
            "Ridge Road Estate",
            "Stonewall Wines",
            "Valley Floor Cellars",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn get_winery_by_id_and_slug() -> anyhow::Result<()> {
    let app = spawn_app().await?;

    let by_id = app.client.get_winery(WineryId(3)).await?;
    let by_slug = app.client.get_winery_by_slug(&by_id.slug).await?;
    assert_eq!(by_id, by_slug);
    assert_eq!(by_slug.name, "Stonewall Wines");

    let missing = app.client.get_winery_by_slug("no-such-winery").await;
    assert!(missing.unwrap_err().is_not_found());
    Ok(())
}
