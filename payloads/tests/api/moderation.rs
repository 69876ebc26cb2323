use payloads::requests::{AdminWineQuery, PendingQuery, UpdateWine};
use payloads::{Decision, ErrorKind, WineStatus, WineryId};
use reqwest::StatusCode;
use test_helpers::{assert_status_code, spawn_app, wine_details};

#[tokio::test]
async fn pending_list_and_stats_need_credentials() -> anyhow::Result<()> {
    let app = spawn_app().await?;

    let pending = app.client.list_pending(&PendingQuery::default()).await;
    assert_status_code(pending, StatusCode::UNAUTHORIZED);
    let stats = app.client.get_stats().await;
    assert_status_code(stats, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn approve_moves_wine_from_pending_to_live() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let a = app.create_named_wine("A", WineStatus::Pending).await?;
    let b = app.create_named_wine("B", WineStatus::Pending).await?;
    for name in ["C", "D", "E", "F", "G"] {
        app.create_named_wine(name, WineStatus::Live).await?;
    }

    let before = app.admin.get_stats().await?.counts();
    assert_eq!((before.pending, before.live), (2, 5));

    let outcome = app.admin.approve_wine(a).await?;
    assert_eq!(outcome.wine_id, a);
    assert_eq!(outcome.status, Some(WineStatus::Live));

    let pending = app.admin.list_pending(&PendingQuery::default()).await?;
    let ids: Vec<_> = pending.wines.iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![b]);
    let after = app.admin.get_stats().await?.counts();
    assert_eq!((after.pending, after.live), (1, 6));

    // Now visible to the public.
    assert_eq!(app.client.get_wine(a).await?.status, WineStatus::Live);
    Ok(())
}

#[tokio::test]
async fn reject_deletes_the_wine() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let wine_id = app.create_named_wine("Corked", WineStatus::Pending).await?;

    let outcome = app.admin.reject_wine(wine_id).await?;
    assert_eq!(outcome.status, None);
    assert_eq!(outcome.message, "Wine rejected and deleted");

    assert!(app.admin.get_wine(wine_id).await.unwrap_err().is_not_found());
    assert_eq!(app.admin.get_stats().await?.counts().pending, 0);
    Ok(())
}

#[tokio::test]
async fn illegal_decisions_are_refused() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let live = app.create_named_wine("Live One", WineStatus::Live).await?;

    let err = app.admin.reject_wine(live).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Rejected);
    assert_eq!(err.to_string(), "Cannot reject a wine that is live");

    let err = app.admin.set_wine_status(live, WineStatus::Live).await;
    assert_status_code(err, StatusCode::BAD_REQUEST);

    assert_eq!(app.admin.get_wine(live).await?.status, WineStatus::Live);
    Ok(())
}

#[tokio::test]
async fn moderate_routes_every_decision() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let wine_id = app.create_named_wine("Cycle", WineStatus::Pending).await?;

    let steps = [
        (Decision::Approve, WineStatus::Live),
        (Decision::Archive, WineStatus::Archived),
        (Decision::Requeue, WineStatus::Pending),
        (Decision::Archive, WineStatus::Archived),
        (Decision::Approve, WineStatus::Live),
        (Decision::Requeue, WineStatus::Pending),
    ];
    for (decision, expected) in steps {
        let outcome = app.admin.moderate(wine_id, decision).await?;
        assert_eq!(outcome.status, Some(expected), "{decision}");
        assert_eq!(app.admin.get_wine(wine_id).await?.status, expected);
    }

    let outcome = app.admin.moderate(wine_id, Decision::Reject).await?;
    assert_eq!(outcome.status, None);
    assert_eq!(app.catalog.lock().unwrap().wine_count(), 0);
    Ok(())
}

#[tokio::test]
async fn update_body_cannot_change_status() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let wine_id = app.create_named_wine("Draft", WineStatus::Pending).await?;

    let update = UpdateWine {
        name: Some("Draft, renamed".into()),
        ..Default::default()
    };
    app.admin.update_wine(wine_id, &update).await?;

    let wine = app.admin.get_wine(wine_id).await?;
    assert_eq!(wine.name, "Draft, renamed");
    assert_eq!(wine.status, WineStatus::Pending);
    Ok(())
}

#[tokio::test]
async fn admin_listing_filters_by_status_and_winery() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    app.create_named_wine("P1", WineStatus::Pending).await?;
    app.create_named_wine("L1", WineStatus::Live).await?;
    app.create_named_wine("A1", WineStatus::Archived).await?;
    let other = wine_details(WineryId(3), "L2", WineStatus::Live);
    app.create_wine(&other).await?;

    let all = app
        .admin
        .list_all_wines_admin(&AdminWineQuery::default())
        .await?;
    assert_eq!(all.total, 4);

    let live = AdminWineQuery {
        status: Some(WineStatus::Live),
        ..Default::default()
    };
    let live = app.admin.list_all_wines_admin(&live).await?;
    let names: Vec<_> = live.wines.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, vec!["L2", "L1"]);

    let at_stonewall = AdminWineQuery {
        winery_id: Some(WineryId(3)),
        ..Default::default()
    };
    let at_stonewall = app.admin.list_all_wines_admin(&at_stonewall).await?;
    assert_eq!(at_stonewall.total, 1);
    Ok(())
}
