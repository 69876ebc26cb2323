mod moderation;
mod wineries;
mod wines;

use test_helpers::spawn_app;

#[tokio::test]
async fn health_check() -> anyhow::Result<()> {
    let app = spawn_app().await?;

    let health = app.client.health_check().await?;
    assert_eq!(health.status, "healthy");

    Ok(())
}
