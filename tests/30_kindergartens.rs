mod common;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

fn seed_rows() -> serde_json::Value {
    json!([
        {"ID": "1", "Name": "Kindergarten 1"},
        {"ID": "2", "Name": "Kindergarten 2"}
    ])
}

#[tokio::test]
async fn missing_tenant_header_is_rejected_without_opening_a_store() -> Result<()> {
    let app = common::TestApp::new().await?;
    app.create_organization("org1", "Acme", "acme.db").await?;

    let (status, body) = app.get("/kindergartens").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_TENANT");
    assert_eq!(app.tenant_opens(), 0);

    let request = Request::builder()
        .uri("/kindergartens")
        .header("X-Tenant-ID", "")
        .body(Body::empty())?;
    let (status, _) = app.send(request).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.tenant_opens(), 0);
    Ok(())
}

#[tokio::test]
async fn unknown_tenant_is_rejected() -> Result<()> {
    let app = common::TestApp::new().await?;

    let (status, body) = app.get_as_tenant("/kindergartens", "ghost").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNKNOWN_TENANT");
    assert_eq!(app.tenant_opens(), 0);
    Ok(())
}

#[tokio::test]
async fn registry_failure_is_treated_as_unknown_tenant() -> Result<()> {
    let app = common::TestApp::new().await?;
    app.create_organization("org1", "Acme", "acme.db").await?;
    app.registry.close().await;

    let (status, body) = app.get_as_tenant("/kindergartens", "org1").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNKNOWN_TENANT");
    assert_eq!(app.tenant_opens(), 0);
    Ok(())
}

#[tokio::test]
async fn seed_rows_are_listed_once() -> Result<()> {
    let app = common::TestApp::new().await?;
    app.create_organization("org1", "Acme", "acme.db").await?;

    for _ in 0..3 {
        let (status, body) = app.get_as_tenant("/kindergartens", "org1").await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, seed_rows());
    }
    assert_eq!(app.tenant_opens(), 3);
    Ok(())
}

#[tokio::test]
async fn tenants_only_see_their_own_records() -> Result<()> {
    let app = common::TestApp::new().await?;
    app.create_organization("org1", "Acme", "acme.db").await?;
    app.create_organization("org2", "Beta", "beta.db").await?;
    app.insert_kindergartens("beta.db", &[("b1", "Beta Central")]).await?;

    let (_, acme) = app.get_as_tenant("/kindergartens", "org1").await?;
    assert_eq!(acme, seed_rows());

    let (_, beta) = app.get_as_tenant("/kindergartens", "org2").await?;
    assert_eq!(
        beta,
        json!([
            {"ID": "b1", "Name": "Beta Central"},
            {"ID": "1", "Name": "Kindergarten 1"},
            {"ID": "2", "Name": "Kindergarten 2"}
        ])
    );
    Ok(())
}

#[tokio::test]
async fn seeding_can_be_disabled() -> Result<()> {
    let app = common::TestApp::with_config(|config| config.tenant.seed_kindergartens = false).await?;
    app.create_organization("org1", "Acme", "acme.db").await?;
    app.insert_kindergartens("acme.db", &[("k9", "Only One")]).await?;

    let (status, body) = app.get_as_tenant("/kindergartens", "org1").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"ID": "k9", "Name": "Only One"}]));
    Ok(())
}

#[tokio::test]
async fn unreachable_tenant_store_is_server_error() -> Result<()> {
    let app = common::TestApp::new().await?;
    app.create_organization("org1", "Broken", "no/such/dir/broken.db").await?;

    let (status, body) = app.get_as_tenant("/kindergartens", "org1").await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "TENANT_UNAVAILABLE");
    assert_eq!(app.tenant_opens(), 1);
    Ok(())
}

#[tokio::test]
async fn stores_open_under_a_data_dir_that_does_not_exist_yet() -> Result<()> {
    let app = common::TestApp::with_config(|config| {
        config.tenant.data_dir = config.tenant.data_dir.join("tenants");
    })
    .await?;
    app.create_organization("org1", "Acme", "acme.db").await?;

    let (status, body) = app.get_as_tenant("/kindergartens", "org1").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, seed_rows());

    let (status, listing) = app.get("/organizations").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing[0]["Kindergartens"], seed_rows());
    Ok(())
}

#[tokio::test]
async fn listing_shows_seeded_rows_after_tenant_access() -> Result<()> {
    let app = common::TestApp::new().await?;
    app.create_organization("org1", "Acme", "acme.db").await?;

    let (_, before) = app.get("/organizations").await?;
    assert_eq!(before[0]["Kindergartens"], json!([]));

    app.get_as_tenant("/kindergartens", "org1").await?;

    let (_, after) = app.get("/organizations").await?;
    assert_eq!(after[0]["Kindergartens"], seed_rows());
    Ok(())
}
