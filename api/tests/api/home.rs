use anyhow::Result;

use test_helpers::spawn_app;

#[tokio::test]
async fn default_page_uses_the_mocked_clock() -> Result<()> {
    let app = spawn_app().await;

    // mocked now is 2025-01-01T00:00:00Z, i.e. 09:00 JST in the default
    // base zone
    let html = app.client.fetch_page("").await?;
    assert!(html.contains("name=\"date\" value=\"2025-01-01\""));
    assert!(html.contains("name=\"time\" value=\"09:00\""));
    // default end is start + 8h
    assert!(html.contains("name=\"endTime\" value=\"17:00\""));

    // default target set renders one row each, plus the base zone
    for zone in [
        "Asia/Tokyo",
        "America/Los_Angeles",
        "America/New_York",
        "Europe/London",
        "Europe/Paris",
        "Asia/Singapore",
        "Australia/Sydney",
    ] {
        assert!(
            html.contains(&format!("data-row-id=\"{zone}\"")),
            "missing row for {zone}"
        );
    }

    Ok(())
}

#[tokio::test]
async fn advancing_the_clock_moves_the_defaults() -> Result<()> {
    let app = spawn_app().await;

    app.clock.set("2025-07-01T03:15:00Z".parse()?);

    // 2025-07-01 03:15 UTC is 12:15 JST the same day
    let html = app.client.fetch_page("").await?;
    assert!(html.contains("name=\"date\" value=\"2025-07-01\""));
    assert!(html.contains("name=\"time\" value=\"12:15\""));
    assert!(html.contains("name=\"endTime\" value=\"20:15\""));

    Ok(())
}

#[tokio::test]
async fn explicit_query_converts_across_zones() -> Result<()> {
    let app = spawn_app().await;

    let html = app
        .client
        .fetch_page(
            "date=2024-06-01&time=09%3A00&endTime=17%3A00\
             &baseZone=Asia%2FTokyo&zones=America%2FNew_York",
        )
        .await?;

    // Tokyo 09:00-17:00 is New York 20:00-04:00 on the previous day
    assert!(html.contains("data-row-id=\"America/New_York\""));
    assert!(html.contains("data-start-minutes=\"1200\""));
    assert!(html.contains("data-end-minutes=\"240\""));
    assert!(html.contains("data-day-diff=\"-1\""));
    assert!(html.contains("data-local-date=\"2024-05-31\""));

    // the base row renders first in the results region
    let tokyo = html.find("data-row-id=\"Asia/Tokyo\"").unwrap();
    let new_york = html.find("data-row-id=\"America/New_York\"").unwrap();
    assert!(tokyo < new_york);

    Ok(())
}

#[tokio::test]
async fn free_text_search_suggests_zones() -> Result<()> {
    let app = spawn_app().await;

    let html = app.client.fetch_page("q=ny+office").await?;
    assert!(html.contains("data-row-id=\"America/New_York\""));
    // suggestion replaced the default target set
    assert!(!html.contains("data-row-id=\"Europe/London\""));

    Ok(())
}

#[tokio::test]
async fn partial_fetch_serves_the_full_document() -> Result<()> {
    let app = spawn_app().await;

    // the ApiClient sends the partial-update header; the response is still
    // the whole page and the client extracts the results region itself
    let html = app.client.fetch_page("date=2024-06-01").await?;
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("id=\"resultsContainer\""));
    assert!(html.contains("id=\"timezoneCheckboxes\""));

    Ok(())
}

#[tokio::test]
async fn malformed_date_and_time_fall_back_to_defaults() -> Result<()> {
    let app = spawn_app().await;

    let html = app
        .client
        .fetch_page("date=garbage&time=99%3A99&baseZone=Asia%2FTokyo")
        .await?;
    assert!(html.contains("name=\"date\" value=\"2025-01-01\""));
    assert!(html.contains("name=\"time\" value=\"09:00\""));

    Ok(())
}

#[tokio::test]
async fn invalid_zone_identifier_is_a_bad_request() -> Result<()> {
    let app = spawn_app().await;

    let url = format!("{}/?zones=Not%2FA_Zone", app.client.address);
    let response = app.client.inner_client.get(&url).send().await?;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn unknown_but_valid_zone_degrades_to_its_raw_id() -> Result<()> {
    let app = spawn_app().await;

    let html = app.client.fetch_page("zones=America%2FAdak").await?;
    assert!(html.contains("data-row-id=\"America/Adak\""));
    assert!(html.contains("<span class=\"row-label\">America/Adak</span>"));

    Ok(())
}
