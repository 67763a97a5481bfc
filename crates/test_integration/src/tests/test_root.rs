use crate::runner::context::test_context::TestContext;
use color_eyre::Result;

pub async fn test_health_endpoint(context: &TestContext) -> Result<()> {
    // ACT
    let response = context.http_client.get(context.url("/health")).send().await?;

    // ASSERT
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await?, "OK");
    Ok(())
}
