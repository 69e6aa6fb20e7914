use serde_json::Value;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_health_and_version() {
    let server = TestContext::new().into_server();

    let health = server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<Value>()["status"], "ok");

    let version = server.get("/version").await;
    version.assert_status_ok();
    assert_eq!(version.json::<Value>()["name"], "clinicdesk-api");
}
