use crate::common::TestApp;
use server::OPENAPI_PATH;

#[tokio::test]
async fn openapi_document_lists_every_route() {
    let app = TestApp::spawn().await;
    let res = app.get(OPENAPI_PATH).await;

    assert_eq!(res.status, 200, "{}", res.text);
    let paths = res.body["paths"].as_object().unwrap();
    for path in [
        "/api/v1/auth/login",
        "/api/v1/hackathons/{id}",
        "/api/v1/hackathons/{id}/data",
        "/api/v1/hackathons/{id}/edits",
        "/api/v1/hackathons/{id}/export",
        "/api/v1/hackathons/{id}/leaderboard",
        "/api/v1/hackathons/{id}/teams/{team_id}",
        "/api/v1/hackathons/{id}/projects/{project_id}",
        "/api/v1/export",
        "/api/v1/seed",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
    assert_eq!(
        paths["/api/v1/hackathons/{id}/edits"]["post"]["operationId"],
        "applyEdits"
    );
}

#[tokio::test]
async fn admin_routes_declare_the_password_header() {
    let app = TestApp::spawn().await;
    let res = app.get(OPENAPI_PATH).await;

    let scheme = &res.body["components"]["securitySchemes"]["admin_password"];
    assert_eq!(scheme["type"], "apiKey");
    assert_eq!(scheme["in"], "header");
    assert_eq!(scheme["name"], "X-Admin-Password");

    let save = &res.body["paths"]["/api/v1/hackathons/{id}/data"]["put"];
    assert_eq!(save["security"][0]["admin_password"], serde_json::json!([]));
}
