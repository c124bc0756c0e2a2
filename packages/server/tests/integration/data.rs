use crate::common::{DRAFT, TestApp, dataset, routes};
use common::model::RawHackathonData;
use serde_json::json;

#[tokio::test]
async fn admin_reads_live_scores_and_team_lists() {
    let app = TestApp::spawn().await;
    let res = app.get_as_admin(&routes::data(DRAFT)).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["projects"][0]["scores"]["polish"], 4);
    assert_eq!(res.body["teams"][0]["projects"], json!(["launchpad", "fuel-gauge"]));
    assert_eq!(res.body["teams"][1]["projects"], json!(["night-vision"]));
    assert_eq!(res.body["config"]["categories"][1]["weight"], 2.0);
}

#[tokio::test]
async fn replacing_dataset_accepts_encoded_and_live_scores() {
    let app = TestApp::spawn().await;
    let mut body = serde_json::to_value(RawHackathonData::encoded(&dataset())).unwrap();
    body["projects"][1]["scores"] = json!({ "polish": 3 });
    body["projects"][0]["title"] = json!("Launchpad 2");

    let res = app.put_as_admin(&routes::data(DRAFT), &body).await;
    assert_eq!(res.status, 200, "{}", res.text);

    let stored = app.stored_file_data(DRAFT).await;
    assert_eq!(stored.projects[0].title, "Launchpad 2");
    assert_eq!(stored.projects[0].scores.get("innovation"), 5);
    assert_eq!(stored.projects[1].scores.get("polish"), 3);
}

#[tokio::test]
async fn data_file_is_written_encoded() {
    let app = TestApp::spawn().await;
    let body = serde_json::to_value(RawHackathonData::live(&dataset())).unwrap();
    let res = app.put_as_admin(&routes::data(DRAFT), &body).await;
    assert_eq!(res.status, 200, "{}", res.text);

    let path = app.files.data_dir().join("spring-2025.json");
    let on_disk: serde_json::Value =
        serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();
    assert!(on_disk["projects"][0]["scores"].is_string());
}

#[tokio::test]
async fn undecodable_scores_read_as_unscored() {
    let app = TestApp::spawn().await;
    let mut body = serde_json::to_value(RawHackathonData::encoded(&dataset())).unwrap();
    body["projects"][0]["scores"] = json!("!!! not an encoded score set !!!");

    let res = app.put_as_admin(&routes::data(DRAFT), &body).await;
    assert_eq!(res.status, 200, "{}", res.text);

    let scores = &res.body["projects"][0]["scores"];
    assert_eq!(scores.as_object().unwrap().len(), 6);
    assert_eq!(scores["creativity"], 0);
}

#[tokio::test]
async fn scores_above_the_maximum_are_stored_as_zero() {
    let app = TestApp::spawn().await;
    let mut body = serde_json::to_value(RawHackathonData::live(&dataset())).unwrap();
    body["projects"][0]["scores"] = json!({ "polish": 9, "innovation": 5 });

    let res = app.put_as_admin(&routes::data(DRAFT), &body).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["projects"][0]["scores"]["polish"], 0);

    let stored = app.stored_file_data(DRAFT).await;
    assert_eq!(stored.projects[0].scores.get("polish"), 0);
    assert_eq!(stored.projects[0].scores.get("innovation"), 5);

    let project = app.get(&routes::project(DRAFT, "launchpad")).await;
    assert_eq!(project.body["overallScore"], 5.0);
}

#[tokio::test]
async fn dataset_with_unknown_team_is_rejected() {
    let app = TestApp::spawn().await;
    let mut body = serde_json::to_value(RawHackathonData::live(&dataset())).unwrap();
    body["projects"][0]["teamId"] = json!("ghosts");

    let res = app.put_as_admin(&routes::data(DRAFT), &body).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");

    let stored = app.stored_file_data(DRAFT).await;
    assert_eq!(stored, dataset());
}

#[tokio::test]
async fn last_write_wins() {
    let app = TestApp::spawn().await;

    let mut first = dataset();
    first.projects.truncate(1);
    let mut second = dataset();
    second.teams[1].name = "Night Owls".into();

    for data in [&first, &second] {
        let body = serde_json::to_value(RawHackathonData::live(data)).unwrap();
        let res = app.put_as_admin(&routes::data(DRAFT), &body).await;
        assert_eq!(res.status, 200, "{}", res.text);
    }

    assert_eq!(app.stored_file_data(DRAFT).await, second);
}

#[tokio::test]
async fn unknown_hackathon_is_not_found() {
    let app = TestApp::spawn().await;
    let res = app.get_as_admin(&routes::data("winter-2030")).await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}
