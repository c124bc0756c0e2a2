use crate::common::{DRAFT, TestApp, dataset, routes};
use serde_json::json;

mod scoring {
    use super::*;

    #[tokio::test]
    async fn scores_are_saved_after_the_batch() {
        let app = TestApp::spawn().await;
        let res = app
            .edit(
                DRAFT,
                json!([
                    { "op": "setScore", "projectId": "fuel-gauge", "categoryId": "innovation", "value": 3 },
                    { "op": "setScore", "projectId": "fuel-gauge", "categoryId": "polish", "value": 9 },
                ]),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["outcomes"][0], json!({ "result": "scored", "value": 3 }));
        assert_eq!(res.body["outcomes"][1], json!({ "result": "scored", "value": 0 }));

        let stored = app.stored_file_data(DRAFT).await;
        let scores = &stored.project("fuel-gauge").unwrap().scores;
        assert_eq!(scores.get("innovation"), 3);
        assert_eq!(scores.get("polish"), 0);
    }

    #[tokio::test]
    async fn non_integer_scores_do_not_reject_the_batch() {
        let app = TestApp::spawn().await;
        let res = app
            .edit(
                DRAFT,
                json!([
                    { "op": "setScore", "projectId": "fuel-gauge", "categoryId": "polish", "value": 4.0 },
                    { "op": "setScore", "projectId": "fuel-gauge", "categoryId": "innovation", "value": 1e3 },
                ]),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["outcomes"][0]["value"], 4);
        assert_eq!(res.body["outcomes"][1]["value"], 0);

        let stored = app.stored_file_data(DRAFT).await;
        let scores = &stored.project("fuel-gauge").unwrap().scores;
        assert_eq!(scores.get("polish"), 4);
        assert_eq!(scores.get("innovation"), 0);
    }

    #[tokio::test]
    async fn zero_weight_removes_category_influence() {
        let app = TestApp::spawn().await;
        let res = app
            .edit(
                DRAFT,
                json!([{ "op": "setCategoryWeight", "categoryId": "innovation", "weight": 0.0 }]),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        // Launchpad: polish 4 alone now.
        let project = app.get(&routes::project(DRAFT, "launchpad")).await;
        assert_eq!(project.body["overallScore"], 4.0);
    }

    #[tokio::test]
    async fn toggling_an_award_twice_is_a_no_op() {
        let app = TestApp::spawn().await;
        let toggle = json!({ "op": "toggleAward", "projectId": "launchpad", "awardId": "best-demo" });
        let res = app.edit(DRAFT, json!([toggle, toggle])).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["outcomes"][0]["awarded"], true);
        assert_eq!(res.body["outcomes"][1]["awarded"], false);
        assert_eq!(app.stored_file_data(DRAFT).await, dataset());
    }
}

mod structure {
    use super::*;

    #[tokio::test]
    async fn adding_team_and_project_updates_team_lists() {
        let app = TestApp::spawn().await;
        let res = app
            .edit(
                DRAFT,
                json!([
                    { "op": "addTeam", "name": "Night Foxes!", "members": ["Ada", " "] },
                    { "op": "addProject", "title": "Den Finder", "teamId": "night-foxes" },
                ]),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["outcomes"][0], json!({ "result": "created", "id": "night-foxes" }));
        assert_eq!(res.body["outcomes"][1]["id"], "den-finder");

        let teams = res.body["data"]["teams"].as_array().unwrap();
        let foxes = teams.iter().find(|t| t["id"] == "night-foxes").unwrap();
        assert_eq!(foxes["members"], json!(["Ada"]));
        assert_eq!(foxes["projects"], json!(["den-finder"]));
    }

    #[tokio::test]
    async fn reassigning_moves_project_between_team_lists() {
        let app = TestApp::spawn().await;
        let res = app
            .edit(
                DRAFT,
                json!([{ "op": "reassignProjectTeam", "projectId": "launchpad", "teamId": "owls" }]),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let stored = app.stored_file_data(DRAFT).await;
        assert_eq!(stored.team_project_ids("rockets"), vec!["fuel-gauge".to_string()]);
        assert_eq!(
            stored.team_project_ids("owls"),
            vec!["launchpad".to_string(), "night-vision".to_string()]
        );
    }

    #[tokio::test]
    async fn colliding_names_get_distinct_ids() {
        let app = TestApp::spawn().await;
        let res = app
            .edit(DRAFT, json!([{ "op": "addTeam", "name": "Rockets" }]))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["outcomes"][0]["id"], "rockets-2");
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn unconfirmed_team_deletion_returns_warning() {
        let app = TestApp::spawn().await;
        let res = app
            .edit(DRAFT, json!([{ "op": "deleteTeam", "id": "rockets" }]))
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFIRMATION_REQUIRED");
        assert_eq!(res.body["editIndex"], 0);
        assert!(res.text.contains("2 project(s)"));
        assert_eq!(app.stored_file_data(DRAFT).await, dataset());
    }

    #[tokio::test]
    async fn confirmed_team_deletion_cascades() {
        let app = TestApp::spawn().await;
        let res = app
            .edit(
                DRAFT,
                json!([{ "op": "deleteTeam", "id": "rockets", "confirmed": true }]),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["outcomes"][0]["result"], "deleted");
        assert_eq!(
            res.body["outcomes"][0]["removedProjects"],
            json!(["launchpad", "fuel-gauge"])
        );

        let stored = app.stored_file_data(DRAFT).await;
        assert!(stored.team("rockets").is_none());
        assert_eq!(stored.projects.len(), 1);
        assert_eq!(stored.projects[0].id, "night-vision");
    }

    #[tokio::test]
    async fn deleting_selected_project_clears_selection() {
        let app = TestApp::spawn().await;
        let res = app
            .post_as_admin(
                &routes::edits(DRAFT),
                &json!({
                    "selectedProject": "launchpad",
                    "edits": [{ "op": "deleteProject", "id": "launchpad", "confirmed": true }],
                }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["outcomes"][0]["clearedSelection"], true);
        assert!(res.body["selectedProject"].is_null());
    }

    #[tokio::test]
    async fn deleting_award_clears_it_from_projects() {
        let app = TestApp::spawn().await;
        let res = app
            .edit(
                DRAFT,
                json!([{ "op": "deleteAward", "id": "best-demo", "confirmed": true }]),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["outcomes"][0]["projectsUnawarded"], 1);

        let stored = app.stored_file_data(DRAFT).await;
        assert!(stored.config.special_awards.is_empty());
        assert!(stored.projects.iter().all(|p| p.special_awards.is_empty()));
    }
}

mod batches {
    use super::*;

    #[tokio::test]
    async fn rejected_edit_discards_whole_batch() {
        let app = TestApp::spawn().await;
        let res = app
            .edit(
                DRAFT,
                json!([
                    { "op": "setTitle", "projectId": "launchpad", "title": "Renamed" },
                    { "op": "addProject", "title": "Orphan", "teamId": "ghosts" },
                ]),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert_eq!(res.body["editIndex"], 1);
        assert_eq!(app.stored_file_data(DRAFT).await, dataset());
    }

    #[tokio::test]
    async fn unknown_operation_is_a_validation_error() {
        let app = TestApp::spawn().await;
        let res = app.edit(DRAFT, json!([{ "op": "explode" }])).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn empty_batch_is_rejected() {
        let app = TestApp::spawn().await;
        let res = app.edit(DRAFT, json!([])).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn selecting_unknown_project_is_not_found() {
        let app = TestApp::spawn().await;
        let res = app
            .post_as_admin(
                &routes::edits(DRAFT),
                &json!({
                    "selectedProject": "ghost-project",
                    "edits": [{ "op": "setTitle", "projectId": "launchpad", "title": "X" }],
                }),
            )
            .await;

        assert_eq!(res.status, 404);
    }
}
