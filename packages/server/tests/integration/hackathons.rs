use crate::common::{DRAFT, PUBLISHED, TestApp, routes};
use serde_json::json;

mod registry {
    use super::*;

    #[tokio::test]
    async fn lists_every_hackathon_in_order() {
        let app = TestApp::spawn().await;
        let res = app.get(routes::HACKATHONS).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let ids: Vec<&str> = res.body["hackathons"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| h["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec![DRAFT, PUBLISHED]);
        assert_eq!(res.body["hackathons"][0]["dataFile"], "spring-2025.json");
        assert_eq!(res.body["hackathons"][1]["resultsPublished"], true);
    }

    #[tokio::test]
    async fn unknown_hackathon_is_not_found() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::hackathon("winter-2030")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn admin_can_publish_results() {
        let app = TestApp::spawn().await;
        let res = app
            .patch_as_admin(&routes::hackathon(DRAFT), &json!({ "resultsPublished": true }))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["resultsPublished"], true);
        assert_eq!(res.body["name"], "Spring Hack");

        let reread = app.get(&routes::hackathon(DRAFT)).await;
        assert_eq!(reread.body["resultsPublished"], true);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let app = TestApp::spawn().await;
        let res = app
            .patch_as_admin(&routes::hackathon(DRAFT), &json!({ "name": "  " }))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn replacing_registry_rejects_duplicate_ids() {
        let app = TestApp::spawn().await;
        let entry = json!({ "id": "x", "name": "X", "dataFile": "x.json" });
        let res = app
            .put_as_admin(routes::HACKATHONS, &json!({ "hackathons": [entry, entry] }))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn registry_edits_require_admin() {
        let app = TestApp::spawn().await;
        let res = app
            .client
            .patch(format!("http://{}{}", app.addr, routes::hackathon(DRAFT)))
            .json(&json!({ "resultsPublished": true }))
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 401);
    }
}

mod leaderboard {
    use super::*;

    #[tokio::test]
    async fn draft_hides_ranking_and_scores() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::leaderboard(DRAFT)).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["resultsPublished"], false);
        assert!(res.body["podium"].as_array().unwrap().is_empty());

        let others = res.body["others"].as_array().unwrap();
        let titles: Vec<&str> = others.iter().map(|e| e["title"].as_str().unwrap()).collect();
        assert_eq!(titles, vec!["Fuel Gauge", "Launchpad", "Night Vision"]);
        assert!(others.iter().all(|e| e["overallScore"].is_null()));
    }

    #[tokio::test]
    async fn published_shows_podium_by_score() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::leaderboard(PUBLISHED)).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let podium: Vec<&str> = res.body["podium"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["projectId"].as_str().unwrap())
            .collect();
        assert_eq!(podium, vec!["night-vision", "launchpad", "fuel-gauge"]);
        assert_eq!(res.body["podium"][0]["place"], 1);
        assert_eq!(res.body["podium"][0]["overallScore"], 5.0);
        assert_eq!(res.body["podium"][0]["teamName"], "Owls");
        assert_eq!(res.body["reviewed"], 3);
        assert_eq!(res.body["total"], 3);
    }

    #[tokio::test]
    async fn lists_award_winners() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::leaderboard(DRAFT)).await;

        let winners = res.body["awardWinners"].as_array().unwrap();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0]["projectId"], "night-vision");
        assert_eq!(winners[0]["awards"][0]["name"], "Best Demo");
    }
}

mod pages {
    use super::*;

    #[tokio::test]
    async fn team_page_lists_owned_projects_with_scores() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::team(DRAFT, "rockets")).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["team"]["name"], "Rockets");
        assert_eq!(res.body["hackathon"]["id"], DRAFT);

        let projects = res.body["projects"].as_array().unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0]["id"], "launchpad");
        assert_eq!(projects[1]["overallScore"], 2.0);
        assert_eq!(projects[1]["scores"]["polish"], 2);
    }

    #[tokio::test]
    async fn team_page_links_neighbours_alphabetically() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::team(DRAFT, "rockets")).await;

        // Alphabetical walk: Fuel Gauge, Launchpad, Night Vision.
        let launchpad = &res.body["projects"][0];
        assert_eq!(launchpad["previous"]["id"], "fuel-gauge");
        assert_eq!(launchpad["next"]["id"], "night-vision");
        assert_eq!(launchpad["next"]["teamName"], "Owls");

        let fuel_gauge = &res.body["projects"][1];
        assert!(fuel_gauge["previous"].is_null());
    }

    #[tokio::test]
    async fn unknown_team_is_not_found() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::team(DRAFT, "ghosts")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn project_view_resolves_awards() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::project(DRAFT, "night-vision")).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["teamId"], "owls");
        assert_eq!(res.body["overallScore"], 5.0);
        assert_eq!(res.body["awards"][0]["emoji"], "🎤");
    }
}
