use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use spy_cats::api::{create_router, AppState};
use spy_cats::db::Database;
use spy_cats::models::*;
use spy_cats::services::BreedCatalog;

fn setup() -> TestServer {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    let state = AppState::new(db, BreedCatalog::fixed(["Siamese", "Bengal", "Persian"]));
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

async fn create_test_cat(server: &TestServer, name: &str) -> Cat {
    let response = server
        .post("/cats")
        .json(&json!({
            "name": name,
            "breed": "Bengal",
            "years_of_experience": 3,
            "salary": 1000.0
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Cat>()
}

async fn create_test_mission(server: &TestServer, body: Value) -> MissionWithTargets {
    let response = server.post("/missions").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<MissionWithTargets>()
}

mod cats {
    use super::*;

    #[tokio::test]
    async fn creates_and_fetches_a_cat() {
        let server = setup();
        let cat = create_test_cat(&server, "Tom").await;

        let response = server.get(&format!("/cats/{}", cat.id)).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Cat>().name, "Tom");
    }

    #[tokio::test]
    async fn rejects_unknown_breed() {
        let server = setup();

        let response = server
            .post("/cats")
            .json(&json!({ "name": "Rex", "breed": "Labrador", "salary": 10.0 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("Labrador"));
    }

    #[tokio::test]
    async fn rejects_negative_salary() {
        let server = setup();

        let response = server
            .post("/cats")
            .json(&json!({ "name": "Tom", "breed": "Bengal", "salary": -5.0 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn updates_salary_only() {
        let server = setup();
        let cat = create_test_cat(&server, "Tom").await;

        let response = server
            .put(&format!("/cats/{}", cat.id))
            .json(&json!({ "salary": 4200.0 }))
            .await;

        response.assert_status_ok();
        let updated: Cat = response.json();
        assert_eq!(updated.salary, 4200.0);
        assert_eq!(updated.breed, "Bengal");
    }

    #[tokio::test]
    async fn deletes_a_cat() {
        let server = setup();
        let cat = create_test_cat(&server, "Tom").await;

        server
            .delete(&format!("/cats/{}", cat.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get(&format!("/cats/{}", cat.id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn lists_cats() {
        let server = setup();
        create_test_cat(&server, "Tom").await;
        create_test_cat(&server, "Felix").await;

        let cats: Vec<Cat> = server.get("/cats").await.json();
        assert_eq!(cats.len(), 2);
    }
}

mod missions {
    use super::*;

    #[tokio::test]
    async fn runs_a_mission_to_completion() {
        let server = setup();
        let cat = create_test_cat(&server, "Tom").await;

        let created = create_test_mission(
            &server,
            json!({ "cat_id": cat.id, "targets": ["Paris", "Berlin"] }),
        )
        .await;
        assert_eq!(created.mission.status, Status::Ongoing);
        assert_eq!(created.targets.len(), 2);
        assert!(created.targets.iter().all(|t| t.status == Status::Ongoing));

        for target in &created.targets {
            server
                .patch(&format!("/targets/{}/complete", target.id))
                .await
                .assert_status_ok();
        }

        let mission: MissionWithTargets = server
            .get(&format!("/missions/{}", created.mission.id))
            .await
            .json();
        assert_eq!(mission.mission.status, Status::Completed);
        assert!(mission.mission.completed_at.is_some());
    }

    #[tokio::test]
    async fn serializes_status_in_upper_case() {
        let server = setup();
        create_test_mission(&server, json!({ "targets": ["Paris"] })).await;

        let body: Value = server.get("/missions").await.json();
        assert_eq!(body[0]["status"], "ONGOING");
        assert_eq!(body[0]["targets"][0]["status"], "ONGOING");
        assert!(body[0]["cat_id"].is_null());
    }

    #[tokio::test]
    async fn rejects_too_many_targets() {
        let server = setup();

        server
            .post("/missions")
            .json(&json!({ "targets": ["a", "b", "c", "d"] }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn forbids_a_second_mission_for_a_busy_cat() {
        let server = setup();
        let cat = create_test_cat(&server, "Tom").await;
        create_test_mission(&server, json!({ "cat_id": cat.id, "targets": ["Paris"] })).await;

        server
            .post("/missions")
            .json(&json!({ "cat_id": cat.id, "target_names": ["Oslo"] }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn assigns_a_cat() {
        let server = setup();
        let cat = create_test_cat(&server, "Tom").await;
        let created = create_test_mission(&server, json!({ "targets": ["Paris"] })).await;

        let response = server
            .patch(&format!(
                "/missions/{}/assign-cat/{}",
                created.mission.id, cat.id
            ))
            .await;

        response.assert_status_ok();
        let mission: MissionWithTargets = response.json();
        assert_eq!(mission.mission.cat_id, Some(cat.id));
    }

    #[tokio::test]
    async fn forbids_deleting_an_assigned_mission() {
        let server = setup();
        let cat = create_test_cat(&server, "Tom").await;
        let assigned =
            create_test_mission(&server, json!({ "cat_id": cat.id, "targets": ["Paris"] })).await;
        let free = create_test_mission(&server, json!({ "targets": ["Rome"] })).await;

        server
            .delete(&format!("/missions/{}", assigned.mission.id))
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server
            .delete(&format!("/missions/{}", free.mission.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn force_completes_a_mission() {
        let server = setup();
        let created = create_test_mission(&server, json!({ "targets": ["Paris"] })).await;
        let path = format!("/missions/{}/complete", created.mission.id);

        let response = server.patch(&path).await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<MissionWithTargets>().mission.status,
            Status::Completed
        );

        server.patch(&path).await.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn missing_mission_is_not_found() {
        let server = setup();

        server
            .get("/missions/123")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

mod targets {
    use super::*;

    #[tokio::test]
    async fn adds_a_target_to_a_mission() {
        let server = setup();
        let created = create_test_mission(&server, json!({ "targets": ["Paris"] })).await;

        let response = server
            .post(&format!("/missions/{}/targets", created.mission.id))
            .json(&json!({ "name": "Lyon", "country": "France" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let target: Target = response.json();
        assert_eq!(target.mission_id, created.mission.id);
        assert_eq!(target.country.as_deref(), Some("France"));
    }

    #[tokio::test]
    async fn forbids_deleting_the_last_target() {
        let server = setup();
        let created = create_test_mission(&server, json!({ "targets": ["Paris"] })).await;

        server
            .delete(&format!("/targets/{}", created.targets[0].id))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn forbids_completing_twice() {
        let server = setup();
        let created = create_test_mission(&server, json!({ "targets": ["Paris", "Berlin"] })).await;
        let path = format!("/targets/{}/complete", created.targets[0].id);

        server.patch(&path).await.assert_status_ok();
        server.patch(&path).await.assert_status(StatusCode::FORBIDDEN);
    }
}

mod notes {
    use super::*;

    #[tokio::test]
    async fn writes_notes_until_the_target_completes() {
        let server = setup();
        let created = create_test_mission(&server, json!({ "targets": ["Paris", "Berlin"] })).await;
        let target_id = created.targets[0].id;

        let response = server
            .post(&format!("/targets/{}/notes", target_id))
            .json(&json!({ "content": "Seen at the cafe" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let note: Note = response.json();

        server
            .put(&format!("/notes/{}", note.id))
            .json(&json!({ "content": "Left by train" }))
            .await
            .assert_status_ok();

        server
            .patch(&format!("/targets/{}/complete", target_id))
            .await
            .assert_status_ok();

        server
            .put(&format!("/notes/{}", note.id))
            .json(&json!({ "content": "Too late" }))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        let notes: Vec<Note> = server
            .get(&format!("/targets/{}/notes", target_id))
            .await
            .json();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "Left by train");
    }
}

mod malformed_input {
    use super::*;

    fn error_message(body: &Value) -> &str {
        body["error"].as_str().expect("Response has no error message")
    }

    #[tokio::test]
    async fn mission_without_targets_is_a_bad_request() {
        let server = setup();

        let response = server.post("/missions").json(&json!({ "cat_id": 0 })).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(error_message(&body).contains("targets"));
    }

    #[tokio::test]
    async fn mistyped_field_is_a_bad_request() {
        let server = setup();

        let response = server
            .post("/cats")
            .json(&json!({ "name": "Tom", "breed": "Bengal", "salary": "lots" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(!error_message(&body).is_empty());
        assert!(server.get("/cats").await.json::<Vec<Cat>>().is_empty());
    }

    #[tokio::test]
    async fn non_numeric_id_is_a_bad_request() {
        let server = setup();

        let response = server.get("/cats/tom").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(!error_message(&body).is_empty());
    }
}
