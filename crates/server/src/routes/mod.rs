use crate::state::AppState;
use utoipa_axum::{router::OpenApiRouter, routes};

pub mod auth;
pub mod career;
pub mod exam;
pub mod exam_type;
pub mod health;
pub mod root;
pub mod subject;

/// Routes reachable without a bearer token
pub fn public_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(root::root))
        .routes(routes!(health::health))
}

/// Routes that sit behind token validation
pub fn api_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(auth::me))
        .routes(routes!(career::get_careers))
        .routes(routes!(subject::get_subjects))
        .routes(routes!(exam_type::get_exam_types))
        .routes(routes!(exam::get_exams, exam::create_exam))
        .routes(routes!(exam::get_exam_by_id))
        .routes(routes!(exam::generate_exams))
        .routes(routes!(exam::assign_second_examiner))
        .routes(routes!(exam::update_status))
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::{
        Router,
        body::{self, Body},
        http::{Request, StatusCode},
    };
    use chrono::NaiveTime;
    use database::entities::{careers, groups, professors, rooms, subjects, weekly_slots};
    use migration::{Migrator, MigratorTrait};
    use models::weekday::Weekday;
    use sea_orm::{
        ActiveModelTrait, ActiveValue::Set, ConnectOptions, Database, DatabaseConnection,
    };
    use serde_json::{Value, json};
    use tower::util::ServiceExt;

    async fn setup_db() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    fn new_router(db: DatabaseConnection) -> Router {
        let (router, _) = public_router().merge(api_router()).split_for_parts();
        router.with_state(AppState::new(db))
    }

    /// One career with a group, an instructor, a room, a subject, and a
    /// Friday 09:00 class
    async fn seed(db: &DatabaseConnection) {
        let career = careers::ActiveModel {
            name: Set("Informatics".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        let group = groups::ActiveModel {
            label: Set("4A".to_string()),
            career_id: Set(career.id),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        let professor = professors::ActiveModel {
            name: Set("Barbara Liskov".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        let room = rooms::ActiveModel {
            name: Set("A-101".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        let subject = subjects::ActiveModel {
            name: Set("Operating Systems".to_string()),
            career_id: Set(Some(career.id)),
            professor_id: Set(Some(professor.id)),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        weekly_slots::ActiveModel {
            weekday: Set(Weekday::Friday),
            start_time: Set(NaiveTime::from_hms_opt(9, 0, 0).unwrap()),
            end_time: Set(NaiveTime::from_hms_opt(10, 0, 0).unwrap()),
            group_id: Set(group.id),
            subject_id: Set(Some(subject.id)),
            room_id: Set(Some(room.id)),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let app = new_router(setup_db().await);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_generate_then_review() {
        let db = setup_db().await;
        seed(&db).await;
        let app = new_router(db);

        let (status, exams) = send(&app, "POST", "/generate-exams?career_id=1&group_id=1", None).await;
        assert_eq!(status, StatusCode::OK);
        let exams = exams.as_array().unwrap();
        assert_eq!(exams.len(), 1);
        assert_eq!(exams[0]["exam_type"], "PARCIAL");
        assert_eq!(exams[0]["status"], "draft");
        assert_eq!(exams[0]["group_id"], 1);
        assert_eq!(exams[0]["start_time"], "09:00:00");
        assert_eq!(exams[0]["subject"]["career_name"], "Informatics");

        let id = exams[0]["id"].as_i64().unwrap();
        let (status, body) = send(
            &app,
            "PUT",
            &format!("/exams/{id}/status"),
            Some(json!({ "status": "approved" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "INVALID_TRANSITION");

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/exams/{id}/status"),
            Some(json!({ "status": "submitted" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "submitted");
        assert!(body["submitted_at"].is_string());

        let (status, listed) = send(&app, "GET", "/exams", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_generate_for_unknown_career() {
        let db = setup_db().await;
        seed(&db).await;
        let app = new_router(db);

        let (status, body) =
            send(&app, "POST", "/generate-exams?career_id=9&group_id=1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_second_examiner_assignment() {
        let db = setup_db().await;
        seed(&db).await;
        let app = new_router(db);

        let request = json!({
            "date": "2024-06-03",
            "start_time": "08:00:00",
            "end_time": "10:00:00",
            "exam_type_id": 3,
            "subject_id": 1,
            "room_id": 1,
            "group_id": 1
        });
        let (status, exam) = send(&app, "POST", "/exams", Some(request)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(exam["exam_type"], "Extraordinario");
        let id = exam["id"].as_i64().unwrap();

        // Professor 1 teaches the subject
        let (status, body) = send(
            &app,
            "PUT",
            &format!("/exams/{id}/second-examiner"),
            Some(json!({ "second_examiner_id": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_ASSIGNMENT");

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/exams/{id}/second-examiner"),
            Some(json!({ "second_examiner_id": null })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["second_examiner_id"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_exam_type_and_exam() {
        let db = setup_db().await;
        seed(&db).await;
        let app = new_router(db);

        let request = json!({
            "date": "2024-06-03",
            "start_time": "08:00:00",
            "end_time": "10:00:00",
            "exam_type_id": 42,
            "subject_id": 1,
            "room_id": 1,
            "group_id": 1
        });
        let (status, _) = send(&app, "POST", "/exams", Some(request)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "GET", "/exams/77", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_careers_and_subjects() {
        let db = setup_db().await;
        seed(&db).await;
        let app = new_router(db);

        let (status, careers) = send(&app, "GET", "/careers", None).await;
        assert_eq!(status, StatusCode::OK);
        let slot = &careers[0]["groups"][0]["weekly_slots"][0];
        assert_eq!(slot["weekday"], "FRIDAY");
        assert_eq!(slot["subject"]["professor"]["name"], "Barbara Liskov");
        assert_eq!(slot["room"]["name"], "A-101");

        let (status, subjects) = send(&app, "GET", "/subjects?career_id=1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(subjects.as_array().unwrap().len(), 1);

        let (_, types) = send(&app, "GET", "/exam-types", None).await;
        assert_eq!(types.as_array().unwrap().len(), 3);
    }
}
