//! End-to-end HTTP tests for the user directory over embedded PostgreSQL.
//!
//! The database is provisioned before the Actix system starts because the
//! cluster bootstrap blocks.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};
use user_registry::Trace;
use user_registry::domain::UserDirectoryService;
use user_registry::inbound::http::health::{HealthState, health};
use user_registry::inbound::http::state::HttpState;
use user_registry::inbound::http::users::{create_user, delete_user, json_config, list_users};
use user_registry::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};

mod support;

use support::embedded_postgres::migrated_database;
use support::handle_cluster_setup_failure;

async fn send(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    request: actix_test::TestRequest,
) -> (StatusCode, Option<Value>) {
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        None
    } else {
        Some(serde_json::from_slice(&body).expect("JSON body"))
    };
    (status, value)
}

fn post_user(username: &str, email: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/user")
        .set_json(json!({ "username": username, "email": email }))
}

#[rstest]
fn user_lifecycle_over_http() {
    let database = match migrated_database() {
        Ok(database) => database,
        Err(reason) => {
            let _: Option<()> = handle_cluster_setup_failure(reason);
            eprintln!("SKIP-TEST-CLUSTER: user_lifecycle_over_http skipped");
            return;
        }
    };
    let database_url = database.url().to_string();

    actix_web::rt::System::new().block_on(async move {
        let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(2))
            .await
            .expect("pool builds");
        let repository = Arc::new(DieselUserRepository::new(pool.clone()));
        let service = Arc::new(UserDirectoryService::new(repository));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::new(service.clone(), service)))
                .app_data(web::Data::new(HealthState::new(Arc::new(pool))))
                .app_data(json_config())
                .wrap(Trace)
                .service(create_user)
                .service(list_users)
                .service(delete_user)
                .service(health),
        )
        .await;

        let (status, body) = send(&app, post_user("alice", "a@x.com")).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, Some(json!({ "userId": 1 })));

        let (status, body) = send(&app, post_user("bob", "b@x.com")).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, Some(json!({ "userId": 2 })));

        let (status, body) = send(&app, post_user("carol", "a@x.com")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body.as_ref().and_then(|value| value["message"].as_str()),
            Some("cannot insert user as this email is already used")
        );

        let (status, _) = send(&app, actix_test::TestRequest::delete().uri("/user/1")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, actix_test::TestRequest::delete().uri("/user/1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body.as_ref().and_then(|value| value["message"].as_str()),
            Some("Unable to delete this user as they have already been deleted")
        );

        let (status, body) = send(&app, actix_test::TestRequest::delete().uri("/user/999")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body.as_ref().and_then(|value| value["message"].as_str()),
            Some("Unable to delete this user as they do not exist")
        );

        let (status, body) = send(&app, actix_test::TestRequest::get().uri("/users")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            Some(json!([{ "id": 2, "username": "bob", "email": "b@x.com" }]))
        );

        let (status, body) = send(&app, actix_test::TestRequest::get().uri("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_ref().map(|value| &value["status"]), Some(&json!("up")));
    });
}
