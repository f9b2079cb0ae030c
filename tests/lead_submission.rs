// tests/lead_submission.rs

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{json_body, post_json, send, test_app, MemoryLeadStore, ScriptedCrm, ScriptedNotifier};

fn form() -> Value {
    json!({
        "name": "Aziz Karimov",
        "phone": "+998901234567",
        "region": "samarkand",
        "message": "Narxi qancha?"
    })
}

#[tokio::test]
async fn happy_path_stores_lead_and_dispatches_both() {
    let app = test_app(MemoryLeadStore::default(), ScriptedCrm::accepting("555"), ScriptedNotifier::ok());

    let response = send(&app.router, post_json("/api/contact", &form())).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Xabar yuborildi!");

    let leads = app.store.all();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].crm_lead_id.as_deref(), Some("555"));
    // O chat viu o lead já com o id do CRM
    assert_eq!(app.notifier.seen.lock().unwrap()[0].crm_lead_id.as_deref(), Some("555"));
}

#[tokio::test]
async fn crm_failure_still_notifies_chat_and_returns_201() {
    let app = test_app(MemoryLeadStore::default(), ScriptedCrm::failing(), ScriptedNotifier::ok());

    let response = send(&app.router, post_json("/api/contact", &form())).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(*app.crm.calls.lock().unwrap(), 1);
    assert_eq!(app.notifier.seen.lock().unwrap().len(), 1);
    assert_eq!(app.store.all()[0].crm_status.as_deref(), Some("failed"));
}

#[tokio::test]
async fn both_integrations_failing_keeps_the_lead() {
    let app = test_app(MemoryLeadStore::default(), ScriptedCrm::failing(), ScriptedNotifier::failing());

    let response = send(&app.router, post_json("/api/contact", &form())).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await["success"], true);
    assert_eq!(app.store.all().len(), 1);
}

#[tokio::test]
async fn bad_visitor_uid_is_rejected_without_record() {
    let app = test_app(MemoryLeadStore::default(), ScriptedCrm::accepting("1"), ScriptedNotifier::ok());
    let mut body = form();
    body["visitor_uid"] = json!("bad!uid");

    let response = send(&app.router, post_json("/api/contact", &body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["details"]["visitor_uid"].is_array());
    assert!(app.store.all().is_empty());
    assert_eq!(*app.crm.calls.lock().unwrap(), 0);
    assert!(app.notifier.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn dashed_visitor_uid_is_accepted() {
    let app = test_app(MemoryLeadStore::default(), ScriptedCrm::accepting("1"), ScriptedNotifier::ok());
    let mut body = form();
    body["visitor_uid"] = json!("abc-123_ok");

    let response = send(&app.router, post_json("/api/contact", &body)).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(app.store.all()[0].visitor_uid.as_deref(), Some("abc-123_ok"));
}

#[tokio::test]
async fn explicit_utm_wins_over_referer_header() {
    let app = test_app(MemoryLeadStore::default(), ScriptedCrm::accepting("1"), ScriptedNotifier::ok());
    let mut body = form();
    body["utm_data"] = json!({"utm_source": "google"});

    let mut request = post_json("/api/contact", &body);
    request
        .headers_mut()
        .insert("referer", "https://faw.uz/?utm_source=fb&utm_medium=cpc".parse().unwrap());

    let response = send(&app.router, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let lead = &app.store.all()[0];
    let utm: Value = serde_json::from_str(lead.utm_data.as_deref().unwrap()).unwrap();
    assert_eq!(utm, json!({"utm_source": "google"}));
    assert_eq!(lead.referer.as_deref(), Some("https://faw.uz/?utm_source=fb&utm_medium=cpc"));
}

#[tokio::test]
async fn referer_header_supplies_utm() {
    let app = test_app(MemoryLeadStore::default(), ScriptedCrm::accepting("1"), ScriptedNotifier::ok());

    let mut request = post_json("/api/contact", &form());
    request
        .headers_mut()
        .insert("referer", "https://faw.uz/?utm_source=fb&utm_medium=cpc&gclid=x".parse().unwrap());

    send(&app.router, request).await;

    let utm: Value = serde_json::from_str(app.store.all()[0].utm_data.as_deref().unwrap()).unwrap();
    assert_eq!(utm, json!({"utm_source": "fb", "utm_medium": "cpc"}));
}

#[tokio::test]
async fn storage_failure_is_a_generic_500_and_skips_dispatch() {
    let app = test_app(MemoryLeadStore::failing(), ScriptedCrm::accepting("1"), ScriptedNotifier::ok());

    let mut request = post_json("/api/contact", &form());
    request.headers_mut().insert("accept-language", "ru-RU,ru;q=0.9".parse().unwrap());

    let response = send(&app.router, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Произошла ошибка.");
    assert_eq!(*app.crm.calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn validation_messages_follow_query_language() {
    let app = test_app(MemoryLeadStore::default(), ScriptedCrm::accepting("1"), ScriptedNotifier::ok());
    let body = json!({"name": "Ali", "phone": "+998", "region": "moscow"});

    let response = send(&app.router, post_json("/api/contact?language=en", &body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["details"]["region"][0], "Not a valid choice.");
}

#[tokio::test]
async fn malformed_product_id_is_a_400_naming_the_field() {
    let app = test_app(MemoryLeadStore::default(), ScriptedCrm::accepting("1"), ScriptedNotifier::ok());
    let mut body = form();
    body["product"] = json!("not-a-uuid");

    let response = send(&app.router, post_json("/api/contact?language=en", &body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "One or more fields are invalid.");
    assert_eq!(body["details"]["product"][0], "Value has the wrong type.");
    assert!(app.store.all().is_empty());
    assert_eq!(*app.crm.calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn wrong_json_types_name_each_field() {
    let app = test_app(MemoryLeadStore::default(), ScriptedCrm::accepting("1"), ScriptedNotifier::ok());
    let mut body = form();
    body["region"] = json!(5);
    body["visitor_uid"] = json!(123);

    let response = send(&app.router, post_json("/api/contact", &body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let details = &json_body(response).await["details"];
    assert!(details["region"].is_array());
    assert!(details["visitor_uid"].is_array());
    assert!(details.get("name").is_none());
    assert!(app.store.all().is_empty());
}

#[tokio::test]
async fn broken_json_is_a_400_not_a_422() {
    let app = test_app(MemoryLeadStore::default(), ScriptedCrm::accepting("1"), ScriptedNotifier::ok());
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"name\": "))
        .unwrap();

    let response = send(&app.router, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["details"]["body"].is_array());
}
