mod support;

use std::sync::Arc;

use actix_web::{test, web, App};
use greenquest_backend::routes;
use serde_json::Value;
use support::{
    decode_payload, test_realtime_config, test_state, MockSessionGateway,
    RecordingRealtimeAdmin,
};

async fn call_feed_endpoint(state: greenquest_backend::AppState) -> (u16, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/realtime/feed-token")
        .insert_header(("Authorization", "Bearer session-credential"))
        .to_request();

    let resp = test::call_service(&app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

#[actix_web::test]
async fn feed_token_lives_for_a_day() {
    let admin = Arc::new(RecordingRealtimeAdmin::default());
    let state = test_state(
        MockSessionGateway::authenticated(),
        admin,
        test_realtime_config(),
    );

    let (status, body) = call_feed_endpoint(state).await;

    assert_eq!(status, 200);
    let payload = decode_payload(body["token"].as_str().unwrap());
    assert_eq!(
        payload["exp"].as_i64().unwrap() - payload["iat"].as_i64().unwrap(),
        86_400
    );
}

#[actix_web::test]
async fn feed_token_provisions_follows_not_channels() {
    let admin = Arc::new(RecordingRealtimeAdmin::default());
    let state = test_state(
        MockSessionGateway::authenticated(),
        admin.clone(),
        test_realtime_config(),
    );

    let (status, body) = call_feed_endpoint(state).await;

    assert_eq!(status, 200);
    // Feed responses carry no community flag.
    assert!(body.get("communityEnabled").is_none());

    let entries = admin.entries();
    assert!(entries.contains(
        &"follow timeline:11111111_1111_1111_1111_111111111111 -> community:global".to_string()
    ));
    assert!(!entries.iter().any(|e| e.starts_with("ensure_channel")));
    assert!(!entries.iter().any(|e| e.starts_with("add_member")));
}

#[actix_web::test]
async fn feed_token_without_community_feed_only_upserts() {
    let admin = Arc::new(RecordingRealtimeAdmin::default());
    let mut cfg = test_realtime_config();
    cfg.community_feed = None;
    let state = test_state(MockSessionGateway::authenticated(), admin.clone(), cfg);

    let (status, _body) = call_feed_endpoint(state).await;

    assert_eq!(status, 200);
    assert_eq!(admin.call_count(), 1);
    assert!(admin.entries()[0].starts_with("upsert_user"));
}
