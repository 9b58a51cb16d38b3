use super::*;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde_json::json;
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

#[derive(Clone, Default)]
struct ServerState {
    visa_tx: Arc<Mutex<Option<oneshot::Sender<(String, Value)>>>>,
}

async fn handle_countries() -> Json<Value> {
    Json(json!({ "countries": ["United States", "Canada", "France"] }))
}

async fn handle_countries_malformed() -> Json<Value> {
    Json(json!({ "countries": "not-an-array" }))
}

async fn handle_visa_types(Path(country): Path<String>) -> impl IntoResponse {
    if country == "Atlantis" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "catalog shard unavailable" })),
        )
            .into_response();
    }
    Json(json!({
        "visa_types": [
            { "visa_type": "B-1/B-2", "description": format!("Visitor visa for {country}") }
        ]
    }))
    .into_response()
}

async fn handle_create_visa(
    State(state): State<ServerState>,
    Path(country): Path<String>,
    Json(payload): Json<Value>,
) -> Json<Value> {
    if let Some(tx) = state.visa_tx.lock().await.take() {
        let _ = tx.send((country, payload.clone()));
    }
    Json(payload)
}

async fn handle_update_visa(Path((_country, visa_type)): Path<(String, String)>) -> Json<Value> {
    Json(json!({ "visa_type": visa_type }))
}

async fn handle_delete_unknown_visa() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn handle_experts_bare() -> Json<Value> {
    Json(json!([{ "name": "Sarah Jenkins", "title": "Attorney" }]))
}

async fn handle_experts_enveloped(Path(country): Path<String>) -> Json<Value> {
    Json(json!({ "experts": [{ "name": "Rajesh Patel", "title": "Consultant", "country": country }] }))
}

async fn handle_experts_broken() -> impl IntoResponse {
    (StatusCode::BAD_GATEWAY, Json(json!({ "error": "upstream down" })))
}

async fn spawn_catalog_server() -> (String, oneshot::Receiver<(String, Value)>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = oneshot::channel();
    let state = ServerState {
        visa_tx: Arc::new(Mutex::new(Some(tx))),
    };
    let app = Router::new()
        .route("/countries", get(handle_countries))
        .route("/malformed/countries", get(handle_countries_malformed))
        .route("/visas/:country", get(handle_visa_types).post(handle_create_visa))
        .route(
            "/visas/:country/:visa_type",
            put(handle_update_visa).delete(handle_delete_unknown_visa),
        )
        .route("/experts", get(handle_experts_bare))
        .route("/experts/country/:country", get(handle_experts_enveloped))
        .route("/experts/visa/:visa_type", get(handle_experts_broken))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), rx)
}

#[tokio::test]
async fn lists_countries_from_enveloped_body() {
    let (server_url, _rx) = spawn_catalog_server().await;
    let catalog = HttpRemoteCatalog::new(&server_url).expect("client");

    let listed = catalog.list_countries().await.expect("countries");
    assert_eq!(
        listed,
        vec![
            Country::from("United States"),
            Country::from("Canada"),
            Country::from("France"),
        ]
    );
}

#[tokio::test]
async fn rejects_countries_body_without_array_envelope() {
    let (server_url, _rx) = spawn_catalog_server().await;
    let catalog =
        HttpRemoteCatalog::new(&format!("{server_url}/malformed")).expect("client");

    let err = catalog.list_countries().await.expect_err("must fail");
    assert!(matches!(err, CatalogError::Decode { .. }));
    assert_eq!(
        err.user_message(),
        "invalid response format from countries"
    );
}

#[tokio::test]
async fn visa_listing_encodes_country_path_segment() {
    let (server_url, _rx) = spawn_catalog_server().await;
    let catalog = HttpRemoteCatalog::new(&server_url).expect("client");

    let records = catalog
        .list_visa_types(&Country::from("United States"))
        .await
        .expect("visa types");
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0]["description"],
        "Visitor visa for United States"
    );
}

#[tokio::test]
async fn visa_listing_surfaces_server_message_with_country_context() {
    let (server_url, _rx) = spawn_catalog_server().await;
    let catalog = HttpRemoteCatalog::new(&server_url).expect("client");

    let err = catalog
        .list_visa_types(&Country::from("Atlantis"))
        .await
        .expect_err("must fail");
    match &err {
        CatalogError::Server { context, status, .. } => {
            assert_eq!(context, "visa types for Atlantis");
            assert_eq!(*status, StatusCode::INTERNAL_SERVER_ERROR);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.user_message(), "catalog shard unavailable");
}

#[tokio::test]
async fn create_visa_posts_payload_to_country_route() {
    let (server_url, payload_rx) = spawn_catalog_server().await;
    let catalog = HttpRemoteCatalog::new(&server_url).expect("client");

    let visa = VisaType {
        visa_type: "H-1B".to_string(),
        description: "Temporary work visa".to_string(),
        eligible_applicants: vec!["Professionals".to_string()],
        duration: "Up to 6 years".to_string(),
        exempted_countries: Vec::new(),
        restricted_countries: Vec::new(),
    };
    catalog
        .create_visa(&Country::from("United States"), &visa)
        .await
        .expect("create");

    let (country, payload) = payload_rx.await.expect("captured payload");
    assert_eq!(country, "United States");
    assert_eq!(payload["visa_type"], "H-1B");
    assert_eq!(payload["eligible_applicants"], json!(["Professionals"]));
}

#[tokio::test]
async fn missing_visa_route_maps_to_not_found() {
    let (server_url, _rx) = spawn_catalog_server().await;
    let catalog = HttpRemoteCatalog::new(&server_url).expect("client");

    let err = catalog
        .delete_visa(&Country::from("United States"), "Q-9")
        .await
        .expect_err("must fail");
    assert!(matches!(err, CatalogError::NotFound { .. }));
}

#[tokio::test]
async fn expert_listing_accepts_bare_and_enveloped_arrays() {
    let (server_url, _rx) = spawn_catalog_server().await;
    let catalog = HttpRemoteCatalog::new(&server_url).expect("client");

    let bare = catalog.list_experts(&ExpertSearch::default()).await;
    assert_eq!(bare.len(), 1);
    assert_eq!(bare[0]["name"], "Sarah Jenkins");

    let enveloped = catalog
        .list_experts_by_country(&Country::from("Canada"))
        .await;
    assert_eq!(enveloped.len(), 1);
    assert_eq!(enveloped[0]["name"], "Rajesh Patel");
}

#[tokio::test]
async fn failing_expert_listing_is_swallowed_to_empty() {
    let (server_url, _rx) = spawn_catalog_server().await;
    let catalog = HttpRemoteCatalog::new(&server_url).expect("client");

    let listed = catalog.list_experts_by_visa_type("B-1/B-2").await;
    assert!(listed.is_empty());
}

#[test]
fn server_errors_resolve_user_messages_in_priority_order() {
    let err = CatalogError::Server {
        context: "experts".to_string(),
        status: StatusCode::BAD_GATEWAY,
        body: ErrorBody::default(),
    };
    assert_eq!(err.user_message(), "server returned status 502 Bad Gateway");

    let err = CatalogError::Server {
        context: "experts".to_string(),
        status: StatusCode::BAD_GATEWAY,
        body: ErrorBody {
            message: None,
            error: Some("upstream down".to_string()),
        },
    };
    assert_eq!(err.user_message(), "upstream down");
}

#[test]
fn mock_datasets_keep_their_fixed_shapes() {
    assert_eq!(mock::mock_countries().len(), 20);
    assert_eq!(
        mock::mock_visa_types(&Country::from("United States")).len(),
        3
    );
    let generic = mock::mock_visa_types(&Country::from("Portugal"));
    assert_eq!(generic.len(), 2);
    assert_eq!(generic[0].description, "Tourist visa for Portugal");
    assert_eq!(mock::mock_experts().len(), 3);
}
