//! REST gateway integration tests
//!
//! Runs the gateways against a small in-process backend bound to loopback.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use llantera_core::api::{ApiClient, Backend};
use llantera_core::auth::{MemoryTokenStore, NoopRouter, SessionGuard, SessionStatus, TokenStore};
use llantera_core::collection::{CollectionController, CollectionGateway, FetchOutcome};
use llantera_core::config::ClientConfig;
use llantera_core::models::{PageQuery, Supplier};
use llantera_core::Error;

const TOKEN: &str = "tok-admin";

// ============================================================================
// Fake backend
// ============================================================================

#[derive(Default)]
struct BackendState {
    requests: Vec<String>,
    last_query: HashMap<String, String>,
    last_body: Option<Value>,
    fail_suppliers: bool,
}

type Shared = Arc<Mutex<BackendState>>;

#[derive(Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"message": "Token expired"}))).into_response()
}

fn record(state: &Shared, line: &str) {
    state.lock().unwrap().requests.push(line.to_string());
}

async fn signin(State(state): State<Shared>, Form(creds): Form<Credentials>) -> Response {
    record(&state, "POST /users/signin");
    if creds.username == "admin" && creds.password == "secret" {
        Json(json!({"token": TOKEN})).into_response()
    } else {
        (StatusCode::FORBIDDEN, Json(json!({"message": "Bad credentials"}))).into_response()
    }
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Response {
    record(&state, "GET /users/me");
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({"id": 1, "username": "admin", "email": "admin@llantera.pe", "roles": ["ROLE_ADMIN"]}))
        .into_response()
}

async fn list_customers(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&state, "GET /customers");
    if !authorized(&headers) {
        return unauthorized();
    }
    state.lock().unwrap().last_query = params;
    Json(json!({
        "content": [
            {"id": 1, "name": "Juan Perez", "dni": "12345678"},
            {"id": 2, "name": "Transportes Andinos", "ruc": "20123456789", "businessName": "Transportes Andinos SAC"}
        ],
        "number": 0,
        "size": 10,
        "totalPages": 1,
        "totalElements": 2
    }))
    .into_response()
}

async fn update_customer(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    record(&state, &format!("PUT /customers/{}", id));
    let mut saved = body.clone();
    saved["id"] = json!(id);
    state.lock().unwrap().last_body = Some(body);
    Json(saved).into_response()
}

async fn delete_customer(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    record(&state, &format!("DELETE /customers/{}", id));
    if id == 1 {
        StatusCode::OK.into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"message": "Cliente no encontrado"}))).into_response()
    }
}

async fn dni_lookup(State(state): State<Shared>, Path(dni): Path<String>) -> Response {
    record(&state, &format!("GET /customers/search-dni/{}", dni));
    Json(json!({"dni": dni, "name": "MARIA QUISPE"})).into_response()
}

async fn list_suppliers(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&state, "GET /suppliers");
    let mut s = state.lock().unwrap();
    s.last_query = params;
    if s.fail_suppliers {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    Json(json!({"content": [], "number": 0, "size": 10, "totalPages": 0, "totalElements": 0}))
        .into_response()
}

async fn save_supplier(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    record(&state, "POST /suppliers");
    let mut saved = body.clone();
    if saved.get("id").is_none() {
        saved["id"] = json!(50);
    }
    state.lock().unwrap().last_body = Some(body);
    Json(saved).into_response()
}

async fn export_suppliers(State(state): State<Shared>) -> Response {
    record(&state, "GET /suppliers/export");
    (StatusCode::OK, vec![0x50u8, 0x4b, 0x03, 0x04]).into_response()
}

async fn spawn_backend() -> (SocketAddr, Shared) {
    let state: Shared = Arc::new(Mutex::new(BackendState::default()));
    let app = Router::new()
        .route("/users/signin", post(signin))
        .route("/users/me", get(me))
        .route("/customers", get(list_customers))
        .route("/customers/:id", axum::routing::put(update_customer).delete(delete_customer))
        .route("/customers/search-dni/:dni", get(dni_lookup))
        .route("/suppliers", get(list_suppliers).post(save_supplier))
        .route("/suppliers/export", get(export_suppliers))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, state)
}

fn backend_for(addr: SocketAddr, store: Arc<MemoryTokenStore>) -> Backend {
    let config = ClientConfig::default().with_api_url(format!("http://{}/", addr));
    Backend::new(ApiClient::new(&config, store).unwrap())
}

fn requests(state: &Shared) -> Vec<String> {
    state.lock().unwrap().requests.clone()
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_login_stores_token_and_verifies() {
    let (addr, state) = spawn_backend().await;
    let store = Arc::new(MemoryTokenStore::new());
    let backend = backend_for(addr, store.clone());
    let guard = SessionGuard::new(store.clone(), backend.auth.clone(), Arc::new(NoopRouter));

    let user = guard.login("admin", "secret").await.unwrap();

    assert_eq!(user.username, "admin");
    assert_eq!(store.read().as_deref(), Some(TOKEN));
    assert_eq!(guard.status().await, SessionStatus::Valid);
    assert_eq!(
        requests(&state),
        vec!["POST /users/signin".to_string(), "GET /users/me".to_string()]
    );
}

#[tokio::test]
async fn test_rejected_login_maps_to_invalid_credentials() {
    let (addr, _state) = spawn_backend().await;
    let store = Arc::new(MemoryTokenStore::new());
    let backend = backend_for(addr, store.clone());
    let guard = SessionGuard::new(store.clone(), backend.auth.clone(), Arc::new(NoopRouter));

    let err = guard.login("admin", "wrong").await.unwrap_err();

    assert!(matches!(err, Error::InvalidCredentials(ref msg) if msg == "Bad credentials"));
    assert!(!store.has_token());
    assert_ne!(guard.status().await, SessionStatus::Valid);
}

#[tokio::test]
async fn test_initialize_with_expired_token_clears_store() {
    let (addr, _state) = spawn_backend().await;
    let store = Arc::new(MemoryTokenStore::with_token("stale"));
    let backend = backend_for(addr, store.clone());
    let guard = SessionGuard::new(store.clone(), backend.auth.clone(), Arc::new(NoopRouter));

    let status = guard.initialize().await;

    assert_eq!(status, SessionStatus::Invalid);
    assert!(!store.has_token());
    assert_eq!(guard.session().await.last_error.as_deref(), Some("Token expired"));
}

// ============================================================================
// Collections
// ============================================================================

#[tokio::test]
async fn test_customer_list_sends_search_and_paging() {
    let (addr, state) = spawn_backend().await;
    let store = Arc::new(MemoryTokenStore::with_token(TOKEN));
    let backend = backend_for(addr, store);
    let controller = CollectionController::new(backend.customers.clone(), 10);

    let outcome = controller.fetch("perez", 2, 10).await;

    assert_eq!(outcome, FetchOutcome::Applied);
    let query = state.lock().unwrap().last_query.clone();
    assert_eq!(query.get("searchTerm").map(String::as_str), Some("perez"));
    assert_eq!(query.get("page").map(String::as_str), Some("2"));
    assert_eq!(query.get("size").map(String::as_str), Some("10"));

    let snap = controller.snapshot().await;
    assert_eq!(snap.items().len(), 2);
    assert_eq!(
        snap.items()[1].business_name.as_deref(),
        Some("Transportes Andinos SAC")
    );
}

#[tokio::test]
async fn test_missing_token_yields_unauthorized() {
    let (addr, _state) = spawn_backend().await;
    let backend = backend_for(addr, Arc::new(MemoryTokenStore::new()));

    let err = backend
        .customers
        .list(&PageQuery::new("", 0, 10))
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_supplier_search_param_and_update_style() {
    let (addr, state) = spawn_backend().await;
    let backend = backend_for(addr, Arc::new(MemoryTokenStore::with_token(TOKEN)));

    backend
        .suppliers
        .list(&PageQuery::new("lima", 0, 5))
        .await
        .unwrap();
    assert_eq!(
        state.lock().unwrap().last_query.get("search").map(String::as_str),
        Some("lima")
    );

    let draft = Supplier {
        id: None,
        name: "Neumaticos Lima".to_string(),
        ruc: "20123456789".to_string(),
        cellphone: Some("987654321".to_string()),
    };
    let updated = backend.suppliers.update(7, &draft).await.unwrap();

    assert_eq!(updated.id, Some(7));
    let body = state.lock().unwrap().last_body.clone().unwrap();
    assert_eq!(body["id"], 7);
    assert!(requests(&state).contains(&"POST /suppliers".to_string()));
}

#[tokio::test]
async fn test_customer_update_uses_put() {
    let (addr, state) = spawn_backend().await;
    let backend = backend_for(addr, Arc::new(MemoryTokenStore::with_token(TOKEN)));
    let mut customer = llantera_core::Customer {
        name: "Juan Perez".to_string(),
        dni: Some("12345678".to_string()),
        ..Default::default()
    };
    customer.email = Some("juan@correo.pe".to_string());

    let saved = backend.customers.update(3, &customer).await.unwrap();

    assert_eq!(saved.id, Some(3));
    assert!(requests(&state).contains(&"PUT /customers/3".to_string()));
}

#[tokio::test]
async fn test_server_message_and_default_message() {
    let (addr, state) = spawn_backend().await;
    let backend = backend_for(addr, Arc::new(MemoryTokenStore::with_token(TOKEN)));

    let err = backend.customers.delete(99).await.unwrap_err();
    assert_eq!(err.user_message(), "Cliente no encontrado");
    backend.customers.delete(1).await.unwrap();

    state.lock().unwrap().fail_suppliers = true;
    let err = backend
        .suppliers
        .list(&PageQuery::new("", 0, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Server(ref msg) if msg == "Failed to fetch suppliers"));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = backend_for(addr, Arc::new(MemoryTokenStore::with_token(TOKEN)));
    let err = backend
        .customers
        .list(&PageQuery::new("", 0, 10))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Network(_)));
}

// ============================================================================
// Registry & export
// ============================================================================

#[tokio::test]
async fn test_dni_lookup_prefills_customer() {
    let (addr, _state) = spawn_backend().await;
    let backend = backend_for(addr, Arc::new(MemoryTokenStore::with_token(TOKEN)));

    let customer = backend.registry.customer_by_dni("87654321").await.unwrap();

    assert_eq!(customer.name, "MARIA QUISPE");
    assert_eq!(customer.dni.as_deref(), Some("87654321"));
    assert!(customer.id.is_none());
}

#[tokio::test]
async fn test_malformed_ids_never_reach_backend() {
    let (addr, state) = spawn_backend().await;
    let backend = backend_for(addr, Arc::new(MemoryTokenStore::with_token(TOKEN)));

    let err = backend.registry.customer_by_dni("1234").await.unwrap_err();
    assert_eq!(err.field_errors()[0].field, "dni");

    let err = backend.registry.supplier_by_ruc("2012345678X").await.unwrap_err();
    assert_eq!(err.field_errors()[0].field, "ruc");

    assert!(requests(&state).is_empty());
}

#[tokio::test]
async fn test_export_writes_file() {
    let (addr, _state) = spawn_backend().await;
    let backend = backend_for(addr, Arc::new(MemoryTokenStore::with_token(TOKEN)));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reportes").join("proveedores.xlsx");

    let written = backend.export.save_to(&path).await.unwrap();

    assert_eq!(written, 4);
    assert_eq!(std::fs::read(&path).unwrap(), vec![0x50, 0x4b, 0x03, 0x04]);
}
