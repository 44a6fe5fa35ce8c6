use catalog::app::AppContext;
use catalog::cli::{Command, execute};
use catalog::config::AppConfig;
use catalog::error::AppError;
use claims::*;
use serde_json::json;
use services::ServiceError;
use services::model::ProductCategory;
use services::store::{KeyValueStore, MemoryStore, SESSION_TOKEN_KEY, favorite_key};
use services::testing::MockTransport;
use std::sync::Arc;
use std::sync::mpsc;

fn context() -> (AppContext, Arc<MockTransport>, Arc<MemoryStore>) {
    context_on(Arc::new(MemoryStore::new()))
}

fn signed_in_context() -> (AppContext, Arc<MockTransport>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    store.set_string(SESSION_TOKEN_KEY, "tok-1").unwrap();
    context_on(store)
}

fn context_on(store: Arc<MemoryStore>) -> (AppContext, Arc<MockTransport>, Arc<MemoryStore>) {
    let transport = Arc::new(MockTransport::new());
    let (tx, _rx) = mpsc::channel();
    let ctx = AppContext::with_collaborators(
        &AppConfig::default(),
        transport.clone(),
        store.clone(),
        tx,
    );
    (ctx, transport, store)
}

fn products_json() -> serde_json::Value {
    json!([
        {"product_id": 1, "product_name": "Pen", "product_type": "Product", "price": 10.0, "tax": 5.0},
        {"product_id": 2, "product_name": "Repair", "product_type": "Service", "price": 50.0, "tax": 18.0}
    ])
}

#[tokio::test]
async fn test_product_commands_require_a_session() {
    let (mut ctx, transport, _) = context();

    let err = assert_err!(execute(Command::Products { search: None }, &mut ctx).await);

    assert!(matches!(err, AppError::Auth(_)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_login_then_list_products() {
    let (mut ctx, transport, store) = context();
    transport.push_json(200, &json!({"token": "tok-1"}));
    transport.push_json(200, &products_json());

    assert_ok!(
        execute(
            Command::Login {
                identifier: "me@example.com".into(),
                password: "secret".into(),
            },
            &mut ctx,
        )
        .await
    );
    assert_some_eq!(store.get_string(SESSION_TOKEN_KEY).unwrap(), "tok-1");

    assert_ok!(
        execute(
            Command::Products {
                search: Some("pe".into())
            },
            &mut ctx,
        )
        .await
    );
    assert_eq!(ctx.product_list.filtered_products().await.len(), 1);

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[1].url,
        "https://app.getswipe.in/api/public/get"
    );
}

#[tokio::test]
async fn test_favorite_command_persists_flag() {
    let (mut ctx, transport, store) = signed_in_context();
    transport.push_json(200, &products_json());

    assert_ok!(execute(Command::Favorite { id: 2 }, &mut ctx).await);
    assert_ok_eq!(store.get_bool(&favorite_key(2)), true);

    transport.push_json(200, &products_json());
    let err = assert_err!(execute(Command::Favorite { id: 99 }, &mut ctx).await);
    assert!(matches!(
        err,
        AppError::Service(ServiceError::ValidationError { .. })
    ));
}

#[tokio::test]
async fn test_add_command_reports_validation_errors() {
    let (mut ctx, transport, _) = signed_in_context();

    let err = assert_err!(
        execute(
            Command::Add {
                name: "Pen".into(),
                product_type: ProductCategory::Product,
                price: "10".into(),
                tax: "101".into(),
                image: None,
            },
            &mut ctx,
        )
        .await
    );

    assert_eq!(
        err.user_message(),
        "Please enter a valid tax rate (0-100)"
    );
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let (mut ctx, transport, store) = context();
    transport.push_json(200, &json!({"token": "tok-1"}));
    assert_ok!(
        execute(
            Command::Login {
                identifier: "me@example.com".into(),
                password: "secret".into(),
            },
            &mut ctx,
        )
        .await
    );

    assert_ok!(execute(Command::Logout, &mut ctx).await);

    assert!(!ctx.session.is_authenticated());
    assert_none!(store.get_string(SESSION_TOKEN_KEY).unwrap());
}
