//! Integration tests for independently managed child resources.

mod common;

use arm_client_runtime::RuntimeError;
use common::{
    CreateDatabase, DatabaseInner, ServerDefinition, Server, database_id, define_database,
    init_logging,
};
use std::sync::Arc;
use std::sync::atomic::Ordering;

const CHILD_ID: &str =
    "/subscriptions/S/resourceGroups/RG/providers/P/parents/PARENT1/children/CHILD1";
const TENANT_SCOPED_ID: &str =
    "/tenants/T/resourceGroups/OTHER/providers/P/parents/X/children/CHILD1";

#[test]
fn test_definition_starts_in_create_mode() {
    let mut db = define_database("orders");
    assert!(db.is_in_create_mode());
    assert_eq!(db.resource_group_name(), None);
    assert_eq!(db.parent_name(), None);
    assert_eq!(db.manager().subscription_id, common::SUBSCRIPTION);

    db.set_inner(DatabaseInner {
        id: Some(CHILD_ID.to_string()),
        collation: None,
    })
    .unwrap();
    assert!(!db.is_in_create_mode());
}

#[test]
fn test_identifier_supplies_group_and_parent() {
    let mut db = define_database("CHILD1");
    db.set_inner(DatabaseInner {
        id: Some(CHILD_ID.to_string()),
        collation: Some("SQL_Latin1_General_CP1_CI_AS".to_string()),
    })
    .unwrap();

    assert_eq!(db.resource_group_name().as_deref(), Some("RG"));
    assert_eq!(db.parent_name(), Some("PARENT1"));
}

#[test]
fn test_explicit_parent_ignores_identifier() {
    let mut db = define_database("CHILD1");
    db.set_inner(DatabaseInner {
        id: Some(CHILD_ID.to_string()),
        collation: None,
    })
    .unwrap();

    db.with_existing_parent_resource("explicit-rg", "explicit-server");
    assert_eq!(db.resource_group_name().as_deref(), Some("explicit-rg"));
    assert_eq!(db.parent_name(), Some("explicit-server"));
}

#[test]
fn test_rejected_identifier_keeps_previous_state() {
    let mut db = define_database("CHILD1");
    db.set_inner(DatabaseInner {
        id: Some(CHILD_ID.to_string()),
        collation: None,
    })
    .unwrap();

    let err = db
        .set_inner(DatabaseInner {
            id: Some(TENANT_SCOPED_ID.to_string()),
            collation: None,
        })
        .unwrap_err();
    assert!(matches!(err, RuntimeError::InvalidResourceId { .. }));

    assert!(!db.is_in_create_mode());
    assert_eq!(db.id(), Some(CHILD_ID));
    assert_eq!(db.parent_name(), Some("PARENT1"));
    assert_eq!(db.resource_group_name().as_deref(), Some("RG"));
}

#[test]
fn test_only_first_new_parent_is_registered() {
    let first = ServerDefinition::new("rg-1", "srv-1");
    let second = ServerDefinition::new("rg-2", "srv-2");

    let mut db = define_database("orders");
    db.with_new_parent_resource(first.clone())
        .with_new_parent_resource(second.clone());

    assert_eq!(db.pending_parent_key(), Some("server:rg-1/srv-1"));
    assert_eq!(db.task_group().dependency_keys(), vec!["server:rg-1/srv-1"]);
    assert!(!db.task_group().has_dependency("server:rg-2/srv-2"));
}

#[tokio::test]
async fn test_new_parent_is_resolved_before_child_creation() {
    init_logging();

    let server = ServerDefinition::new("G2", "P2");
    let creator = CreateDatabase::default();

    let mut db = define_database("orders");
    db.with_new_parent_resource(server.clone());

    let created = db.create(&creator).await.unwrap();
    assert_eq!(created.group, "G2");
    assert_eq!(created.server, "P2");
    assert_eq!(created.id, database_id("G2", "P2", "orders"));

    assert_eq!(server.runs(), 1);
    assert_eq!(creator.calls.load(Ordering::SeqCst), 1);
    assert_eq!(db.resource_group_name().as_deref(), Some("G2"));
    assert_eq!(db.parent_name(), Some("P2"));
}

#[tokio::test]
async fn test_created_response_switches_to_update_mode() {
    let creator = CreateDatabase::default();
    let mut db = define_database("orders");
    db.with_existing_parent(&Server::new("rg", "srv"));

    let created = db.create(&creator).await.unwrap();
    db.set_inner(DatabaseInner {
        id: Some(created.id.clone()),
        collation: None,
    })
    .unwrap();

    assert!(!db.is_in_create_mode());
    assert_eq!(db.id(), Some(created.id.as_str()));
    assert_eq!(db.parent_name(), Some("srv"));
}

#[tokio::test]
async fn test_unresolved_parent_fails_without_calling_service() {
    let creator = CreateDatabase::default();
    let mut db = define_database("orders");
    db.with_new_parent_resource(ServerDefinition::new("rg", "srv"));

    let err = db.create_resource(&creator).await.unwrap_err();
    assert!(matches!(err, RuntimeError::MissingTaskResult { .. }));
    assert_eq!(creator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_parent_surfaces_from_creator() {
    let creator = CreateDatabase::default();
    let mut db = define_database("orphan");

    let err = db.create(&creator).await.unwrap_err();
    assert!(matches!(err, RuntimeError::Internal { .. }));
}

#[test]
fn test_inner_round_trips_through_json() {
    let inner: DatabaseInner = serde_json::from_value(serde_json::json!({
        "id": CHILD_ID,
        "collation": null
    }))
    .unwrap();

    let mut db = define_database("CHILD1");
    db.set_inner(inner).unwrap();
    assert_eq!(db.parent_name(), Some("PARENT1"));
    assert!(Arc::strong_count(db.manager()) >= 1);
}
