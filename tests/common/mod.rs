//! Shared fixtures for the integration tests.
//!
//! Models a small SQL service: servers are parents, databases are
//! independently managed children.

#![allow(dead_code)]

use arm_client_runtime::http::{HttpClient, HttpRequest, HttpResponse};
use arm_client_runtime::resource::{
    ChildResourceCreator, Creatable, InnerResource, ParentResource, ParentedResourceBuilder,
    TaskGroup,
};
use arm_client_runtime::{RuntimeError, RuntimeResult};
use futures::future::BoxFuture;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const SUBSCRIPTION: &str = "00000000-0000-0000-0000-000000000000";

/// Install a test logger once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Manager handle shared by every resource of the service.
#[derive(Debug)]
pub struct SqlManager {
    pub subscription_id: String,
}

impl SqlManager {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            subscription_id: SUBSCRIPTION.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Server {
    pub name: String,
    pub group: String,
}

impl Server {
    pub fn new(group: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            group: group.to_string(),
        }
    }
}

impl ParentResource for Server {
    fn name(&self) -> &str {
        &self.name
    }

    fn resource_group_name(&self) -> &str {
        &self.group
    }
}

/// A server that will be created as a dependency.
pub struct ServerDefinition {
    key: String,
    server: Server,
    pub runs: AtomicUsize,
}

impl ServerDefinition {
    pub fn new(group: &str, name: &str) -> Arc<Self> {
        Arc::new(Self {
            key: format!("server:{group}/{name}"),
            server: Server::new(group, name),
            runs: AtomicUsize::new(0),
        })
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl Creatable<Server> for ServerDefinition {
    fn key(&self) -> &str {
        &self.key
    }

    fn create(&self) -> BoxFuture<'_, RuntimeResult<Server>> {
        Box::pin(async move {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Ok(self.server.clone())
        })
    }
}

/// Raw service model of a database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseInner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub collation: Option<String>,
}

impl InnerResource for DatabaseInner {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

pub type DatabaseBuilder = ParentedResourceBuilder<DatabaseInner, Server, Arc<SqlManager>>;

pub fn define_database(name: &str) -> DatabaseBuilder {
    ParentedResourceBuilder::new(
        name,
        DatabaseInner::default(),
        SqlManager::new(),
        TaskGroup::new(format!("database:{name}")),
    )
}

pub fn database_id(group: &str, server: &str, name: &str) -> String {
    format!(
        "/subscriptions/{SUBSCRIPTION}/resourceGroups/{group}/providers/Microsoft.Sql/servers/{server}/databases/{name}"
    )
}

/// What the fake service saw when asked to create a database.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedDatabase {
    pub id: String,
    pub group: String,
    pub server: String,
}

/// Fake service call: builds the identifier the service would assign.
#[derive(Default)]
pub struct CreateDatabase {
    pub calls: AtomicUsize,
}

impl ChildResourceCreator<DatabaseInner, Server, Arc<SqlManager>> for CreateDatabase {
    type Child = CreatedDatabase;

    fn create_child_resource<'a>(
        &'a self,
        builder: &'a DatabaseBuilder,
    ) -> impl Future<Output = RuntimeResult<CreatedDatabase>> + Send + 'a {
        async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let group = builder
                .resource_group_name()
                .ok_or_else(|| RuntimeError::internal("resource group not resolved"))?;
            let server = builder
                .parent_name()
                .ok_or_else(|| RuntimeError::internal("parent not resolved"))?
                .to_string();

            Ok(CreatedDatabase {
                id: database_id(&group, &server, builder.name()),
                group,
                server,
            })
        }
    }
}

/// Transport that records requests and answers with a canned response.
pub struct RecordingClient {
    response: HttpResponse,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingClient {
    pub fn new(response: HttpResponse) -> Arc<Self> {
        Arc::new(Self {
            response,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn ok() -> Arc<Self> {
        Self::new(HttpResponse::new(StatusCode::OK))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("recording client poisoned").clone()
    }
}

impl HttpClient for RecordingClient {
    fn send<'a>(&'a self, request: &'a HttpRequest) -> BoxFuture<'a, RuntimeResult<HttpResponse>> {
        Box::pin(async move {
            self.requests
                .lock()
                .map_err(|_| RuntimeError::internal("recording client poisoned"))?
                .push(request.clone());
            Ok(self.response.clone())
        })
    }
}

/// Transport that always fails.
pub struct FailingClient;

impl HttpClient for FailingClient {
    fn send<'a>(&'a self, _request: &'a HttpRequest) -> BoxFuture<'a, RuntimeResult<HttpResponse>> {
        Box::pin(async {
            Err(RuntimeError::transport(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))
        })
    }
}
