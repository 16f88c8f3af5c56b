//! Shared test doubles for engine integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use gantry_core::config::{ResolvedSelector, ResourceDocument};
use gantry_engine::{ClusterGateway, GatewayError, ResourceRef};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory gateway that records every call and fails or panics on demand.
#[derive(Debug, Default)]
pub struct FakeGateway {
    /// Resources returned by list, keyed by namespace ("" for none)
    pub resources: HashMap<String, Vec<ResourceRef>>,
    /// Resource names whose delete fails
    pub fail_deletes: HashSet<String>,
    /// Resource names whose delete panics
    pub panic_deletes: HashSet<String>,
    /// When set, every list call fails
    pub fail_lists: bool,

    pub delete_calls: AtomicUsize,
    pub deleted: Mutex<Vec<String>>,
    pub applied: Mutex<Vec<ResourceDocument>>,
    pub list_selectors: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resources(mut self, namespace: &str, names: &[&str]) -> Self {
        let refs = names
            .iter()
            .map(|name| ResourceRef {
                name: name.to_string(),
                namespace: if namespace.is_empty() {
                    None
                } else {
                    Some(namespace.to_string())
                },
            })
            .collect();
        self.resources.insert(namespace.to_string(), refs);
        self
    }

    pub fn failing_delete(mut self, name: &str) -> Self {
        self.fail_deletes.insert(name.to_string());
        self
    }

    pub fn panicking_delete(mut self, name: &str) -> Self {
        self.panic_deletes.insert(name.to_string());
        self
    }

    pub fn deleted_names(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn applied_docs(&self) -> Vec<ResourceDocument> {
        self.applied.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClusterGateway for FakeGateway {
    async fn list(
        &self,
        _api_version: &str,
        _kind: &str,
        namespace: Option<&str>,
        selector: &ResolvedSelector,
    ) -> Result<Vec<ResourceRef>, GatewayError> {
        if self.fail_lists {
            return Err(GatewayError::Api("list unavailable".to_string()));
        }
        self.list_selectors
            .lock()
            .unwrap()
            .push(selector.to_string());
        Ok(self
            .resources
            .get(namespace.unwrap_or(""))
            .cloned()
            .unwrap_or_default())
    }

    async fn delete(
        &self,
        _api_version: &str,
        _kind: &str,
        _namespace: Option<&str>,
        name: &str,
    ) -> Result<(), GatewayError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.panic_deletes.contains(name) {
            panic!("gateway blew up deleting {name}");
        }
        if self.fail_deletes.contains(name) {
            return Err(GatewayError::Api(format!("cannot delete {name}")));
        }
        self.deleted.lock().unwrap().push(name.to_string());
        Ok(())
    }

    async fn apply(&self, doc: &ResourceDocument) -> Result<(), GatewayError> {
        self.applied.lock().unwrap().push(doc.clone());
        Ok(())
    }
}
