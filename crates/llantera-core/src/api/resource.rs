//! REST-backed collection gateway
//!
//! One generic implementation of [`CollectionGateway`], configured per
//! resource with its path, search parameter and update style.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::client::ApiClient;
use crate::collection::CollectionGateway;
use crate::error::{Error, Result};
use crate::models::{Customer, Entity, EntityId, PageQuery, PageResponse, Supplier};

/// How the backend expects updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStyle {
    /// `PUT {path}/{id}`
    Put,
    /// `POST {path}` with the id in the body
    PostWithId,
}

/// Static description of one backend resource
#[derive(Debug, Clone, Copy)]
pub struct ResourceSpec {
    pub path: &'static str,
    pub search_param: &'static str,
    pub update_style: UpdateStyle,
    /// Used in log lines and default error messages
    pub singular: &'static str,
    pub plural: &'static str,
}

pub const CUSTOMERS: ResourceSpec = ResourceSpec {
    path: "/customers",
    search_param: "searchTerm",
    update_style: UpdateStyle::Put,
    singular: "customer",
    plural: "customers",
};

pub const SUPPLIERS: ResourceSpec = ResourceSpec {
    path: "/suppliers",
    search_param: "search",
    update_style: UpdateStyle::PostWithId,
    singular: "supplier",
    plural: "suppliers",
};

/// Paginated CRUD resource on the backend
pub struct RestCollection<T> {
    client: Arc<ApiClient>,
    spec: ResourceSpec,
    _entity: PhantomData<fn() -> T>,
}

impl<T> RestCollection<T> {
    pub fn new(client: Arc<ApiClient>, spec: ResourceSpec) -> Self {
        Self {
            client,
            spec,
            _entity: PhantomData,
        }
    }

    pub fn spec(&self) -> &ResourceSpec {
        &self.spec
    }

    fn item_path(&self, id: EntityId) -> String {
        format!("{}/{}", self.spec.path, id)
    }
}

impl RestCollection<Customer> {
    pub fn customers(client: Arc<ApiClient>) -> Self {
        Self::new(client, CUSTOMERS)
    }
}

impl RestCollection<Supplier> {
    pub fn suppliers(client: Arc<ApiClient>) -> Self {
        Self::new(client, SUPPLIERS)
    }
}

/// Serialize `entity` with `id` forced into the body
fn body_with_id<T: Serialize>(entity: &T, id: EntityId) -> Result<serde_json::Value> {
    let mut body = serde_json::to_value(entity)?;
    match body.as_object_mut() {
        Some(fields) => {
            fields.insert("id".to_string(), serde_json::Value::from(id));
            Ok(body)
        }
        None => Err(Error::server("Entity did not serialize to an object")),
    }
}

#[async_trait]
impl<T> CollectionGateway for RestCollection<T>
where
    T: Entity + Serialize + DeserializeOwned,
{
    type Entity = T;

    fn resource(&self) -> &'static str {
        self.spec.plural
    }

    async fn list(&self, query: &PageQuery) -> Result<PageResponse<T>> {
        let request = self.client.request(Method::GET, self.spec.path).query(&[
            (self.spec.search_param, query.search_term.clone()),
            ("page", query.page_index.to_string()),
            ("size", query.page_size.to_string()),
        ]);
        self.client
            .send_json(request, &format!("Failed to fetch {}", self.spec.plural))
            .await
    }

    async fn get_by_id(&self, id: EntityId) -> Result<T> {
        let request = self.client.request(Method::GET, &self.item_path(id));
        self.client
            .send_json(request, &format!("Failed to load {}", self.spec.singular))
            .await
    }

    async fn create(&self, entity: &T) -> Result<T> {
        let request = self.client.request(Method::POST, self.spec.path).json(entity);
        self.client
            .send_json(request, &format!("Failed to create {}", self.spec.singular))
            .await
    }

    async fn update(&self, id: EntityId, entity: &T) -> Result<T> {
        let request = match self.spec.update_style {
            UpdateStyle::Put => self
                .client
                .request(Method::PUT, &self.item_path(id))
                .json(entity),
            UpdateStyle::PostWithId => self
                .client
                .request(Method::POST, self.spec.path)
                .json(&body_with_id(entity, id)?),
        };
        self.client
            .send_json(request, &format!("Failed to update {}", self.spec.singular))
            .await
    }

    async fn delete(&self, id: EntityId) -> Result<()> {
        let request = self.client.request(Method::DELETE, &self.item_path(id));
        self.client
            .send(request, &format!("Failed to delete {}", self.spec.singular))
            .await?;
        Ok(())
    }
}
