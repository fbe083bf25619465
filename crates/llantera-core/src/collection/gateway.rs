//! Collection gateway trait

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Entity, EntityId, PageQuery, PageResponse};

/// Remote CRUD + paginated search for one entity type
///
/// Any call may fail with `Network` or `Server`.
#[async_trait]
pub trait CollectionGateway: Send + Sync + 'static {
    type Entity: Entity;

    /// Short resource name used in logs and default error messages
    fn resource(&self) -> &'static str;

    async fn list(&self, query: &PageQuery) -> Result<PageResponse<Self::Entity>>;

    async fn get_by_id(&self, id: EntityId) -> Result<Self::Entity>;

    async fn create(&self, entity: &Self::Entity) -> Result<Self::Entity>;

    async fn update(&self, id: EntityId, entity: &Self::Entity) -> Result<Self::Entity>;

    async fn delete(&self, id: EntityId) -> Result<()>;
}
