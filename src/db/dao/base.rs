use chrono::Utc;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    IntoActiveModel, Order, PrimaryKeyTrait, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use super::base_traits::{
    HasCreatedAtColumn, HasIdActiveModel, HasIdColumn, TimestampedActiveModel,
};
use super::error::{DaoLayerError, DaoResult};

#[derive(Debug)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub has_next: bool,
}

type Model<E> = <E as EntityTrait>::Model;
type ActiveModel<E> = <E as EntityTrait>::ActiveModel;
type Column<E> = <E as EntityTrait>::Column;

/// Shared CRUD plumbing for every table keyed by a UUID `id` with
/// `created_at`/`updated_at` columns.
#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized
where
    Model<Self::Entity>: FromQueryResult + IntoActiveModel<ActiveModel<Self::Entity>> + Send + Sync,
    ActiveModel<Self::Entity>: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + HasIdActiveModel
        + TimestampedActiveModel
        + Send,
    <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType:
        From<Uuid> + Send + Sync,
    Self::Entity: HasCreatedAtColumn + HasIdColumn,
{
    type Entity: EntityTrait + Send + Sync;
    /// Human readable name used in `NotFound` errors.
    const ENTITY_NAME: &'static str;
    const MAX_PAGE_SIZE: u64 = 100;

    fn new(db: &DatabaseConnection) -> Self;

    fn db(&self) -> &DatabaseConnection;

    fn not_found(id: Uuid) -> DaoLayerError {
        DaoLayerError::NotFound {
            entity: Self::ENTITY_NAME,
            id,
        }
    }

    async fn create(
        &self,
        data: impl IntoActiveModel<ActiveModel<Self::Entity>> + Send,
    ) -> DaoResult<Model<Self::Entity>> {
        let now = Utc::now().fixed_offset();
        let mut active = data.into_active_model();
        active.set_id(Uuid::new_v4());
        active.set_created_at(now);
        active.set_updated_at(now);
        Ok(active.insert(self.db()).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> DaoResult<Model<Self::Entity>> {
        Self::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn find(
        &self,
        page: u64,
        page_size: u64,
        order: Option<(Column<Self::Entity>, Order)>,
        apply: impl FnOnce(Select<Self::Entity>) -> Select<Self::Entity> + Send,
    ) -> DaoResult<PaginatedResponse<Model<Self::Entity>>> {
        if page == 0 || page_size == 0 || page_size > Self::MAX_PAGE_SIZE {
            return Err(DaoLayerError::InvalidPagination { page, page_size });
        }

        let filtered = apply(Self::Entity::find());
        let ordered = match order {
            Some((column, order)) => filtered.order_by(column, order),
            None => filtered.order_by_desc(Self::Entity::created_at_column()),
        }
        // Ties on the sort column would otherwise shift across page bounds.
        .order_by_asc(Self::Entity::id_column());
        let offset = (page - 1).saturating_mul(page_size);
        let mut data = ordered
            .limit(page_size.saturating_add(1))
            .offset(offset)
            .all(self.db())
            .await?;

        let has_next = data.len() > page_size as usize;
        if has_next {
            data.truncate(page_size as usize);
        }

        Ok(PaginatedResponse {
            data,
            page,
            page_size,
            has_next,
        })
    }

    /// Walks every page of `find` and concatenates the rows.
    async fn find_all<F>(
        &self,
        order: Option<(Column<Self::Entity>, Order)>,
        apply: F,
    ) -> DaoResult<Vec<Model<Self::Entity>>>
    where
        F: Fn(Select<Self::Entity>) -> Select<Self::Entity> + Clone + Send + Sync,
    {
        let mut rows = Vec::new();
        let mut page = 1;
        loop {
            let mut response = self
                .find(page, Self::MAX_PAGE_SIZE, order.clone(), apply.clone())
                .await?;
            rows.append(&mut response.data);
            if !response.has_next {
                return Ok(rows);
            }
            page += 1;
        }
    }

    async fn update<F>(&self, id: Uuid, apply: F) -> DaoResult<Model<Self::Entity>>
    where
        F: for<'a> FnOnce(&'a mut ActiveModel<Self::Entity>) + Send,
    {
        let model = self.find_by_id(id).await?;

        let mut active = model.into_active_model();
        apply(&mut active);
        active.set_updated_at(Utc::now().fixed_offset());

        Ok(active.update(self.db()).await?)
    }

    async fn delete(&self, id: Uuid) -> DaoResult<Uuid> {
        let result = Self::Entity::delete_by_id(id).exec(self.db()).await?;

        if result.rows_affected == 0 {
            return Err(Self::not_found(id));
        }

        Ok(id)
    }
}
