//! PostgreSQL-backed `TagRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TagRepository, WorkspacePersistenceError};
use crate::domain::{NewTag, Tag, TagId};

use super::diesel_error_mapping::{map_workspace_diesel_error, map_workspace_pool_error};
use super::models::{NewTagRow, TagRow};
use super::pool::DbPool;
use super::schema::tags;

#[derive(Clone)]
pub struct DieselTagRepository {
    pool: DbPool,
}

impl DieselTagRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_tag(row: TagRow) -> Tag {
    Tag {
        id: TagId::from_uuid(row.id),
        name: row.name,
        created_at: row.created_at,
    }
}

#[async_trait]
impl TagRepository for DieselTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, WorkspacePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_workspace_pool_error)?;
        let rows: Vec<TagRow> = tags::table
            .order((tags::created_at.asc(), tags::id.asc()))
            .select(TagRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_workspace_diesel_error)?;
        Ok(rows.into_iter().map(row_to_tag).collect())
    }

    async fn create(&self, tag: &NewTag) -> Result<Tag, WorkspacePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_workspace_pool_error)?;
        let row = NewTagRow {
            id: *TagId::random().as_uuid(),
            name: &tag.name,
        };
        let inserted: TagRow = diesel::insert_into(tags::table)
            .values(&row)
            .returning(TagRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_workspace_diesel_error)?;
        Ok(row_to_tag(inserted))
    }
}
