//! PostgreSQL-backed `TeamRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TeamRepository, WorkspacePersistenceError};
use crate::domain::{NewTeam, Team, TeamId};

use super::diesel_error_mapping::{map_workspace_diesel_error, map_workspace_pool_error};
use super::models::{NewTeamRow, TeamRow};
use super::pool::DbPool;
use super::schema::teams;

#[derive(Clone)]
pub struct DieselTeamRepository {
    pool: DbPool,
}

impl DieselTeamRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_team(row: TeamRow) -> Team {
    Team {
        id: TeamId::from_uuid(row.id),
        name: row.name,
        description: row.description,
        created_at: row.created_at,
    }
}

#[async_trait]
impl TeamRepository for DieselTeamRepository {
    async fn list(&self) -> Result<Vec<Team>, WorkspacePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_workspace_pool_error)?;
        let rows: Vec<TeamRow> = teams::table
            .order((teams::created_at.asc(), teams::id.asc()))
            .select(TeamRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_workspace_diesel_error)?;
        Ok(rows.into_iter().map(row_to_team).collect())
    }

    async fn create(&self, team: &NewTeam) -> Result<Team, WorkspacePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_workspace_pool_error)?;
        let row = NewTeamRow {
            id: *TeamId::random().as_uuid(),
            name: &team.name,
            description: team.description.as_deref(),
        };
        let inserted: TeamRow = diesel::insert_into(teams::table)
            .values(&row)
            .returning(TeamRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_workspace_diesel_error)?;
        Ok(row_to_team(inserted))
    }
}
