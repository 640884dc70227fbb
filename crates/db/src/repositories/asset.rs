//! Asset repository for database operations.
//!
//! Implements the asset record store using `SeaORM`. The status transition is
//! a single conditional `UPDATE` so that concurrent completions cannot both
//! succeed.

use asset_core::asset::{
    Asset, AssetError, AssetRepository as AssetRepoTrait, AssetStatus, UpdateOutcome,
};
use asset_shared::AssetId;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use tracing::debug;

use crate::entities::{assets, sea_orm_active_enums::AssetStatus as DbAssetStatus};

/// Asset repository implementation.
#[derive(Debug, Clone)]
pub struct AssetRepository {
    db: DatabaseConnection,
}

impl AssetRepository {
    /// Create a new asset repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl AssetRepoTrait for AssetRepository {
    async fn create(&self, asset: Asset) -> Result<(), AssetError> {
        let active_model = assets::ActiveModel {
            id: Set(asset.id.into_inner()),
            status: Set(to_db_status(asset.status)),
            created_at: Set(asset.created_at.into()),
            updated_at: Set(asset.updated_at.into()),
        };

        assets::Entity::insert(active_model)
            .exec_without_returning(&self.db)
            .await
            .map_err(repository_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: AssetId) -> Result<Option<Asset>, AssetError> {
        let model = assets::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(repository_error)?;

        Ok(model.map(to_domain))
    }

    async fn update_status(
        &self,
        id: AssetId,
        expected: AssetStatus,
        status: AssetStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<UpdateOutcome, AssetError> {
        let changes = assets::ActiveModel {
            status: Set(to_db_status(status)),
            updated_at: Set(updated_at.into()),
            ..Default::default()
        };

        let result = assets::Entity::update_many()
            .set(changes)
            .filter(assets::Column::Id.eq(id.into_inner()))
            .filter(assets::Column::Status.eq(to_db_status(expected)))
            .exec(&self.db)
            .await
            .map_err(repository_error)?;

        if result.rows_affected == 0 {
            debug!(asset_id = %id, expected = %expected, "status update matched no row");
            return Ok(UpdateOutcome::ConditionFailed);
        }

        Ok(UpdateOutcome::Applied)
    }

    async fn delete(&self, id: AssetId) -> Result<(), AssetError> {
        assets::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(repository_error)?;

        Ok(())
    }
}

fn repository_error(e: DbErr) -> AssetError {
    AssetError::repository(e.to_string())
}

/// Convert domain status to database enum.
fn to_db_status(status: AssetStatus) -> DbAssetStatus {
    match status {
        AssetStatus::Created => DbAssetStatus::Created,
        AssetStatus::Uploaded => DbAssetStatus::Uploaded,
    }
}

/// Convert database enum to domain status.
fn from_db_status(status: DbAssetStatus) -> AssetStatus {
    match status {
        DbAssetStatus::Created => AssetStatus::Created,
        DbAssetStatus::Uploaded => AssetStatus::Uploaded,
    }
}

/// Convert database model to domain model.
fn to_domain(model: assets::Model) -> Asset {
    Asset {
        id: AssetId::from_uuid(model.id),
        status: from_db_status(model.status),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
