//! Database-level enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Value stored in `assets.status`, guarded by a CHECK constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum AssetStatus {
    /// Record written, upload not yet confirmed.
    #[sea_orm(string_value = "created")]
    Created,
    /// Upload confirmed.
    #[sea_orm(string_value = "uploaded")]
    Uploaded,
}
