//! `SeaORM` entities.

pub mod assets;
pub mod sea_orm_active_enums;

pub use sea_orm_active_enums::AssetStatus;
