//! Repository implementations backed by `SeaORM`.

pub mod asset;

pub use asset::AssetRepository;
