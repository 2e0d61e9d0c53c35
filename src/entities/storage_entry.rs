//! Storage entry entity - one durable key-value pair.
//! Each content kind keeps its whole collection as a JSON string under a fixed key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Key-value row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "storage_entries")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Storage key (e.g., `"embu_news"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Serialized value
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this entry was last written
    pub updated_at: DateTime,
}

/// Storage entries have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
