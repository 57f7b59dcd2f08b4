//! Relational mapping of the `items` table.
//!
//! The table carries no primary key or unique index; `(user_id, item_id)` is declared as the
//! entity key only so sea-orm can address rows. Value columns are nullable in the schema, so
//! they are read as `Option` and checked when converting into an [`Item`].

use sea_orm::{entity::prelude::*, Set};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::item::{Item, NewItem};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub item_id: String,
    pub title: Option<String>,
    pub priority: Option<String>,
    pub complete: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Item {
    type Error = ModelError;

    fn try_from(row: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.item_id)
            .map_err(|e| ModelError::Validation(format!("item_id '{}' is not a uuid: {e}", row.item_id)))?;
        let title = row.title.ok_or_else(|| ModelError::Validation("title is NULL".into()))?;
        let priority = row
            .priority
            .ok_or_else(|| ModelError::Validation("priority is NULL".into()))?
            .parse()?;
        let complete = row.complete.ok_or_else(|| ModelError::Validation("complete is NULL".into()))?;
        Ok(Item { id, user_id: row.user_id, title, priority, complete })
    }
}

/// Build the insert row for a freshly minted id.
pub fn insert_model(id: Uuid, item: &NewItem) -> ActiveModel {
    ActiveModel {
        user_id: Set(item.user_id.clone()),
        item_id: Set(id.to_string()),
        title: Set(Some(item.title.clone())),
        priority: Set(Some(item.priority.as_str().to_string())),
        complete: Set(Some(item.complete)),
    }
}
