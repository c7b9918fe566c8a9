use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    #[sea_orm(indexed)]
    pub board_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[sea_orm(default_value = false)]
    pub important: bool,
    #[sea_orm(default_value = false)]
    pub completed: bool,
    #[sea_orm(belongs_to, from = "board_id", to = "id", on_delete = "Cascade")]
    pub board: HasOne<super::board::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
