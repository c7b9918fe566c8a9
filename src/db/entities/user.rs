use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub name: String,
    #[sea_orm(has_many)]
    pub boards: HasMany<super::board::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
