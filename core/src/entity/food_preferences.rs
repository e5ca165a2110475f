use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "food_preferences")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::menu_item_preferences::Entity")]
    MenuItemPreferences,
}

impl Related<super::menu_item_preferences::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItemPreferences.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
