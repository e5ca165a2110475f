use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "ingredients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::menu_item_ingredients::Entity")]
    MenuItemIngredients,
}

impl Related<super::menu_item_ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItemIngredients.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
