use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "menu_item_preferences")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub menu_item_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub preference_id: Uuid,
    pub is_compatible: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::menu_items::Entity",
        from = "Column::MenuItemId",
        to = "super::menu_items::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    MenuItems,
    #[sea_orm(
        belongs_to = "super::food_preferences::Entity",
        from = "Column::PreferenceId",
        to = "super::food_preferences::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    FoodPreferences,
}

impl Related<super::menu_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItems.def()
    }
}

impl Related<super::food_preferences::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FoodPreferences.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
