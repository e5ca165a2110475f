use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "nutrition_info")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub menu_item_id: Uuid,
    pub calories: i32,
    #[sea_orm(column_type = "Double")]
    pub protein: f64,
    #[sea_orm(column_type = "Double")]
    pub carbs: f64,
    #[sea_orm(column_type = "Double")]
    pub fat: f64,
    #[sea_orm(column_type = "Double", nullable)]
    pub fiber: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub sugar: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub sodium: Option<f64>,
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
}

impl Related<super::menu_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
