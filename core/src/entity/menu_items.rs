use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "menu_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub image_url: Option<String>,
    pub is_vegetarian: bool,
    pub is_spicy: bool,
    pub is_available: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::restaurants::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurants::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Restaurants,
    #[sea_orm(has_many = "super::nutrition_info::Entity")]
    NutritionInfo,
    #[sea_orm(has_many = "super::menu_item_ingredients::Entity")]
    MenuItemIngredients,
    #[sea_orm(has_many = "super::menu_item_preferences::Entity")]
    MenuItemPreferences,
}

impl Related<super::restaurants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurants.def()
    }
}

impl Related<super::nutrition_info::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NutritionInfo.def()
    }
}

impl Related<super::menu_item_ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItemIngredients.def()
    }
}

impl Related<super::menu_item_preferences::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItemPreferences.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
