use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::restaurant_categories::Entity")]
    RestaurantCategories,
}

impl Related<super::restaurant_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RestaurantCategories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
