use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Statement, Value,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        nutrition::{
            entities::{FoodRecord, Ingredient, NutritionInfo, PreferenceKind},
            ports::NutritionRepository,
            value_objects::{
                FoodRecordFilter, HealthyChoice, IngredientUsage, NutritionAverages,
                PreferenceGroup, RestaurantCalories,
            },
        },
        restaurant::{
            entities::MenuItem,
            value_objects::{MenuItemIngredient, MenuItemPreference},
        },
    },
    entity::{
        food_preferences::{Column as PreferenceColumn, Entity as PreferenceEntity},
        food_records::{
            ActiveModel as FoodRecordActiveModel, Column as FoodRecordColumn,
            Entity as FoodRecordEntity,
        },
        nutrition_info::Entity as NutritionInfoEntity,
    },
    infrastructure::nutrition::mappers::{menu_item_from_row, preference_from_model},
};

#[derive(Debug, Clone)]
pub struct PostgresNutritionRepository {
    pub db: DatabaseConnection,
}

impl PostgresNutritionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn statement(sql: &str, values: Vec<Value>) -> Statement {
        Statement::from_sql_and_values(sea_orm::DatabaseBackend::Postgres, sql, values)
    }

    async fn count_query(&self, sql: &str, values: Vec<Value>) -> Result<i64, CoreError> {
        let row = self
            .db
            .query_one(Self::statement(sql, values))
            .await
            .map_err(|e| {
                error!("Failed to run count query: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(row
            .and_then(|row| row.try_get::<i64>("", "count").ok())
            .unwrap_or(0))
    }

    async fn menu_item_query(&self, sql: &str, values: Vec<Value>) -> Result<Vec<MenuItem>, CoreError> {
        let rows = self
            .db
            .query_all(Self::statement(sql, values))
            .await
            .map_err(|e| {
                error!("Failed to query menu items: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(rows.iter().filter_map(menu_item_from_row).collect())
    }
}

impl NutritionRepository for PostgresNutritionRepository {
    async fn averages(&self) -> Result<NutritionAverages, CoreError> {
        let row = self
            .db
            .query_one(Self::statement(
                r#"
                SELECT COALESCE(AVG(calories), 0)::float8 AS calories,
                       COALESCE(AVG(protein), 0)::float8 AS protein,
                       COALESCE(AVG(carbs), 0)::float8 AS carbs,
                       COALESCE(AVG(fat), 0)::float8 AS fat
                FROM nutrition_info
                "#,
                Vec::new(),
            ))
            .await
            .map_err(|e| {
                error!("Failed to compute nutrition averages: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(row
            .and_then(|row| {
                Some(NutritionAverages {
                    calories: row.try_get("", "calories").ok()?,
                    protein: row.try_get("", "protein").ok()?,
                    carbs: row.try_get("", "carbs").ok()?,
                    fat: row.try_get("", "fat").ok()?,
                })
            })
            .unwrap_or_default())
    }

    async fn healthy_choices(&self, max_calories: i32, limit: u64) -> Result<Vec<HealthyChoice>, CoreError> {
        let rows = self
            .db
            .query_all(Self::statement(
                r#"
                SELECT m.*, r.name AS restaurant_name, n.calories AS item_calories
                FROM menu_items m
                JOIN nutrition_info n ON n.menu_item_id = m.id
                JOIN restaurants r ON r.id = m.restaurant_id
                WHERE m.is_available AND n.calories < $1
                ORDER BY n.calories ASC, m.name ASC
                LIMIT $2
                "#,
                vec![max_calories.into(), (limit as i64).into()],
            ))
            .await
            .map_err(|e| {
                error!("Failed to get healthy choices: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(HealthyChoice {
                    menu_item: menu_item_from_row(row)?,
                    restaurant_name: row.try_get("", "restaurant_name").ok()?,
                    calories: row.try_get("", "item_calories").ok()?,
                })
            })
            .collect())
    }

    async fn restaurant_calories(&self) -> Result<Vec<RestaurantCalories>, CoreError> {
        let rows = self
            .db
            .query_all(Self::statement(
                r#"
                SELECT r.id, r.name, AVG(n.calories)::float8 AS avg_calories
                FROM restaurants r
                JOIN menu_items m ON m.restaurant_id = r.id
                JOIN nutrition_info n ON n.menu_item_id = m.id
                GROUP BY r.id, r.name
                ORDER BY avg_calories ASC
                "#,
                Vec::new(),
            ))
            .await
            .map_err(|e| {
                error!("Failed to get restaurant calories: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(RestaurantCalories {
                    restaurant_id: row.try_get("", "id").ok()?,
                    restaurant_name: row.try_get("", "name").ok()?,
                    avg_calories: row.try_get("", "avg_calories").ok()?,
                })
            })
            .collect())
    }

    async fn preference_groups(
        &self,
        kind: PreferenceKind,
        compatible: bool,
        sample_size: u64,
    ) -> Result<Vec<PreferenceGroup>, CoreError> {
        let preferences = PreferenceEntity::find()
            .filter(PreferenceColumn::Kind.eq(kind.as_str()))
            .order_by_asc(PreferenceColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list food preferences: {}", e);
                CoreError::InternalServerError
            })?;

        let mut groups = Vec::new();
        for preference in preferences.into_iter().filter_map(preference_from_model) {
            let total_count = self
                .count_query(
                    r#"
                    SELECT COUNT(*) AS count
                    FROM menu_item_preferences mp
                    JOIN menu_items m ON m.id = mp.menu_item_id
                    WHERE mp.preference_id = $1 AND mp.is_compatible = $2 AND m.is_available
                    "#,
                    vec![preference.id.into(), compatible.into()],
                )
                .await?;

            let items = self
                .menu_item_query(
                    r#"
                    SELECT m.*
                    FROM menu_item_preferences mp
                    JOIN menu_items m ON m.id = mp.menu_item_id
                    WHERE mp.preference_id = $1 AND mp.is_compatible = $2 AND m.is_available
                    ORDER BY m.name
                    LIMIT $3
                    "#,
                    vec![
                        preference.id.into(),
                        compatible.into(),
                        (sample_size as i64).into(),
                    ],
                )
                .await?;

            groups.push(PreferenceGroup {
                preference,
                items,
                total_count,
            });
        }

        Ok(groups)
    }

    async fn top_ingredients(&self, limit: u64, sample_size: u64) -> Result<Vec<IngredientUsage>, CoreError> {
        let rows = self
            .db
            .query_all(Self::statement(
                r#"
                SELECT i.id, i.name, i.description,
                       COUNT(DISTINCT mi.menu_item_id) AS item_count,
                       COUNT(DISTINCT m.restaurant_id) AS restaurant_count
                FROM ingredients i
                JOIN menu_item_ingredients mi ON mi.ingredient_id = i.id
                JOIN menu_items m ON m.id = mi.menu_item_id
                GROUP BY i.id, i.name, i.description
                ORDER BY item_count DESC, i.name ASC
                LIMIT $1
                "#,
                vec![(limit as i64).into()],
            ))
            .await
            .map_err(|e| {
                error!("Failed to get top ingredients: {}", e);
                CoreError::InternalServerError
            })?;

        let ranked: Vec<(Ingredient, i64, i64)> = rows
            .iter()
            .filter_map(|row| {
                Some((
                    Ingredient {
                        id: row.try_get("", "id").ok()?,
                        name: row.try_get("", "name").ok()?,
                        description: row.try_get("", "description").ok()?,
                    },
                    row.try_get("", "item_count").ok()?,
                    row.try_get("", "restaurant_count").ok()?,
                ))
            })
            .collect();

        let mut usages = Vec::with_capacity(ranked.len());
        for (ingredient, item_count, restaurant_count) in ranked {
            let items = self
                .menu_item_query(
                    r#"
                    SELECT m.*
                    FROM menu_item_ingredients mi
                    JOIN menu_items m ON m.id = mi.menu_item_id
                    WHERE mi.ingredient_id = $1
                    ORDER BY m.name
                    LIMIT $2
                    "#,
                    vec![ingredient.id.into(), (sample_size as i64).into()],
                )
                .await?;

            usages.push(IngredientUsage {
                ingredient,
                items,
                item_count,
                restaurant_count,
            });
        }

        Ok(usages)
    }

    async fn get_nutrition_info(&self, menu_item_id: Uuid) -> Result<Option<NutritionInfo>, CoreError> {
        let info = NutritionInfoEntity::find_by_id(menu_item_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get nutrition info: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(info.map(NutritionInfo::from))
    }

    async fn list_menu_item_ingredients(&self, menu_item_id: Uuid) -> Result<Vec<MenuItemIngredient>, CoreError> {
        let rows = self
            .db
            .query_all(Self::statement(
                r#"
                SELECT i.id, i.name, i.description, mi.amount
                FROM menu_item_ingredients mi
                JOIN ingredients i ON i.id = mi.ingredient_id
                WHERE mi.menu_item_id = $1
                ORDER BY i.name
                "#,
                vec![menu_item_id.into()],
            ))
            .await
            .map_err(|e| {
                error!("Failed to list menu item ingredients: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(MenuItemIngredient {
                    ingredient: Ingredient {
                        id: row.try_get("", "id").ok()?,
                        name: row.try_get("", "name").ok()?,
                        description: row.try_get("", "description").ok()?,
                    },
                    amount: row.try_get("", "amount").ok()?,
                })
            })
            .collect())
    }

    async fn list_menu_item_preferences(&self, menu_item_id: Uuid) -> Result<Vec<MenuItemPreference>, CoreError> {
        let rows = self
            .db
            .query_all(Self::statement(
                r#"
                SELECT p.id, p.name, p.kind, p.description, mp.is_compatible
                FROM menu_item_preferences mp
                JOIN food_preferences p ON p.id = mp.preference_id
                WHERE mp.menu_item_id = $1
                ORDER BY p.kind, p.name
                "#,
                vec![menu_item_id.into()],
            ))
            .await
            .map_err(|e| {
                error!("Failed to list menu item preferences: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(rows
            .iter()
            .filter_map(|row| {
                let preference = preference_from_model(crate::entity::food_preferences::Model {
                    id: row.try_get("", "id").ok()?,
                    name: row.try_get("", "name").ok()?,
                    kind: row.try_get("", "kind").ok()?,
                    description: row.try_get("", "description").ok()?,
                })?;

                Some(MenuItemPreference {
                    preference,
                    is_compatible: row.try_get("", "is_compatible").ok()?,
                })
            })
            .collect())
    }

    async fn create_food_record(&self, record: FoodRecord) -> Result<FoodRecord, CoreError> {
        let created = FoodRecordEntity::insert(FoodRecordActiveModel {
            id: Set(record.id),
            user_id: Set(record.user_id),
            name: Set(record.name),
            description: Set(record.description),
            calories: Set(record.calories),
            protein: Set(record.protein),
            carbs: Set(record.carbs),
            fat: Set(record.fat),
            image_url: Set(record.image_url),
            consumed_at: Set(record.consumed_at.fixed_offset()),
            created_at: Set(record.created_at.fixed_offset()),
        })
        .exec_with_returning(&self.db)
        .await
        .map_err(|e| {
            error!("Failed to create food record: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(created.into())
    }

    async fn list_food_records(
        &self,
        user_id: Uuid,
        filter: FoodRecordFilter,
    ) -> Result<Vec<FoodRecord>, CoreError> {
        let records = FoodRecordEntity::find()
            .filter(FoodRecordColumn::UserId.eq(user_id))
            .order_by_desc(FoodRecordColumn::ConsumedAt)
            .order_by_desc(FoodRecordColumn::CreatedAt)
            .offset(filter.offset)
            .limit(filter.limit)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list food records: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(records.into_iter().map(FoodRecord::from).collect())
    }

    async fn get_food_record(&self, record_id: Uuid) -> Result<Option<FoodRecord>, CoreError> {
        let record = FoodRecordEntity::find_by_id(record_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get food record: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(record.map(FoodRecord::from))
    }

    async fn delete_food_record(&self, record_id: Uuid) -> Result<(), CoreError> {
        FoodRecordEntity::delete_by_id(record_id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete food record: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }
}
