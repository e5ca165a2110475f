use std::collections::HashMap;

use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Statement, TransactionTrait, Value,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        restaurant::{
            entities::{Category, MenuItem, RatingStats, Restaurant, RestaurantSummary, Review},
            ports::RestaurantRepository,
            value_objects::{CategoryMatch, LocalMatchCriteria, RestaurantQuery},
        },
    },
    entity::{
        categories::{
            ActiveModel as CategoryActiveModel, Column as CategoryColumn, Entity as CategoryEntity,
        },
        menu_items::{
            ActiveModel as MenuItemActiveModel, Column as MenuItemColumn, Entity as MenuItemEntity,
        },
        restaurant_categories::{
            ActiveModel as RestaurantCategoryActiveModel, Column as RestaurantCategoryColumn,
            Entity as RestaurantCategoryEntity,
        },
        restaurants::{self, ActiveModel, Column, Entity},
        reviews::{ActiveModel as ReviewActiveModel, Column as ReviewColumn, Entity as ReviewEntity},
    },
    infrastructure::restaurant::mappers::categories_by_restaurant,
};

const RESTAURANT_SUMMARY_SQL: &str = r#"
    SELECT r.id,
           COALESCE(AVG(rv.rating), 0)::float8 AS avg_rating,
           COUNT(rv.id) AS review_count
    FROM restaurants r
    LEFT JOIN reviews rv ON rv.restaurant_id = r.id
"#;

/// `%text%` for ILIKE, with the LIKE wildcards in `text` escaped.
fn like_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

struct SummaryClause {
    conditions: String,
    having: String,
    values: Vec<Value>,
}

fn summary_clause(query: &RestaurantQuery) -> SummaryClause {
    let mut conditions = vec!["r.is_active".to_string()];
    let mut values: Vec<Value> = Vec::new();

    if let Some(category_id) = query.category_id {
        values.push(category_id.into());
        conditions.push(format!(
            "EXISTS (SELECT 1 FROM restaurant_categories rc WHERE rc.restaurant_id = r.id AND rc.category_id = ${})",
            values.len()
        ));
    }

    if let Some(text) = &query.name_or_address {
        values.push(like_pattern(text).into());
        let n = values.len();
        conditions.push(format!("(r.name ILIKE ${n} OR r.address ILIKE ${n})"));
    }

    let mut having = String::new();
    if let Some(min_rating) = query.min_rating {
        values.push(min_rating.into());
        having = format!("HAVING COALESCE(AVG(rv.rating), 0) >= ${}", values.len());
    }

    SummaryClause {
        conditions: conditions.join(" AND "),
        having,
        values,
    }
}

#[derive(Debug, Clone)]
pub struct PostgresRestaurantRepository {
    pub db: DatabaseConnection,
}

impl PostgresRestaurantRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads restaurants with their categories, keeping the order of `ids`.
    async fn load_restaurants(&self, ids: Vec<Uuid>) -> Result<Vec<Restaurant>, CoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Entity::find()
            .filter(Column::Id.is_in(ids.clone()))
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to load restaurants: {}", e);
                CoreError::InternalServerError
            })?;

        let links = RestaurantCategoryEntity::find()
            .filter(RestaurantCategoryColumn::RestaurantId.is_in(ids.clone()))
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to load restaurant categories: {}", e);
                CoreError::InternalServerError
            })?;

        let category_ids: Vec<Uuid> = links.iter().map(|link| link.category_id).collect();
        let categories = if category_ids.is_empty() {
            Vec::new()
        } else {
            CategoryEntity::find()
                .filter(CategoryColumn::Id.is_in(category_ids))
                .all(&self.db)
                .await
                .map_err(|e| {
                    error!("Failed to load categories: {}", e);
                    CoreError::InternalServerError
                })?
        };

        let mut grouped = categories_by_restaurant(links, categories);
        let mut by_id: HashMap<Uuid, restaurants::Model> =
            models.into_iter().map(|model| (model.id, model)).collect();

        Ok(ids
            .iter()
            .filter_map(|id| {
                by_id.remove(id).map(|model| {
                    let mut restaurant = Restaurant::from(model);
                    restaurant.categories = grouped.remove(id).unwrap_or_default();
                    restaurant
                })
            })
            .collect())
    }

    async fn query_summaries(
        &self,
        sql: String,
        values: Vec<Value>,
    ) -> Result<Vec<RestaurantSummary>, CoreError> {
        let rows = self
            .db
            .query_all(Statement::from_sql_and_values(
                sea_orm::DatabaseBackend::Postgres,
                sql,
                values,
            ))
            .await
            .map_err(|e| {
                error!("Failed to query restaurant summaries: {}", e);
                CoreError::InternalServerError
            })?;

        let stats: Vec<(Uuid, f64, i64)> = rows
            .iter()
            .filter_map(|row| {
                Some((
                    row.try_get("", "id").ok()?,
                    row.try_get("", "avg_rating").ok()?,
                    row.try_get("", "review_count").ok()?,
                ))
            })
            .collect();

        let restaurants = self
            .load_restaurants(stats.iter().map(|(id, _, _)| *id).collect())
            .await?;
        let mut by_id: HashMap<Uuid, Restaurant> = restaurants
            .into_iter()
            .map(|restaurant| (restaurant.id, restaurant))
            .collect();

        Ok(stats
            .into_iter()
            .filter_map(|(id, avg_rating, review_count)| {
                by_id.remove(&id).map(|restaurant| RestaurantSummary {
                    restaurant,
                    avg_rating,
                    review_count,
                })
            })
            .collect())
    }

    async fn replace_categories<C: ConnectionTrait>(
        conn: &C,
        restaurant_id: Uuid,
        categories: &[Category],
    ) -> Result<(), CoreError> {
        RestaurantCategoryEntity::delete_many()
            .filter(RestaurantCategoryColumn::RestaurantId.eq(restaurant_id))
            .exec(conn)
            .await
            .map_err(|e| {
                error!("Failed to clear restaurant categories: {}", e);
                CoreError::InternalServerError
            })?;

        if categories.is_empty() {
            return Ok(());
        }

        let links: Vec<RestaurantCategoryActiveModel> = categories
            .iter()
            .map(|category| RestaurantCategoryActiveModel {
                restaurant_id: Set(restaurant_id),
                category_id: Set(category.id),
            })
            .collect();

        RestaurantCategoryEntity::insert_many(links)
            .exec(conn)
            .await
            .map_err(|e| {
                error!("Failed to link restaurant categories: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }
}

impl RestaurantRepository for PostgresRestaurantRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, CoreError> {
        let categories = CategoryEntity::find()
            .order_by_asc(CategoryColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list categories: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(categories.into_iter().map(Category::from).collect())
    }

    async fn get_categories_by_ids(&self, category_ids: Vec<Uuid>) -> Result<Vec<Category>, CoreError> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }

        let categories = CategoryEntity::find()
            .filter(CategoryColumn::Id.is_in(category_ids))
            .order_by_asc(CategoryColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get categories: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(categories.into_iter().map(Category::from).collect())
    }

    async fn create_category(&self, category: Category) -> Result<Category, CoreError> {
        let created = CategoryEntity::insert(CategoryActiveModel {
            id: Set(category.id),
            name: Set(category.name),
            icon: Set(category.icon),
        })
        .exec_with_returning(&self.db)
        .await
        .map_err(|e| {
            error!("Failed to create category: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(created.into())
    }

    async fn search_categories(&self, query: String, limit: u64) -> Result<Vec<CategoryMatch>, CoreError> {
        let stmt = Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            r#"
            SELECT c.id, c.name, c.icon,
                   COUNT(r.id) FILTER (WHERE r.is_active) AS restaurant_count
            FROM categories c
            LEFT JOIN restaurant_categories rc ON rc.category_id = c.id
            LEFT JOIN restaurants r ON r.id = rc.restaurant_id
            WHERE c.name ILIKE $1
            GROUP BY c.id
            ORDER BY c.name
            LIMIT $2
            "#,
            [like_pattern(&query).into(), (limit as i64).into()],
        );

        let rows = self.db.query_all(stmt).await.map_err(|e| {
            error!("Failed to search categories: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(CategoryMatch {
                    category: Category {
                        id: row.try_get("", "id").ok()?,
                        name: row.try_get("", "name").ok()?,
                        icon: row.try_get("", "icon").ok()?,
                    },
                    restaurant_count: row.try_get("", "restaurant_count").ok()?,
                })
            })
            .collect())
    }

    async fn top_rated(&self, limit: u64) -> Result<Vec<RestaurantSummary>, CoreError> {
        let sql = format!(
            "{RESTAURANT_SUMMARY_SQL} WHERE r.is_active GROUP BY r.id \
             ORDER BY avg_rating DESC, review_count DESC, r.name ASC LIMIT $1"
        );

        self.query_summaries(sql, vec![(limit as i64).into()]).await
    }

    async fn count_restaurants(&self, query: RestaurantQuery) -> Result<u64, CoreError> {
        let clause = summary_clause(&query);
        let sql = format!(
            "SELECT COUNT(*) AS count FROM ({RESTAURANT_SUMMARY_SQL} WHERE {} GROUP BY r.id {}) matched",
            clause.conditions, clause.having
        );

        let row = self
            .db
            .query_one(Statement::from_sql_and_values(
                sea_orm::DatabaseBackend::Postgres,
                sql,
                clause.values,
            ))
            .await
            .map_err(|e| {
                error!("Failed to count restaurants: {}", e);
                CoreError::InternalServerError
            })?;

        let count = row
            .and_then(|row| row.try_get::<i64>("", "count").ok())
            .unwrap_or(0);

        Ok(count.max(0) as u64)
    }

    async fn search_restaurants(
        &self,
        query: RestaurantQuery,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<RestaurantSummary>, CoreError> {
        let clause = summary_clause(&query);
        let mut values = clause.values;
        values.push((limit as i64).into());
        let limit_index = values.len();
        values.push((offset as i64).into());
        let offset_index = values.len();

        let sql = format!(
            "{RESTAURANT_SUMMARY_SQL} WHERE {} GROUP BY r.id {} \
             ORDER BY r.name ASC, r.id ASC LIMIT ${limit_index} OFFSET ${offset_index}",
            clause.conditions, clause.having
        );

        self.query_summaries(sql, values).await
    }

    async fn get_restaurant(&self, restaurant_id: Uuid) -> Result<Option<Restaurant>, CoreError> {
        Ok(self
            .load_restaurants(vec![restaurant_id])
            .await?
            .into_iter()
            .next())
    }

    async fn find_by_name_with_coordinates(&self, name: String) -> Result<Option<Restaurant>, CoreError> {
        let model = Entity::find()
            .filter(Column::Name.eq(name))
            .filter(Column::Latitude.is_not_null())
            .filter(Column::Longitude.is_not_null())
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to find restaurant by name: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(model.map(Restaurant::from))
    }

    async fn match_local(&self, criteria: LocalMatchCriteria) -> Result<Vec<Restaurant>, CoreError> {
        let mut conditions = vec!["r.is_active".to_string()];
        let mut values: Vec<Value> = Vec::new();

        if let Some(cuisine) = &criteria.cuisine_type {
            values.push(like_pattern(cuisine).into());
            conditions.push(format!(
                "EXISTS (SELECT 1 FROM restaurant_categories rc JOIN categories c ON c.id = rc.category_id \
                 WHERE rc.restaurant_id = r.id AND c.name ILIKE ${})",
                values.len()
            ));
        }

        if !criteria.specific_foods.is_empty() {
            let foods: Vec<String> = criteria
                .specific_foods
                .iter()
                .map(|food| {
                    values.push(like_pattern(food).into());
                    format!("m.name ILIKE ${}", values.len())
                })
                .collect();
            conditions.push(format!(
                "EXISTS (SELECT 1 FROM menu_items m WHERE m.restaurant_id = r.id AND ({}))",
                foods.join(" OR ")
            ));
        }

        if !criteria.search_keywords.is_empty() {
            let keywords: Vec<String> = criteria
                .search_keywords
                .iter()
                .map(|keyword| {
                    values.push(like_pattern(keyword).into());
                    let n = values.len();
                    format!("r.name ILIKE ${n} OR r.description ILIKE ${n}")
                })
                .collect();
            conditions.push(format!("({})", keywords.join(" OR ")));
        }

        let sql = format!(
            "SELECT r.id FROM restaurants r WHERE {} ORDER BY r.name",
            conditions.join(" AND ")
        );

        let rows = self
            .db
            .query_all(Statement::from_sql_and_values(
                sea_orm::DatabaseBackend::Postgres,
                sql,
                values,
            ))
            .await
            .map_err(|e| {
                error!("Failed to match local restaurants: {}", e);
                CoreError::InternalServerError
            })?;

        let ids: Vec<Uuid> = rows
            .iter()
            .filter_map(|row| row.try_get("", "id").ok())
            .collect();

        self.load_restaurants(ids).await
    }

    async fn create_restaurant(&self, restaurant: Restaurant) -> Result<Restaurant, CoreError> {
        let txn = self.db.begin().await.map_err(|e| {
            error!("Failed to begin transaction: {}", e);
            CoreError::InternalServerError
        })?;

        Entity::insert(ActiveModel {
            id: Set(restaurant.id),
            name: Set(restaurant.name.clone()),
            address: Set(restaurant.address.clone()),
            phone: Set(restaurant.phone.clone()),
            description: Set(restaurant.description.clone()),
            website: Set(restaurant.website.clone()),
            latitude: Set(restaurant.latitude),
            longitude: Set(restaurant.longitude),
            image_url: Set(restaurant.image_url.clone()),
            is_active: Set(restaurant.is_active),
            created_at: Set(restaurant.created_at.fixed_offset()),
            updated_at: Set(restaurant.updated_at.fixed_offset()),
        })
        .exec(&txn)
        .await
        .map_err(|e| {
            error!("Failed to create restaurant: {}", e);
            CoreError::InternalServerError
        })?;

        Self::replace_categories(&txn, restaurant.id, &restaurant.categories).await?;

        txn.commit().await.map_err(|e| {
            error!("Failed to commit restaurant creation: {}", e);
            CoreError::InternalServerError
        })?;

        self.get_restaurant(restaurant.id)
            .await?
            .ok_or(CoreError::InternalServerError)
    }

    async fn update_restaurant(&self, restaurant: Restaurant) -> Result<Restaurant, CoreError> {
        let txn = self.db.begin().await.map_err(|e| {
            error!("Failed to begin transaction: {}", e);
            CoreError::InternalServerError
        })?;

        Entity::update(ActiveModel {
            id: Set(restaurant.id),
            name: Set(restaurant.name.clone()),
            address: Set(restaurant.address.clone()),
            phone: Set(restaurant.phone.clone()),
            description: Set(restaurant.description.clone()),
            website: Set(restaurant.website.clone()),
            latitude: Set(restaurant.latitude),
            longitude: Set(restaurant.longitude),
            image_url: Set(restaurant.image_url.clone()),
            is_active: Set(restaurant.is_active),
            created_at: Set(restaurant.created_at.fixed_offset()),
            updated_at: Set(restaurant.updated_at.fixed_offset()),
        })
        .exec(&txn)
        .await
        .map_err(|e| {
            error!("Failed to update restaurant: {}", e);
            CoreError::InternalServerError
        })?;

        Self::replace_categories(&txn, restaurant.id, &restaurant.categories).await?;

        txn.commit().await.map_err(|e| {
            error!("Failed to commit restaurant update: {}", e);
            CoreError::InternalServerError
        })?;

        self.get_restaurant(restaurant.id)
            .await?
            .ok_or(CoreError::NotFound)
    }

    async fn delete_restaurant(&self, restaurant_id: Uuid) -> Result<(), CoreError> {
        let result = Entity::delete_by_id(restaurant_id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete restaurant: {}", e);
                CoreError::InternalServerError
            })?;

        if result.rows_affected == 0 {
            return Err(CoreError::NotFound);
        }

        Ok(())
    }

    async fn rating_stats(&self, restaurant_id: Uuid) -> Result<RatingStats, CoreError> {
        let stmt = Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            r#"
            SELECT COALESCE(AVG(rating), 0)::float8 AS avg_rating,
                   COUNT(*) AS review_count
            FROM reviews
            WHERE restaurant_id = $1
            "#,
            [restaurant_id.into()],
        );

        let row = self.db.query_one(stmt).await.map_err(|e| {
            error!("Failed to compute rating stats: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(row
            .and_then(|row| {
                Some(RatingStats {
                    avg_rating: row.try_get("", "avg_rating").ok()?,
                    review_count: row.try_get("", "review_count").ok()?,
                })
            })
            .unwrap_or_default())
    }

    async fn list_reviews(&self, restaurant_id: Uuid) -> Result<Vec<Review>, CoreError> {
        let reviews = ReviewEntity::find()
            .filter(ReviewColumn::RestaurantId.eq(restaurant_id))
            .order_by_desc(ReviewColumn::CreatedAt)
            .order_by_desc(ReviewColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list reviews: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(reviews.into_iter().map(Review::from).collect())
    }

    async fn create_review(&self, review: Review) -> Result<Review, CoreError> {
        let created = ReviewEntity::insert(ReviewActiveModel {
            id: Set(review.id),
            restaurant_id: Set(review.restaurant_id),
            author: Set(review.author),
            rating: Set(review.rating),
            comment: Set(review.comment),
            created_at: Set(review.created_at.fixed_offset()),
        })
        .exec_with_returning(&self.db)
        .await
        .map_err(|e| {
            error!("Failed to create review: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(created.into())
    }

    async fn list_menu_items(
        &self,
        restaurant_id: Uuid,
        only_available: bool,
    ) -> Result<Vec<MenuItem>, CoreError> {
        let mut query = MenuItemEntity::find().filter(MenuItemColumn::RestaurantId.eq(restaurant_id));
        if only_available {
            query = query.filter(MenuItemColumn::IsAvailable.eq(true));
        }

        let items = query
            .order_by_asc(MenuItemColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list menu items: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(items.into_iter().map(MenuItem::from).collect())
    }

    async fn get_menu_item(&self, menu_item_id: Uuid) -> Result<Option<MenuItem>, CoreError> {
        let item = MenuItemEntity::find_by_id(menu_item_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get menu item: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(item.map(MenuItem::from))
    }

    async fn list_available_menu_items(&self) -> Result<Vec<MenuItem>, CoreError> {
        let items = MenuItemEntity::find()
            .filter(MenuItemColumn::IsAvailable.eq(true))
            .order_by_asc(MenuItemColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list available menu items: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(items.into_iter().map(MenuItem::from).collect())
    }

    async fn create_menu_item(&self, menu_item: MenuItem) -> Result<MenuItem, CoreError> {
        let created = MenuItemEntity::insert(MenuItemActiveModel {
            id: Set(menu_item.id),
            restaurant_id: Set(menu_item.restaurant_id),
            name: Set(menu_item.name),
            description: Set(menu_item.description),
            price: Set(menu_item.price),
            image_url: Set(menu_item.image_url),
            is_vegetarian: Set(menu_item.is_vegetarian),
            is_spicy: Set(menu_item.is_spicy),
            is_available: Set(menu_item.is_available),
        })
        .exec_with_returning(&self.db)
        .await
        .map_err(|e| {
            error!("Failed to create menu item: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(created.into())
    }

    async fn count_all(&self) -> Result<u64, CoreError> {
        Entity::find().count(&self.db).await.map_err(|e| {
            error!("Failed to count restaurants: {}", e);
            CoreError::InternalServerError
        })
    }
}
