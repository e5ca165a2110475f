use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    domain::restaurant::entities::{Category, MenuItem, Restaurant, Review},
    entity::{categories, menu_items, restaurant_categories, restaurants, reviews},
};

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            icon: model.icon,
        }
    }
}

impl From<&restaurants::Model> for Restaurant {
    fn from(model: &restaurants::Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            address: model.address.clone(),
            phone: model.phone.clone(),
            description: model.description.clone(),
            website: model.website.clone(),
            latitude: model.latitude,
            longitude: model.longitude,
            image_url: model.image_url.clone(),
            is_active: model.is_active,
            categories: Vec::new(),
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<restaurants::Model> for Restaurant {
    fn from(model: restaurants::Model) -> Self {
        Self::from(&model)
    }
}

impl From<menu_items::Model> for MenuItem {
    fn from(model: menu_items::Model) -> Self {
        Self {
            id: model.id,
            restaurant_id: model.restaurant_id,
            name: model.name,
            description: model.description,
            price: model.price,
            image_url: model.image_url,
            is_vegetarian: model.is_vegetarian,
            is_spicy: model.is_spicy,
            is_available: model.is_available,
        }
    }
}

impl From<reviews::Model> for Review {
    fn from(model: reviews::Model) -> Self {
        Self {
            id: model.id,
            restaurant_id: model.restaurant_id,
            author: model.author,
            rating: model.rating,
            comment: model.comment,
            created_at: model.created_at.to_utc(),
        }
    }
}

/// Groups category rows by restaurant, sorted by category name.
pub fn categories_by_restaurant(
    links: Vec<restaurant_categories::Model>,
    categories: Vec<categories::Model>,
) -> HashMap<Uuid, Vec<Category>> {
    let categories: HashMap<Uuid, Category> = categories
        .into_iter()
        .map(|model| (model.id, Category::from(model)))
        .collect();

    let mut grouped: HashMap<Uuid, Vec<Category>> = HashMap::new();
    for link in links {
        if let Some(category) = categories.get(&link.category_id) {
            grouped
                .entry(link.restaurant_id)
                .or_default()
                .push(category.clone());
        }
    }
    for list in grouped.values_mut() {
        list.sort_by(|a, b| a.name.cmp(&b.name));
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_grouped_per_restaurant() {
        let restaurant_id = Uuid::new_v4();
        let noodles = categories::Model {
            id: Uuid::new_v4(),
            name: "麵食".to_string(),
            icon: None,
        };
        let cafe = categories::Model {
            id: Uuid::new_v4(),
            name: "咖啡".to_string(),
            icon: Some("fas fa-mug-hot".to_string()),
        };
        let links = vec![
            restaurant_categories::Model {
                restaurant_id,
                category_id: noodles.id,
            },
            restaurant_categories::Model {
                restaurant_id,
                category_id: cafe.id,
            },
            restaurant_categories::Model {
                restaurant_id,
                category_id: Uuid::new_v4(),
            },
        ];

        let grouped = categories_by_restaurant(links, vec![noodles, cafe]);
        let names: Vec<&str> = grouped[&restaurant_id]
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["咖啡", "麵食"]);
    }
}
