use tracing::warn;

use crate::{
    domain::checkin::entities::{Checkin, Mood},
    entity::checkins,
};

impl From<checkins::Model> for Checkin {
    fn from(model: checkins::Model) -> Self {
        let mood = model.mood.parse().unwrap_or_else(|e| {
            warn!(checkin_id = %model.id, "unreadable mood, using neutral: {}", e);
            Mood::Neutral
        });

        Self {
            id: model.id,
            user_id: model.user_id,
            date: model.date,
            restaurant_name: model.restaurant_name,
            item: model.item,
            price: model.price,
            rating: model.rating,
            mood,
            comment: model.comment,
            photo_url: model.photo_url,
            latitude: model.latitude,
            longitude: model.longitude,
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<&Checkin> for checkins::ActiveModel {
    fn from(checkin: &Checkin) -> Self {
        use sea_orm::ActiveValue::Set;

        Self {
            id: Set(checkin.id),
            user_id: Set(checkin.user_id),
            date: Set(checkin.date),
            restaurant_name: Set(checkin.restaurant_name.clone()),
            item: Set(checkin.item.clone()),
            price: Set(checkin.price),
            rating: Set(checkin.rating),
            mood: Set(checkin.mood.as_str().to_string()),
            comment: Set(checkin.comment.clone()),
            photo_url: Set(checkin.photo_url.clone()),
            latitude: Set(checkin.latitude),
            longitude: Set(checkin.longitude),
            created_at: Set(checkin.created_at.fixed_offset()),
            updated_at: Set(checkin.updated_at.fixed_offset()),
        }
    }
}
