use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::{generate_timestamp, policies::Owned};

pub const POINTS_PER_CHECKIN: i64 = 10;
pub const PHOTO_BONUS: i64 = 5;
pub const LONG_COMMENT_BONUS: i64 = 2;
pub const LONG_COMMENT_CHARS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Satisfied,
    Neutral,
    Sad,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Satisfied => "satisfied",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happy" => Ok(Mood::Happy),
            "satisfied" => Ok(Mood::Satisfied),
            "neutral" => Ok(Mood::Neutral),
            "sad" => Ok(Mood::Sad),
            other => Err(format!("unknown mood: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Checkin {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub restaurant_name: String,
    pub item: String,
    pub price: i32,
    pub rating: i16,
    pub mood: Mood,
    pub comment: String,
    pub photo_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct CheckinConfig {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub restaurant_name: String,
    pub item: String,
    pub price: i32,
    pub rating: i16,
    pub mood: Mood,
    pub comment: String,
    pub photo_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Checkin {
    pub fn new(config: CheckinConfig) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            user_id: config.user_id,
            date: config.date,
            restaurant_name: config.restaurant_name,
            item: config.item,
            price: config.price,
            rating: config.rating,
            mood: config.mood,
            comment: config.comment,
            photo_url: config.photo_url,
            latitude: config.latitude,
            longitude: config.longitude,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn points(&self) -> i64 {
        let mut points = POINTS_PER_CHECKIN;
        if self.photo_url.as_ref().is_some_and(|p| !p.is_empty()) {
            points += PHOTO_BONUS;
        }
        if self.comment.trim().chars().count() >= LONG_COMMENT_CHARS {
            points += LONG_COMMENT_BONUS;
        }
        points
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

impl Owned for Checkin {
    fn owner_id(&self) -> Option<Uuid> {
        Some(self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkin(comment: &str, photo_url: Option<&str>) -> Checkin {
        Checkin::new(CheckinConfig {
            user_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            restaurant_name: "鬍鬚張".to_string(),
            item: "魯肉飯".to_string(),
            price: 60,
            rating: 4,
            mood: Mood::Satisfied,
            comment: comment.to_string(),
            photo_url: photo_url.map(str::to_string),
            latitude: None,
            longitude: None,
        })
    }

    #[test]
    fn plain_checkin_earns_base_points() {
        assert_eq!(checkin("好吃", None).points(), 10);
    }

    #[test]
    fn photo_and_long_comment_earn_bonuses() {
        let comment = "滷肉香氣十足，肥瘦比例剛好，搭配醃黃蘿蔔非常解膩，下次還要再來";
        assert_eq!(checkin(comment, Some("/media/checkin_photos/a.jpg")).points(), 17);
    }
}
