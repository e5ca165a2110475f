use std::fmt;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{checkin::entities::Mood, common::entities::app_errors::CoreError};

pub const RANKING_LIMIT: u64 = 10;

pub struct CreateCheckinInput {
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

pub struct UpdateCheckinInput {
    pub checkin_id: Uuid,
    pub date: Option<NaiveDate>,
    pub restaurant_name: Option<String>,
    pub item: Option<String>,
    pub price: Option<i32>,
    pub rating: Option<i16>,
    pub mood: Option<Mood>,
    pub comment: Option<String>,
    pub photo_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct CheckinFilter {
    pub offset: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CalendarEvent {
    pub title: String,
    pub start: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MapMarker {
    pub id: Uuid,
    pub restaurant_name: String,
    pub item: String,
    pub date: NaiveDate,
    pub rating: i16,
    pub mood: Mood,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserRanking {
    pub user_id: Uuid,
    pub username: String,
    pub checkin_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RestaurantRanking {
    pub restaurant_name: String,
    pub checkin_count: i64,
    pub avg_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserRankingBoard {
    pub month: String,
    pub entries: Vec<UserRanking>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RestaurantRankingBoard {
    pub month: String,
    pub entries: Vec<RestaurantRanking>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MyPoints {
    pub total_checkins: i64,
    pub month_checkins: i64,
    pub total_points: i64,
    pub month_points: i64,
}

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn current() -> Self {
        let today = Utc::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::Invalid(format!("invalid month: {value}"));
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let month = Self {
            year: year.parse().map_err(|_| invalid())?,
            month: month.parse().map_err(|_| invalid())?,
        };
        month.first_day().ok_or_else(invalid)?;
        Ok(month)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Half-open date range `[first day, first day of next month)`.
    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.first_day()?;
        let end = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)?
        };
        Some((start, end))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_parses_and_formats() {
        let month = Month::parse("2025-03").unwrap();
        assert_eq!(month, Month { year: 2025, month: 3 });
        assert_eq!(month.to_string(), "2025-03");
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert!(Month::parse("2025-13").is_err());
        assert!(Month::parse("march").is_err());
    }

    #[test]
    fn december_range_rolls_over() {
        let (start, end) = Month { year: 2024, month: 12 }.range().unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }
}
