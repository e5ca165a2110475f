use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    checkin::{
        entities::Checkin,
        value_objects::{
            CalendarEvent, CheckinFilter, CreateCheckinInput, MapMarker, Month, MyPoints,
            RestaurantRanking, RestaurantRankingBoard, UpdateCheckinInput, UserRanking,
            UserRankingBoard,
        },
    },
    common::entities::app_errors::CoreError,
};

pub trait CheckinService: Send + Sync {
    fn create_checkin(
        &self,
        identity: Identity,
        input: CreateCheckinInput,
    ) -> impl Future<Output = Result<Checkin, CoreError>> + Send;

    fn get_checkin(
        &self,
        identity: Identity,
        checkin_id: Uuid,
    ) -> impl Future<Output = Result<Checkin, CoreError>> + Send;

    fn update_checkin(
        &self,
        identity: Identity,
        input: UpdateCheckinInput,
    ) -> impl Future<Output = Result<Checkin, CoreError>> + Send;

    fn delete_checkin(
        &self,
        identity: Identity,
        checkin_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn list_checkins(
        &self,
        identity: Identity,
        filter: CheckinFilter,
    ) -> impl Future<Output = Result<Vec<Checkin>, CoreError>> + Send;

    fn calendar(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<Vec<CalendarEvent>, CoreError>> + Send;

    fn map_markers(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<Vec<MapMarker>, CoreError>> + Send;

    fn user_ranking(
        &self,
        month: Option<Month>,
    ) -> impl Future<Output = Result<UserRankingBoard, CoreError>> + Send;

    fn restaurant_ranking(
        &self,
        month: Option<Month>,
    ) -> impl Future<Output = Result<RestaurantRankingBoard, CoreError>> + Send;

    fn my_points(&self, identity: Identity)
    -> impl Future<Output = Result<MyPoints, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait CheckinRepository: Send + Sync {
    fn create(&self, checkin: Checkin) -> impl Future<Output = Result<Checkin, CoreError>> + Send;

    /// Only returns the check-in when it belongs to `user_id`.
    fn get_for_user(
        &self,
        checkin_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<Checkin>, CoreError>> + Send;

    fn update(&self, checkin: Checkin) -> impl Future<Output = Result<Checkin, CoreError>> + Send;

    fn delete(
        &self,
        checkin_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Newest date first, then newest creation first.
    fn list_for_user(
        &self,
        user_id: Uuid,
        filter: Option<CheckinFilter>,
    ) -> impl Future<Output = Result<Vec<Checkin>, CoreError>> + Send;

    fn user_ranking(
        &self,
        from: NaiveDate,
        until: NaiveDate,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<UserRanking>, CoreError>> + Send;

    fn restaurant_ranking(
        &self,
        from: NaiveDate,
        until: NaiveDate,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<RestaurantRanking>, CoreError>> + Send;
}
