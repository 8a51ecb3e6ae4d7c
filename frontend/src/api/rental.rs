use chrono::NaiveDate;
use serde_json::Value;

use super::{
    client::ApiClient,
    types::{ApiError, AvailabilityMutationRequest, AvailabilityRangeQuery, CarSummary},
};
use crate::availability::AvailabilityPeriod;

impl ApiClient {
    pub async fn get_seller_cars(&self) -> Result<Vec<CarSummary>, ApiError> {
        self.get_json("/seller/cars").await
    }

    pub async fn add_rental_availability(
        &self,
        car_id: i64,
        periods: Vec<AvailabilityPeriod>,
    ) -> Result<(), ApiError> {
        let payload = AvailabilityMutationRequest { car_id, periods };
        let _: Value = self
            .post_json("/seller/rental-availability/add", &payload)
            .await?;
        Ok(())
    }

    pub async fn remove_rental_availability(
        &self,
        car_id: i64,
        periods: Vec<AvailabilityPeriod>,
    ) -> Result<(), ApiError> {
        let payload = AvailabilityMutationRequest { car_id, periods };
        let _: Value = self
            .post_json("/seller/rental-availability/remove", &payload)
            .await?;
        Ok(())
    }

    pub async fn get_available_dates_in_range(
        &self,
        car_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<AvailabilityPeriod>, ApiError> {
        let query = AvailabilityRangeQuery {
            car_id,
            start_date,
            end_date,
        };
        self.post_json("/seller/rental-availability/available-dates", &query)
            .await
    }
}
