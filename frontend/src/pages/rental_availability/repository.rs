use crate::api::{ApiClient, ApiError, CarSummary, ListingType};
use crate::availability::{add_period, remove_period, AvailabilityPeriod, PeriodError};
use chrono::{Months, NaiveDate};
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityChange {
    Add(AvailabilityPeriod),
    Remove(AvailabilityPeriod),
}

impl AvailabilityChange {
    pub fn period(&self) -> AvailabilityPeriod {
        match self {
            AvailabilityChange::Add(period) | AvailabilityChange::Remove(period) => *period,
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            AvailabilityChange::Add(_) => "Availability period added successfully!",
            AvailabilityChange::Remove(_) => "Availability period removed successfully!",
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum AvailabilityFlowError {
    #[error(transparent)]
    Invalid(#[from] PeriodError),
    #[error(transparent)]
    Request(#[from] ApiError),
}

/// Periods are shown for one year starting today.
pub fn query_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let end = today.checked_add_months(Months::new(12)).unwrap_or(today);
    (today, end)
}

#[derive(Clone)]
pub struct RentalAvailabilityRepository {
    client: Rc<ApiClient>,
}

impl Default for RentalAvailabilityRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RentalAvailabilityRepository {
    pub fn new() -> Self {
        Self {
            client: Rc::new(ApiClient::new()),
        }
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    /// The seller's cars listed for rent.
    pub async fn rental_cars(&self) -> Result<Vec<CarSummary>, ApiError> {
        let cars = self.client.get_seller_cars().await?;
        Ok(cars
            .into_iter()
            .filter(|car| car.listing_type == ListingType::Rent)
            .collect())
    }

    pub async fn load_periods(
        &self,
        car_id: i64,
        today: NaiveDate,
    ) -> Result<Vec<AvailabilityPeriod>, ApiError> {
        let (start, end) = query_window(today);
        let mut periods = self
            .client
            .get_available_dates_in_range(car_id, start, end)
            .await?;
        periods.sort();
        Ok(periods)
    }

    /// Validates `change` against `current`, sends it, then refetches. The
    /// server's answer wins; a mismatch with the local preview is only
    /// logged. On error nothing was applied and `current` stays valid.
    pub async fn apply_change(
        &self,
        car_id: i64,
        change: AvailabilityChange,
        current: &[AvailabilityPeriod],
        today: NaiveDate,
    ) -> Result<Vec<AvailabilityPeriod>, AvailabilityFlowError> {
        let preview = match change {
            AvailabilityChange::Add(period) => add_period(current, period, today)?,
            AvailabilityChange::Remove(period) => remove_period(current, period)?,
        };

        let periods = vec![change.period()];
        match change {
            AvailabilityChange::Add(_) => {
                self.client.add_rental_availability(car_id, periods).await?
            }
            AvailabilityChange::Remove(_) => {
                self.client
                    .remove_rental_availability(car_id, periods)
                    .await?
            }
        }

        match self.load_periods(car_id, today).await {
            Ok(fetched) => {
                if fetched != preview {
                    log::info!(
                        "Server availability for car {} differs from local preview ({} vs {} periods)",
                        car_id,
                        fetched.len(),
                        preview.len()
                    );
                }
                Ok(fetched)
            }
            Err(err) => {
                log::warn!("Refetch after availability change failed: {}", err);
                Ok(preview)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_window_spans_one_year() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            query_window(today),
            (today, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap())
        );
    }
}
