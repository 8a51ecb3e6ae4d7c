use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceQuote {
    pub days: i64,
    pub total: f64,
}

/// Both the pickup and the return day are billed.
pub fn compute_price(price_per_day: f64, start_date: NaiveDate, end_date: NaiveDate) -> PriceQuote {
    let days = (end_date - start_date).num_days().abs() + 1;
    let total = (price_per_day * days as f64 * 100.0).round() / 100.0;
    PriceQuote { days, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn counts_both_endpoints() {
        let quote = compute_price(100.0, d("2024-06-01"), d("2024-06-03"));
        assert_eq!(quote, PriceQuote { days: 3, total: 300.0 });
    }

    #[test]
    fn single_day_rental_costs_one_day() {
        let quote = compute_price(45.5, d("2024-06-01"), d("2024-06-01"));
        assert_eq!(quote.days, 1);
        assert_eq!(quote.total, 45.5);
    }

    #[test]
    fn total_is_rounded_to_cents() {
        let quote = compute_price(33.333, d("2024-06-01"), d("2024-06-03"));
        assert_eq!(quote.days, 3);
        assert_eq!(quote.total, 100.0);

        let quote = compute_price(19.999, d("2024-06-01"), d("2024-06-02"));
        assert_eq!(quote.total, 40.0);
    }

    #[test]
    fn reversed_dates_use_absolute_span() {
        let quote = compute_price(10.0, d("2024-06-05"), d("2024-06-01"));
        assert_eq!(quote.days, 5);
        assert_eq!(quote.total, 50.0);
    }

    #[test]
    fn span_crosses_month_and_leap_day() {
        let quote = compute_price(20.0, d("2024-02-28"), d("2024-03-01"));
        assert_eq!(quote.days, 3);
    }
}
