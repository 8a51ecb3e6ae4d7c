//! Rental availability periods and booking price/availability logic.
//!
//! The reconciler functions compute the display state the server is expected
//! to reach after an add or remove. Callers treat the result as a preview and
//! refetch from the server after every mutation.

mod booking;
mod period;
mod pricing;
mod reconciler;

pub use booking::{selectable_range, AvailabilityCheck, BookingForm, BookingRefusal};
pub use period::{parse_date_input, parse_period_input, AvailabilityPeriod, PeriodError};
pub use pricing::{compute_price, PriceQuote};
pub use reconciler::{add_period, is_canonical, remove_period};
