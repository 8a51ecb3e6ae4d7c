pub mod area;
pub mod car;
pub mod rental_availability;
pub mod select_role;

pub use area::{AreaPage, HomePage};
pub use car::CarPage;
pub use rental_availability::RentalAvailabilityPage;
pub use select_role::SelectRolePage;
