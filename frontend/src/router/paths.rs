use crate::api::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Home,
    Car,
    Login,
    SignUp,
    ForgotPassword,
    SelectRole,
    Onboarding,
    Client,
    ClientBookings,
    Seller,
    SellerListCar,
    SellerRentalAvailability,
    Staff,
    StaffBrands,
    Admin,
    AdminStaff,
}

impl AppRoute {
    pub const ALL: [AppRoute; 16] = [
        AppRoute::Home,
        AppRoute::Car,
        AppRoute::Login,
        AppRoute::SignUp,
        AppRoute::ForgotPassword,
        AppRoute::SelectRole,
        AppRoute::Onboarding,
        AppRoute::Client,
        AppRoute::ClientBookings,
        AppRoute::Seller,
        AppRoute::SellerListCar,
        AppRoute::SellerRentalAvailability,
        AppRoute::Staff,
        AppRoute::StaffBrands,
        AppRoute::Admin,
        AppRoute::AdminStaff,
    ];

    pub fn path(self) -> &'static str {
        match self {
            AppRoute::Home => "/",
            AppRoute::Car => "/car/:id",
            AppRoute::Login => "/login",
            AppRoute::SignUp => "/sign-up",
            AppRoute::ForgotPassword => "/forgot-password",
            AppRoute::SelectRole => "/select-role",
            AppRoute::Onboarding => "/onboarding",
            AppRoute::Client => "/client",
            AppRoute::ClientBookings => "/client/bookings",
            AppRoute::Seller => "/seller",
            AppRoute::SellerListCar => "/seller/list-car",
            AppRoute::SellerRentalAvailability => "/seller/rental-availability",
            AppRoute::Staff => "/staff",
            AppRoute::StaffBrands => "/staff/brands",
            AppRoute::Admin => "/admin",
            AppRoute::AdminStaff => "/admin/staff",
        }
    }

    /// Rental availability page with `car_id` preselected.
    pub fn rental_availability_for(car_id: i64) -> String {
        format!("{}/{}", AppRoute::SellerRentalAvailability.path(), car_id)
    }

    /// Where a role lands right after it is selected.
    pub fn landing_for(role: Role) -> AppRoute {
        match role {
            Role::Client => AppRoute::Home,
            Role::Seller => AppRoute::Seller,
            Role::Staff => AppRoute::Staff,
            Role::Superadmin => AppRoute::Admin,
        }
    }
}
