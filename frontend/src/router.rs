use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::{
        guard::RequireArea,
        layout::{ErrorMessage, Layout},
    },
    pages::{AreaPage, CarPage, HomePage, RentalAvailabilityPage, SelectRolePage},
    state::session::SessionProvider,
};

pub mod guards;
pub mod menu;
pub mod paths;

use guards::Guard;
use paths::AppRoute;

pub const RENTAL_AVAILABILITY_FOR_CAR_PATH: &str = "/seller/rental-availability/:car_id";

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/car/:id",
    "/login",
    "/sign-up",
    "/forgot-password",
    "/select-role",
    "/onboarding",
    "/client",
    "/client/bookings",
    "/seller",
    "/seller/list-car",
    "/seller/rental-availability",
    RENTAL_AVAILABILITY_FOR_CAR_PATH,
    "/staff",
    "/staff/brands",
    "/admin",
    "/admin/staff",
];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/", "/car/:id", "/select-role"];

/// The guard protecting `route`; `None` for public pages.
pub fn guard_for(route: AppRoute) -> Option<Guard> {
    match route {
        AppRoute::Home | AppRoute::Car | AppRoute::SelectRole => None,
        AppRoute::Login | AppRoute::SignUp | AppRoute::ForgotPassword => Some(Guard::AuthOnly),
        AppRoute::Onboarding => Some(Guard::Onboarding),
        AppRoute::Client | AppRoute::ClientBookings => Some(Guard::Client),
        AppRoute::Seller | AppRoute::SellerListCar | AppRoute::SellerRentalAvailability => {
            Some(Guard::Seller)
        }
        AppRoute::Staff | AppRoute::StaffBrands => Some(Guard::Staff),
        AppRoute::Admin | AppRoute::AdminStaff => Some(Guard::Superadmin),
    }
}

fn area_title(route: AppRoute) -> &'static str {
    match route {
        AppRoute::Home => "CarMarket",
        AppRoute::Car => "Car",
        AppRoute::Login => "Log in",
        AppRoute::SignUp => "Sign up",
        AppRoute::ForgotPassword => "Forgot password",
        AppRoute::SelectRole => "Select your role",
        AppRoute::Onboarding => "Complete your profile",
        AppRoute::Client => "My Account",
        AppRoute::ClientBookings => "My Bookings",
        AppRoute::Seller => "Seller Dashboard",
        AppRoute::SellerListCar => "List a Car",
        AppRoute::SellerRentalAvailability => "Rental Availability",
        AppRoute::Staff => "Staff Dashboard",
        AppRoute::StaffBrands => "Brands",
        AppRoute::Admin => "Admin Dashboard",
        AppRoute::AdminStaff => "Staff",
    }
}

#[cfg(target_arch = "wasm32")]
pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(ApiClient::new());
    provide_meta_context();
    view! {
        <Title text="CarMarket"/>
        <SessionProvider>
            <Router>
                <Routes>
                    <Route path=AppRoute::Home.path() view=HomePage/>
                    <Route path=AppRoute::Car.path() view=CarRoute/>
                    <Route path=AppRoute::SelectRole.path() view=SelectRolePage/>
                    <Route path=AppRoute::Login.path() view=|| area(AppRoute::Login)/>
                    <Route path=AppRoute::SignUp.path() view=|| area(AppRoute::SignUp)/>
                    <Route path=AppRoute::ForgotPassword.path() view=|| area(AppRoute::ForgotPassword)/>
                    <Route path=AppRoute::Onboarding.path() view=|| area(AppRoute::Onboarding)/>
                    <Route path=AppRoute::Client.path() view=|| area(AppRoute::Client)/>
                    <Route path=AppRoute::ClientBookings.path() view=|| area(AppRoute::ClientBookings)/>
                    <Route path=AppRoute::Seller.path() view=|| area(AppRoute::Seller)/>
                    <Route path=AppRoute::SellerListCar.path() view=|| area(AppRoute::SellerListCar)/>
                    <Route path=AppRoute::SellerRentalAvailability.path() view=RentalAvailabilityRoute/>
                    <Route path=RENTAL_AVAILABILITY_FOR_CAR_PATH view=RentalAvailabilityRoute/>
                    <Route path=AppRoute::Staff.path() view=|| area(AppRoute::Staff)/>
                    <Route path=AppRoute::StaffBrands.path() view=|| area(AppRoute::StaffBrands)/>
                    <Route path=AppRoute::Admin.path() view=|| area(AppRoute::Admin)/>
                    <Route path=AppRoute::AdminStaff.path() view=|| area(AppRoute::AdminStaff)/>
                </Routes>
            </Router>
        </SessionProvider>
    }
}

/// Wraps `children` in the guard for `route`, if it has one.
#[component]
fn Protected(route: AppRoute, children: ChildrenFn) -> impl IntoView {
    match guard_for(route) {
        Some(guard) => view! { <RequireArea guard=guard>{children()}</RequireArea> }.into_view(),
        None => children().into_view(),
    }
}

fn area(route: AppRoute) -> impl IntoView {
    let title = area_title(route);
    view! { <Protected route=route><AreaPage title=title/></Protected> }
}

#[component]
fn CarRoute() -> impl IntoView {
    let params = use_params_map();
    let car_id = move || params.with(|p| parse_id(p.get("id")));
    move || match car_id() {
        Some(id) => view! { <CarPage car_id=id/> }.into_view(),
        None => view! {
            <Layout>
                <ErrorMessage message="Car not found".to_string()/>
            </Layout>
        }
        .into_view(),
    }
}

#[component]
fn RentalAvailabilityRoute() -> impl IntoView {
    let params = use_params_map();
    view! {
        <Protected route=AppRoute::SellerRentalAvailability>
            {move || {
                let car_id = params.with(|p| parse_id(p.get("car_id")));
                view! { <RentalAvailabilityPage car_id=car_id/> }
            }}
        </Protected>
    }
}

fn parse_id(raw: Option<&String>) -> Option<i64> {
    raw.and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_app_route_is_registered() {
        for route in AppRoute::ALL {
            assert!(
                ROUTE_PATHS.contains(&route.path()),
                "route missing from ROUTE_PATHS: {}",
                route.path()
            );
        }
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }

    #[test]
    fn public_routes_are_exactly_the_unguarded_ones() {
        for route in AppRoute::ALL {
            assert_eq!(
                guard_for(route).is_none(),
                PUBLIC_ROUTE_PATHS.contains(&route.path()),
                "{}",
                route.path()
            );
        }
    }

    #[test]
    fn areas_use_their_role_guard() {
        assert_eq!(guard_for(AppRoute::Login), Some(Guard::AuthOnly));
        assert_eq!(guard_for(AppRoute::ForgotPassword), Some(Guard::AuthOnly));
        assert_eq!(guard_for(AppRoute::Onboarding), Some(Guard::Onboarding));
        assert_eq!(guard_for(AppRoute::ClientBookings), Some(Guard::Client));
        assert_eq!(
            guard_for(AppRoute::SellerRentalAvailability),
            Some(Guard::Seller)
        );
        assert_eq!(guard_for(AppRoute::StaffBrands), Some(Guard::Staff));
        assert_eq!(guard_for(AppRoute::AdminStaff), Some(Guard::Superadmin));
    }

    #[test]
    fn route_ids_parse_or_fall_back() {
        assert_eq!(parse_id(Some(&"42".to_string())), Some(42));
        assert_eq!(parse_id(Some(&"abc".to_string())), None);
        assert_eq!(parse_id(None), None);
    }
}
