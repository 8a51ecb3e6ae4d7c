use super::paths::AppRoute;
use crate::api::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    SwitchRole,
    Logout,
}

/// Header menu entry, shown only while one of `roles` is the selected role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Link {
        label: &'static str,
        route: AppRoute,
        roles: &'static [Role],
    },
    Action {
        label: &'static str,
        action: MenuAction,
        roles: &'static [Role],
    },
}

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Link { label, .. } | MenuItem::Action { label, .. } => label,
        }
    }

    pub fn roles(&self) -> &'static [Role] {
        match self {
            MenuItem::Link { roles, .. } | MenuItem::Action { roles, .. } => roles,
        }
    }
}

const EVERY_ROLE: &[Role] = &Role::ALL;
const SELLER: &[Role] = &[Role::Seller];
const STAFF_OR_ADMIN: &[Role] = &[Role::Staff, Role::Superadmin];
const SUPERADMIN: &[Role] = &[Role::Superadmin];

pub const DEFAULT_MENU: &[MenuItem] = &[
    MenuItem::Action {
        label: "Switch Role",
        action: MenuAction::SwitchRole,
        roles: EVERY_ROLE,
    },
    MenuItem::Link {
        label: "Dashboard",
        route: AppRoute::Seller,
        roles: SELLER,
    },
    MenuItem::Link {
        label: "List a Car",
        route: AppRoute::SellerListCar,
        roles: SELLER,
    },
    MenuItem::Link {
        label: "Rental Availability",
        route: AppRoute::SellerRentalAvailability,
        roles: SELLER,
    },
    MenuItem::Link {
        label: "Dashboard",
        route: AppRoute::Staff,
        roles: STAFF_OR_ADMIN,
    },
    MenuItem::Link {
        label: "Brands",
        route: AppRoute::StaffBrands,
        roles: STAFF_OR_ADMIN,
    },
    MenuItem::Link {
        label: "Staff",
        route: AppRoute::AdminStaff,
        roles: SUPERADMIN,
    },
    MenuItem::Action {
        label: "Log out",
        action: MenuAction::Logout,
        roles: EVERY_ROLE,
    },
];

pub fn visible_items(items: &[MenuItem], selected: Option<Role>) -> Vec<MenuItem> {
    let Some(selected) = selected else {
        return Vec::new();
    };
    items
        .iter()
        .filter(|item| item.roles().contains(&selected))
        .copied()
        .collect()
}
