//! Route guards: pure decisions over the resolved session.
//!
//! Each guard checks, in order: pending forced logout, missing user, account
//! status, then role and selected role. The first failing check picks the
//! redirect target.

use super::paths::AppRoute;
use crate::api::{Role, User};
use crate::state::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Guard {
    /// Login, sign-up and password recovery: only for anonymous visitors.
    AuthOnly,
    Onboarding,
    Client,
    Seller,
    Staff,
    Superadmin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectTo(AppRoute),
}

impl GuardDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

use GuardDecision::{Allow, RedirectTo};

impl Guard {
    pub const ALL: [Guard; 6] = [
        Guard::AuthOnly,
        Guard::Onboarding,
        Guard::Client,
        Guard::Seller,
        Guard::Staff,
        Guard::Superadmin,
    ];

    pub fn evaluate(self, session: &SessionState) -> GuardDecision {
        let forced_out = session.forced_logout_notice.is_some();
        let user = session.current_user.as_ref();
        let selected = session.selected_role;
        match self {
            Guard::AuthOnly => auth_only(user),
            Guard::Onboarding => onboarding(forced_out, user),
            Guard::Client => client(forced_out, user, selected),
            Guard::Seller => seller(forced_out, user, selected),
            Guard::Staff => staff(forced_out, user, selected),
            Guard::Superadmin => superadmin(forced_out, user, selected),
        }
    }

    /// Every redirect target this guard can produce.
    pub fn redirect_targets(self) -> &'static [AppRoute] {
        match self {
            Guard::AuthOnly => &[AppRoute::Onboarding, AppRoute::SelectRole],
            Guard::Onboarding => &[AppRoute::Login, AppRoute::SelectRole],
            Guard::Client | Guard::Seller | Guard::Staff | Guard::Superadmin => {
                &[AppRoute::Login, AppRoute::Onboarding, AppRoute::SelectRole]
            }
        }
    }
}

pub fn needs_onboarding(user: &User) -> bool {
    user.status == crate::api::UserStatus::Inactive
        || (user.has_role(Role::Seller) && user.seller_profile.is_none())
}

fn holds_selected(user: &User, selected: Option<Role>, role: Role) -> bool {
    user.has_role(role) && selected == Some(role)
}

// A pending notice means the session was just reset, and the login page is
// where it sends the user, so it stays reachable.
fn auth_only(user: Option<&User>) -> GuardDecision {
    match user {
        None => Allow,
        Some(user) if needs_onboarding(user) => RedirectTo(AppRoute::Onboarding),
        Some(_) => RedirectTo(AppRoute::SelectRole),
    }
}

fn onboarding(forced_out: bool, user: Option<&User>) -> GuardDecision {
    if forced_out {
        return RedirectTo(AppRoute::Login);
    }
    match user {
        None => RedirectTo(AppRoute::Login),
        Some(user) if needs_onboarding(user) => Allow,
        Some(_) => RedirectTo(AppRoute::SelectRole),
    }
}

fn client(forced_out: bool, user: Option<&User>, selected: Option<Role>) -> GuardDecision {
    if forced_out {
        return RedirectTo(AppRoute::Login);
    }
    let Some(user) = user else {
        return RedirectTo(AppRoute::Login);
    };
    if !user.is_active() {
        return RedirectTo(AppRoute::Onboarding);
    }
    if !holds_selected(user, selected, Role::Client) {
        return RedirectTo(AppRoute::SelectRole);
    }
    Allow
}

fn seller(forced_out: bool, user: Option<&User>, selected: Option<Role>) -> GuardDecision {
    if forced_out {
        return RedirectTo(AppRoute::Login);
    }
    let Some(user) = user else {
        return RedirectTo(AppRoute::SelectRole);
    };
    if !user.is_active() {
        return RedirectTo(AppRoute::Onboarding);
    }
    // A seller without a profile finishes onboarding before picking a role.
    if user.has_role(Role::Seller) && user.seller_profile.is_none() {
        return RedirectTo(AppRoute::Onboarding);
    }
    if !holds_selected(user, selected, Role::Seller) {
        return RedirectTo(AppRoute::SelectRole);
    }
    Allow
}

fn staff(forced_out: bool, user: Option<&User>, selected: Option<Role>) -> GuardDecision {
    if forced_out {
        return RedirectTo(AppRoute::Login);
    }
    let Some(user) = user else {
        return RedirectTo(AppRoute::Login);
    };
    if !user.is_active() {
        return RedirectTo(AppRoute::Onboarding);
    }
    if holds_selected(user, selected, Role::Staff) || holds_selected(user, selected, Role::Superadmin)
    {
        return Allow;
    }
    RedirectTo(AppRoute::SelectRole)
}

fn superadmin(forced_out: bool, user: Option<&User>, selected: Option<Role>) -> GuardDecision {
    if forced_out {
        return RedirectTo(AppRoute::Login);
    }
    let Some(user) = user else {
        return RedirectTo(AppRoute::Login);
    };
    if !user.is_active() {
        return RedirectTo(AppRoute::Onboarding);
    }
    if holds_selected(user, selected, Role::Superadmin) {
        return Allow;
    }
    RedirectTo(AppRoute::SelectRole)
}
