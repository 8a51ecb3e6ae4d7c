#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{ApiClient, Role, SellerProfile, User, UserStatus};
    use crate::state::role_storage::MemoryRoleStorage;
    use crate::state::session::{create_session_context, SessionContext, SessionState};
    use leptos::*;
    use std::rc::Rc;

    pub fn seller_profile() -> SellerProfile {
        SellerProfile {
            id: 5,
            country: Some("Spain".into()),
            city: Some("Madrid".into()),
            contact_phone: None,
            contact_email: None,
            is_business: false,
            business_name: None,
            business_address: None,
            description: None,
        }
    }

    pub fn user_with(roles: &[Role], status: UserStatus, profile: bool) -> User {
        User {
            id: 1,
            email: "member@example.com".into(),
            name: "Mia".into(),
            surname: "Member".into(),
            roles: roles.to_vec(),
            status,
            seller_profile: profile.then(seller_profile),
        }
    }

    pub fn active_user(roles: &[Role]) -> User {
        user_with(roles, UserStatus::Active, roles.contains(&Role::Seller))
    }

    pub fn signed_in(user: User, selected: Option<Role>) -> SessionState {
        SessionState {
            current_user: Some(user),
            selected_role: selected,
            forced_logout_notice: None,
            loading: false,
        }
    }

    pub fn anonymous() -> SessionState {
        SessionState::default()
    }

    /// Provides a session context seeded with `state`. Requests made through
    /// it go to an unroutable address.
    pub fn provide_session(state: SessionState) -> SessionContext {
        let api = use_context::<ApiClient>()
            .unwrap_or_else(|| ApiClient::new_with_base_url("http://127.0.0.1:9/api"));
        let ctx = create_session_context(api, Rc::new(MemoryRoleStorage::default()));
        ctx.store.replace_state(state);
        provide_context(ctx.clone());
        ctx
    }
}
