use crate::api::Role;
use crate::components::layout::{Layout, LoadingSpinner};
use crate::router::paths::AppRoute;
use crate::state::session::{use_session, SessionState};
use crate::utils::navigation::use_navigator;
use leptos::*;

#[component]
pub fn SelectRolePage() -> impl IntoView {
    view! {
        <Layout>
            <SelectRolePanel />
        </Layout>
    }
}

#[component]
fn SelectRolePanel() -> impl IntoView {
    let session = use_session();
    let state = session.state;
    let store = store_value(session.store);
    let navigator = store_value(use_navigator());

    create_effect(move |_| {
        if needs_login(&state.get()) {
            navigator.with_value(|navigate| navigate(AppRoute::Login));
        }
    });

    let choose = Callback::new(move |role: Role| {
        if store.with_value(|store| store.select_role(role)) {
            navigator.with_value(|navigate| navigate(AppRoute::landing_for(role)));
        }
    });

    view! {
        <div class="max-w-2xl mx-auto space-y-6">
            <div class="text-center">
                <h1 class="text-2xl font-bold text-fg">"Select your role"</h1>
                <p class="mt-2 text-fg-muted">"Please select the role that best describes you"</p>
            </div>
            {move || {
                let current = state.get();
                if current.loading {
                    return view! { <LoadingSpinner /> }.into_view();
                }
                let selected = current.selected_role;
                held_roles(&current)
                    .into_iter()
                    .map(|role| view! { <RoleCard role=role selected=selected == Some(role) on_pick=choose /> })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn RoleCard(role: Role, selected: bool, on_pick: Callback<Role>) -> impl IntoView {
    let class = if selected {
        "w-full rounded-lg border-2 p-4 text-left border-action-primary-bg"
    } else {
        "w-full rounded-lg border-2 p-4 text-left border-border"
    };
    view! {
        <button class=class data-role=role.as_str() on:click=move |_| on_pick.call(role)>
            <span class="font-semibold">{role.label()}</span>
        </button>
    }
}

fn needs_login(state: &SessionState) -> bool {
    !state.loading && state.current_user.is_none()
}

/// Roles offered as cards, in the canonical role order.
fn held_roles(state: &SessionState) -> Vec<Role> {
    match state.user() {
        Some(user) => Role::ALL
            .into_iter()
            .filter(|role| user.has_role(*role))
            .collect(),
        None => Vec::new(),
    }
}
