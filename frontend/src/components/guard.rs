use crate::{
    components::layout::LoadingSpinner,
    router::guards::{Guard, GuardDecision},
    state::session::{use_session, SessionState},
    utils::navigation::use_navigator,
};
use leptos::*;

/// Renders `children` only while `guard` allows the current session, and
/// redirects otherwise. Shows a spinner until the session has loaded.
#[component]
pub fn RequireArea(guard: Guard, children: ChildrenFn) -> impl IntoView {
    let session = use_session().state;
    let navigate = use_navigator();
    let decision = create_memo(move |_| decide(guard, &session.get()));
    create_effect(move |_| {
        if let Some(GuardDecision::RedirectTo(route)) = decision.get() {
            log::debug!("{:?} guard redirecting to {}", guard, route.path());
            navigate(route);
        }
    });
    view! {
        <Show
            when=move || should_render_children(decision.get())
            fallback=move || {
                if decision.get().is_none() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

/// `None` while the identity fetch is still in flight.
fn decide(guard: Guard, session: &SessionState) -> Option<GuardDecision> {
    if session.loading {
        None
    } else {
        Some(guard.evaluate(session))
    }
}

fn should_render_children(decision: Option<GuardDecision>) -> bool {
    decision.map(GuardDecision::is_allowed).unwrap_or(false)
}
