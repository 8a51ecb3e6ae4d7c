//! Landing pages for areas whose screens live outside this crate. Each one
//! still sits behind its guard, so reaching it proves the session allows it.

use crate::components::layout::Layout;
use leptos::*;

#[component]
pub fn AreaPage(title: &'static str, #[prop(optional)] summary: &'static str) -> impl IntoView {
    view! {
        <Layout>
            <div class="space-y-2">
                <h1 class="text-2xl font-bold text-fg">{title}</h1>
                <Show when=move || !summary.is_empty()>
                    <p class="text-fg-muted">{summary}</p>
                </Show>
            </div>
        </Layout>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <AreaPage title="CarMarket" summary="Buy, sell and rent cars from trusted sellers" />
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::Role;
    use crate::test_support::helpers::{active_user, anonymous, provide_session, signed_in};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn area_page_renders_title_inside_layout() {
        let html = render_to_string(move || {
            provide_session(signed_in(active_user(&[Role::Staff]), Some(Role::Staff)));
            view! { <AreaPage title="Staff Dashboard" /> }
        });
        assert!(html.contains("Staff Dashboard"));
        assert!(html.contains("Mia Member"));
    }

    #[test]
    fn home_page_is_reachable_anonymously() {
        let html = render_to_string(move || {
            provide_session(anonymous());
            view! { <HomePage /> }
        });
        assert!(html.contains("CarMarket"));
        assert!(html.contains("Log in"));
    }
}
