use crate::{
    router::{
        menu::{visible_items, MenuAction, MenuItem, DEFAULT_MENU},
        paths::AppRoute,
    },
    state::session::{use_logout_action, use_session},
    utils::navigation::use_navigator,
};
use leptos::*;

#[component]
pub fn Header() -> impl IntoView {
    let state = use_session().state;
    let navigator = store_value(use_navigator());
    let go = move |route: AppRoute| navigator.with_value(|navigate| navigate(route));
    let (menu_open, set_menu_open) = create_signal(false);
    let logout_action = use_logout_action();
    let logout_pending = logout_action.pending();
    create_effect(move |_| {
        if logout_action.value().get().is_some() {
            go(AppRoute::Login);
        }
    });

    let display_name = move || {
        state
            .get()
            .user()
            .map(|user| user.display_name())
            .unwrap_or_default()
    };
    let run_action = move |action: MenuAction| {
        set_menu_open.set(false);
        match action {
            MenuAction::SwitchRole => go(AppRoute::SelectRole),
            MenuAction::Logout => {
                if !logout_pending.get_untracked() {
                    logout_action.dispatch(());
                }
            }
        }
    };
    let menu_items = move || {
        visible_items(DEFAULT_MENU, state.get().selected_role)
            .into_iter()
            .map(|item| render_menu_item(item, run_action))
            .collect_view()
    };

    view! {
        <header class="flex w-full items-center justify-between bg-surface-elevated border-b border-border px-8 py-3">
            <a href="/" class="text-xl font-bold text-fg">"CarMarket"</a>
            <Show
                when=move || state.get().is_authenticated()
                fallback=move || {
                    view! {
                        <button
                            class="px-4 py-2 rounded-md text-sm font-medium"
                            on:click=move |_| go(AppRoute::Login)
                        >
                            "Log in"
                        </button>
                    }
                }
            >
                <div class="relative">
                    <button
                        class="flex items-center space-x-2 text-sm text-fg"
                        aria-expanded=move || menu_open.get()
                        on:click=move |_| set_menu_open.update(|open| *open = !*open)
                    >
                        {display_name}
                    </button>
                    <Show when=move || menu_open.get()>
                        <nav class="absolute right-0 z-40 mt-2 w-48 rounded-md bg-surface-elevated shadow-md">
                            {menu_items}
                        </nav>
                    </Show>
                </div>
            </Show>
        </header>
    }
}

fn render_menu_item(item: MenuItem, run_action: impl Fn(MenuAction) + 'static) -> View {
    let label = item.label();
    match item {
        MenuItem::Link { route, .. } => view! {
            <a href=route.path() class="block px-4 py-2 text-sm hover:bg-action-ghost-bg-hover">
                {label}
            </a>
        }
        .into_view(),
        MenuItem::Action { action, .. } => view! {
            <button
                class="block w-full px-4 py-2 text-left text-sm hover:bg-action-ghost-bg-hover"
                on:click=move |_| run_action(action)
            >
                {label}
            </button>
        }
        .into_view(),
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                <ForcedLogoutBanner/>
                {children()}
            </main>
        </div>
    }
}

/// Process-wide notice shown after the server ended the session.
#[component]
pub fn ForcedLogoutBanner() -> impl IntoView {
    let session = use_session();
    let state = session.state;
    let store = session.store;
    let notice = move || state.get().forced_logout_notice;
    view! {
        <Show when=move || notice().is_some()>
            <div class="mb-4 bg-status-warning-bg border border-status-warning-border text-status-warning-text px-4 py-3 rounded">
                <div class="flex items-center justify-between gap-3">
                    <p class="text-sm">{move || notice().unwrap_or_default()}</p>
                    <button
                        class="text-sm font-medium underline"
                        on:click={
                            let store = store.clone();
                            move |_| store.dismiss_notice()
                        }
                    >
                        "Dismiss"
                    </button>
                </div>
            </div>
        </Show>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: MaybeSignal<String>) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{move || message.get()}</p>
        </div>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: MaybeSignal<String>) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{move || message.get()}</p>
        </div>
    }
}
