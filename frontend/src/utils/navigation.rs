use crate::router::paths::AppRoute;
use leptos_router::{use_navigate, NavigateOptions, RouterContext};
use std::rc::Rc;

pub type Navigator = Rc<dyn Fn(AppRoute)>;
pub type PathNavigator = Rc<dyn Fn(&str)>;

/// Full navigation; the app boots again and the guards re-evaluate against
/// the freshly fetched session.
#[cfg(target_arch = "wasm32")]
pub fn navigate_to_path(path: &str) {
    if let Some(win) = web_sys::window() {
        let location = win.location();
        if location.pathname().map(|p| p == path).unwrap_or(false) {
            return;
        }
        if let Err(err) = location.set_href(path) {
            log::warn!("Navigation to {} failed: {:?}", path, err);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn navigate_to_path(path: &str) {
    log::debug!("Navigation to {} ignored outside the browser", path);
}

/// In-app navigation when rendered under a `<Router/>`, so the session
/// (and any pending forced-logout notice) survives the move. Falls back to
/// [`navigate_to_path`] otherwise. Call during component setup.
pub fn use_navigator() -> Navigator {
    let go = use_path_navigator(true);
    Rc::new(move |route: AppRoute| go(route.path()))
}

/// Like [`use_navigator`] for concrete paths such as `/seller/rental-availability/4`.
/// `replace` decides whether the move adds a history entry.
pub fn use_path_navigator(replace: bool) -> PathNavigator {
    if use_context_router().is_none() {
        return Rc::new(navigate_to_path);
    }
    let navigate = use_navigate();
    Rc::new(move |path: &str| {
        navigate(
            path,
            NavigateOptions {
                replace,
                ..NavigateOptions::default()
            },
        )
    })
}

fn use_context_router() -> Option<RouterContext> {
    leptos::use_context::<RouterContext>()
}
