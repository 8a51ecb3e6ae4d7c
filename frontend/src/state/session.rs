use crate::api::{ApiClient, InterceptedResponse, InterceptorId, ResponseInterceptor, Role, User};
use crate::state::role_storage::{default_role_storage, RoleStorage};
use leptos::*;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

pub const DEFAULT_FORCED_LOGOUT_MESSAGE: &str =
    "Your session has ended because your account status changed.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub current_user: Option<User>,
    pub selected_role: Option<Role>,
    pub forced_logout_notice: Option<String>,
    pub loading: bool,
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    fn clear_identity(&mut self) {
        self.current_user = None;
        self.selected_role = None;
        self.loading = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(usize);

type Listener = Rc<dyn Fn(&SessionState)>;

struct SessionCore {
    state: RefCell<SessionState>,
    storage: Rc<dyn RoleStorage>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_listener: Cell<usize>,
}

impl SessionCore {
    fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    fn update(&self, f: impl FnOnce(&mut SessionState)) {
        f(&mut self.state.borrow_mut());
        self.notify();
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    fn force_logout(&self, message: String) {
        self.storage.clear();
        self.update(|state| {
            state.clear_identity();
            state.forced_logout_notice = Some(message);
        });
    }
}

/// Watches every API response for the server's `shouldLogout` marker.
struct ForcedLogoutInterceptor {
    session: Weak<SessionCore>,
}

impl ResponseInterceptor for ForcedLogoutInterceptor {
    fn on_response(&self, response: &InterceptedResponse<'_>) {
        if !response.should_logout() {
            return;
        }
        let Some(core) = self.session.upgrade() else {
            return;
        };
        let message = response
            .message()
            .unwrap_or(DEFAULT_FORCED_LOGOUT_MESSAGE)
            .to_string();
        log::warn!("Server forced logout ({}): {}", response.status, message);
        core.force_logout(message);
    }
}

/// Process-wide session. All mutation goes through these methods; views
/// observe it through [`SessionStore::subscribe`].
#[derive(Clone)]
pub struct SessionStore {
    api: ApiClient,
    core: Rc<SessionCore>,
    interceptor: InterceptorId,
}

impl SessionStore {
    pub fn new(api: ApiClient, storage: Rc<dyn RoleStorage>) -> Self {
        let core = Rc::new(SessionCore {
            state: RefCell::new(SessionState {
                loading: true,
                ..SessionState::default()
            }),
            storage,
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
        });
        let interceptor = api.add_interceptor(Rc::new(ForcedLogoutInterceptor {
            session: Rc::downgrade(&core),
        }));
        Self {
            api,
            core,
            interceptor,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn snapshot(&self) -> SessionState {
        self.core.snapshot()
    }

    pub fn subscribe(&self, listener: impl Fn(&SessionState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.core.next_listener.get());
        self.core.next_listener.set(id.0 + 1);
        self.core
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.core
            .listeners
            .borrow_mut()
            .retain(|(listener_id, _)| *listener_id != id);
    }

    /// Stops watching responses for forced logout. The store keeps working
    /// for explicit calls.
    pub fn detach_interceptor(&self) {
        self.api.remove_interceptor(self.interceptor);
    }

    /// Loads the current identity. Failures resolve to the anonymous state;
    /// nothing is returned as an error.
    pub async fn fetch_identity(&self) -> SessionState {
        match self.api.get_me().await {
            Ok(Some(user)) => {
                let persisted = self.core.storage.load();
                let selected = persisted
                    .as_deref()
                    .and_then(|raw| raw.parse::<Role>().ok())
                    .filter(|role| user.has_role(*role));
                if persisted.is_some() && selected.is_none() {
                    log::debug!("Discarding persisted role {:?} not held by user", persisted);
                }
                log::info!("Session resolved for user {}", user.id);
                self.core.update(|state| {
                    state.current_user = Some(user);
                    state.selected_role = selected;
                    state.forced_logout_notice = None;
                    state.loading = false;
                });
            }
            Ok(None) => {
                log::info!("No active session");
                self.core.update(SessionState::clear_identity);
            }
            Err(err) if err.should_logout() => {
                self.core.force_logout(err.error);
            }
            Err(err) => {
                log::info!("Identity fetch failed, continuing anonymously: {}", err);
                self.core.storage.clear();
                self.core.update(SessionState::clear_identity);
            }
        }
        self.snapshot()
    }

    /// Switches the active role. Roles the user does not hold are ignored.
    pub fn select_role(&self, role: Role) -> bool {
        let held = self
            .core
            .state
            .borrow()
            .current_user
            .as_ref()
            .map(|user| user.has_role(role))
            .unwrap_or(false);
        if !held {
            log::debug!("Ignoring selection of role {} not held by the user", role);
            return false;
        }
        self.core.storage.save(role);
        self.core.update(|state| state.selected_role = Some(role));
        true
    }

    /// Ends the session. The server call is best-effort; local state is
    /// always cleared.
    pub async fn logout(&self) {
        if let Err(err) = self.api.logout().await {
            log::warn!("Logout request failed, clearing local session anyway: {}", err);
        }
        self.core.storage.clear();
        self.core.update(|state| {
            state.clear_identity();
            state.forced_logout_notice = None;
        });
    }

    #[cfg(test)]
    pub(crate) fn replace_state(&self, state: SessionState) {
        self.core.update(|current| *current = state);
    }

    pub fn dismiss_notice(&self) {
        if self.core.state.borrow().forced_logout_notice.is_none() {
            return;
        }
        self.core
            .update(|state| state.forced_logout_notice = None);
    }
}

#[derive(Clone)]
pub struct SessionContext {
    pub store: SessionStore,
    pub state: ReadSignal<SessionState>,
}

/// Mirrors the store into a signal so views re-render on every change.
pub fn create_session_context(api: ApiClient, storage: Rc<dyn RoleStorage>) -> SessionContext {
    let store = SessionStore::new(api, storage);
    let (state, set_state) = create_signal(store.snapshot());
    store.subscribe(move |snapshot| {
        let _ = set_state.try_set(snapshot.clone());
    });
    SessionContext { store, state }
}

#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let ctx = create_session_context(api, default_role_storage());
    let store = ctx.store.clone();
    spawn_local(async move {
        store.fetch_identity().await;
    });
    provide_context(ctx);
    view! { <>{children()}</> }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
        .unwrap_or_else(|| create_session_context(ApiClient::new(), default_role_storage()))
}

pub fn use_logout_action() -> Action<(), ()> {
    let store = use_session().store;
    create_action(move |_: &()| {
        let store = store.clone();
        async move { store.logout().await }
    })
}
