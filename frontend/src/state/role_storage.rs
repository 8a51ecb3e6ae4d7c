use std::cell::RefCell;
use std::rc::Rc;

use crate::api::Role;

pub const SELECTED_ROLE_KEY: &str = "selectedRole";

/// Persistence for the selected role across reloads. Values are raw strings;
/// the session resolver validates them against the user's roles.
pub trait RoleStorage {
    fn load(&self) -> Option<String>;
    fn save(&self, role: Role);
    fn clear(&self);
}

#[derive(Debug, Default)]
pub struct MemoryRoleStorage {
    value: RefCell<Option<String>>,
}

impl MemoryRoleStorage {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(Some(value.into())),
        }
    }
}

impl RoleStorage for MemoryRoleStorage {
    fn load(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    fn save(&self, role: Role) {
        *self.value.borrow_mut() = Some(role.as_str().to_string());
    }

    fn clear(&self) {
        *self.value.borrow_mut() = None;
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalRoleStorage;

#[cfg(target_arch = "wasm32")]
impl RoleStorage for LocalRoleStorage {
    fn load(&self) -> Option<String> {
        crate::utils::storage::local_storage()
            .ok()
            .and_then(|s| s.get_item(SELECTED_ROLE_KEY).ok().flatten())
    }

    fn save(&self, role: Role) {
        let result = crate::utils::storage::local_storage().and_then(|s| {
            s.set_item(SELECTED_ROLE_KEY, role.as_str())
                .map_err(|_| "Failed to persist selected role".to_string())
        });
        if let Err(err) = result {
            log::warn!("{}", err);
        }
    }

    fn clear(&self) {
        if let Ok(storage) = crate::utils::storage::local_storage() {
            let _ = storage.remove_item(SELECTED_ROLE_KEY);
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn default_role_storage() -> Rc<dyn RoleStorage> {
    Rc::new(LocalRoleStorage)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn default_role_storage() -> Rc<dyn RoleStorage> {
    Rc::new(MemoryRoleStorage::default())
}
