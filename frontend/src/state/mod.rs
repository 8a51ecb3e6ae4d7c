pub mod role_storage;
pub mod session;
