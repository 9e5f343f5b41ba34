pub mod error;
pub mod event;
pub mod id;
pub mod money;
pub mod notify;
pub mod provider;
