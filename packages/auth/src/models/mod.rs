//! Data models shared between the provider binding and the UI.

mod user;

pub use user::{
    AuthUser, NewUserRecord, ProfileUpdate, UserInfo, GOOGLE_PROVIDER, PASSWORD_PROVIDER,
};
