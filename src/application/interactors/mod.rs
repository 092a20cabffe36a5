pub mod avatar;
pub mod draft_sync;
pub mod link;
pub mod profile;
pub mod session;
