pub mod id;
pub mod link;
pub mod profile;
pub mod session;
pub mod theme;
