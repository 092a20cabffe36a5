pub mod link;
pub mod profile;
pub mod session;
