pub mod avatar;
pub mod dashboard;
pub mod link;
pub mod profile;
pub mod session;
