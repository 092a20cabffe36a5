pub mod avatar;
pub mod link;
pub mod message;
pub mod page;
pub mod profile;
