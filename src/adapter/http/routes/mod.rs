pub mod health;
pub mod link;
pub mod media;
pub mod profile;
