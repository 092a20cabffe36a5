pub mod db;
pub mod gateway;
pub mod notifier;
pub mod remote;
pub mod s3;
