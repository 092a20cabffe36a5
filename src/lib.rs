pub mod adapter;
pub mod application;
pub mod domain;
pub mod infra;

#[cfg(test)]
mod tests;
