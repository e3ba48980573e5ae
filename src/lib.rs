pub mod config;
pub mod error;
pub mod fetcher;
pub mod messages;
pub mod models;
pub mod notify;
pub mod reconciler;
pub mod render;
pub mod service;
pub mod session;
pub mod store;
pub mod view;

#[cfg(test)]
mod testing;
