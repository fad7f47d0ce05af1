pub mod api;
pub mod config;
pub mod constants;
pub mod criteria;
pub mod error;
pub mod flow;
pub mod forms;
pub mod import;
pub mod models;
pub mod pagination;
pub mod provider;
pub mod query;
pub mod records;
pub mod stats;
pub mod utils;
pub mod view;
