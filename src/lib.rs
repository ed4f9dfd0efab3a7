pub mod agent;
pub mod build_info;
pub mod category;
pub mod commands;
pub mod error;
pub mod manager;
pub mod model;
pub mod output;
pub mod store;
