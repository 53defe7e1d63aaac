pub mod api;
pub mod config;
pub mod db;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod pagination;
pub mod response;
pub mod services;
pub mod state;
