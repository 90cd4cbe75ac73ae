pub mod algs;
pub mod api;
pub mod article_store;
pub mod common;
pub mod config;
pub mod database;
pub mod http_server;
pub mod scheduler;
