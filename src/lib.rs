pub mod app;
pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod format;
pub mod models;
pub mod navigation;
pub mod notify;
pub mod services;
pub mod storage;
