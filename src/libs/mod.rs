pub mod app;
pub mod config;
pub mod data_storage;
pub mod export;
pub mod form;
pub mod formatter;
pub mod geolocation;
pub mod map;
pub mod messages;
pub mod session;
pub mod store;
pub mod view;
pub mod workout;
