pub mod config;
pub mod models;
pub mod report;
pub mod storage;

pub mod api;
pub mod viewer;
