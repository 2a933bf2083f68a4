pub mod logging;

pub mod commit;
pub mod config;
pub mod connections;
pub mod fixtures;
pub mod merge;
pub mod model;
pub mod screens;
pub mod session;
pub mod storage;
pub mod web_client;
