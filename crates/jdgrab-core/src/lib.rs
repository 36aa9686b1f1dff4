pub mod config;
pub mod logging;

pub mod download;
pub mod extract;
pub mod http;
pub mod media;
pub mod naming;
pub mod orchestrator;
pub mod page;
pub mod prefs;
