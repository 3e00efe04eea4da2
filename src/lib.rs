pub mod api;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod notifier;
pub mod poller;
pub mod response;
pub mod status;
