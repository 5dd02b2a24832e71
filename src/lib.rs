pub mod actions;
pub mod branches;
pub mod cli;
pub mod clock;
pub mod controller;
pub mod error;
pub mod event;
pub mod fixtures;
pub mod http_backend;
pub mod poller;
pub mod provider;
pub mod request;
pub mod submission;
