pub mod config;
pub mod di;
pub mod domain;
pub mod guard;
pub mod handler;
pub mod middleware;
pub mod session;
pub mod state;
pub mod view;
