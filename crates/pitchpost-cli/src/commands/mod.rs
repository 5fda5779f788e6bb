pub mod board;
pub mod common;
pub mod config;
pub mod event;
pub mod interest;
pub mod map;
pub mod nearby;
