pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod picker;
pub mod review;
pub mod service;
