#![forbid(unsafe_code)]

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod logging;
pub mod project;
