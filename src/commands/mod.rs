pub mod backups;
pub mod config;
pub mod export;
pub mod helpers;
pub mod import;
pub mod install;
pub mod list;
pub mod search;
pub mod status;
pub mod uninstall;
pub mod update;
