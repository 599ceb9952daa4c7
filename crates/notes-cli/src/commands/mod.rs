pub mod add;
pub mod clear;
pub mod common;
pub mod completions;
pub mod config;
pub mod delete;
pub mod edit;
pub mod export;
pub mod flags;
pub mod import;
pub mod list;
pub mod search;
pub mod select;
pub mod show;
pub mod stats;
pub mod theme;
pub mod view;
