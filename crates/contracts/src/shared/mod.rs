pub mod config;
pub mod tabs;
