pub mod app;
pub mod config;
pub mod models;
pub mod recommend;
pub mod render;
pub mod tmdb;
