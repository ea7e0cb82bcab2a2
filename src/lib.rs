pub mod api;
pub mod calendar;
pub mod catalog;
pub mod config;
pub mod db;
pub mod enrollment;
pub mod error;
pub mod gemini;
pub mod models;
pub mod services;
pub mod state;
