//! # Controllers Module
//!
//! Event loop connecting input, session and rendering.

pub mod app_controller;

pub use app_controller::AppController;
