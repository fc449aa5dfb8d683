//! Vigia Client Library
//!
//! Core session and authorization layer for the Vigia property management
//! backend: session persistence, role-driven navigation, route guarding, and
//! an HTTP client that authenticates every request from the current session.

pub mod api;
pub mod auth;
pub mod config;
pub mod nav;
pub mod session;
pub mod views;
