//! Tattoo Memorials order intake server library.
//!
//! Provides the submission pipeline, attachment manager, database layer,
//! and HTTP API for the order intake and staff administration service.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
