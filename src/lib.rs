//! inkpress - A small JSON backend for users, articles and tags
//!
//! This library provides the storage, service and HTTP layers used by the
//! `inkpress` server binary.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
