//! Store Visit Image Processing Service
//!
//! Accepts batches of store visits, processes each visit's images on a
//! background task per batch, and exposes per-batch status and errors for
//! polling.

pub mod app_state;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
