//! HTTP request handlers

pub mod data;
pub mod health;
pub mod metrics;
pub mod simulation;
