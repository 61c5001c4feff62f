//! Attendance and leave engine for an employee attendance portal.
//!
//! This crate records daily clock-ins and clock-outs behind a face
//! verification gate, classifies lateness, computes worked time, and manages
//! leave requests, all persisted in a local key-value record store.

#![warn(missing_docs)]

pub mod api;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod identity;
pub mod models;
pub mod store;
