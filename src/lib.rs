//! Olympic History Dashboard
//!
//! Loads the athlete-events and NOC-region tables, merges and cleans them,
//! and derives the medal views shown by the dashboard window or exported
//! headless.

pub mod charts;
pub mod cli;
pub mod config;
pub mod data;
pub mod gui;
pub mod pipeline;
pub mod report;
pub mod stats;
