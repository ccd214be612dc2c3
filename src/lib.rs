//! Sales Dashboard - CSV sales analysis with a multi-page KPI dashboard.
//!
//! The pipeline runs once: load → normalize → filter/derive → aggregate, producing an
//! immutable [`DashboardContext`](dashboard::DashboardContext) that the window, the JSON
//! summary and the PNG export all read from.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod export;
pub mod gui;
pub mod stats;
