//! GUI module - User interface components

mod app;
mod nav_bar;
mod page_viewer;

pub use app::DashboardApp;
pub use nav_bar::{NavAction, NavBar};
pub use page_viewer::PageViewer;
