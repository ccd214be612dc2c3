//! Dashboard module - page routing, KPI cards and the precomputed context

mod context;
pub mod format;
mod page;
mod view;

pub use context::{DashboardContext, SalesTables, TOP_PRODUCTS};
pub use page::{select_page, Page};
pub use view::{insights, KpiCard, PageView, RECOMMENDATIONS};
