//! Page routing.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Overview,
    Details,
    Advanced,
    Insights,
}

impl Page {
    /// Navigation order.
    pub const ALL: [Page; 4] = [Page::Overview, Page::Details, Page::Advanced, Page::Insights];

    pub fn path(self) -> &'static str {
        match self {
            Page::Overview => "/",
            Page::Details => "/details",
            Page::Advanced => "/advanced",
            Page::Insights => "/insights",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Details => "Details",
            Page::Advanced => "Advanced",
            Page::Insights => "Insights",
        }
    }
}

/// Map a navigation path to its page. Anything unrecognised, `/` included, is the overview.
pub fn select_page(path: &str) -> Page {
    match path {
        "/details" => Page::Details,
        "/advanced" => Page::Advanced,
        "/insights" => Page::Insights,
        _ => Page::Overview,
    }
}
