//! The eight destinations of the navigated app.
//!
//! Pages are independent leaves: each may assume an authenticated context and
//! may read the session, but never mutate it.

use crate::session::Session;

pub const NAV_SECTION: &str = "Navigation Bar";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    DashboardHome,
    SalesAnalytics,
    TrendsAndAnalysis,
    InventoryOverview,
    Transactions,
    AiInsights,
    Reports,
    AnotherAgent,
}

impl Page {
    /// Navigation order; the first entry is the default page.
    pub const ALL: [Page; 8] = [
        Page::DashboardHome,
        Page::SalesAnalytics,
        Page::TrendsAndAnalysis,
        Page::InventoryOverview,
        Page::Transactions,
        Page::AiInsights,
        Page::Reports,
        Page::AnotherAgent,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::DashboardHome => "Dashboard Home",
            Self::SalesAnalytics => "Sales and Analytics",
            Self::TrendsAndAnalysis => "Trends and Analysis",
            Self::InventoryOverview => "Inventory Overview",
            Self::Transactions => "Transactions and Inventory",
            Self::AiInsights => "AI Insights",
            Self::Reports => "Reports",
            Self::AnotherAgent => "Another Agent",
        }
    }

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::DashboardHome => "dashboard",
            Self::SalesAnalytics => "sales-analytics",
            Self::TrendsAndAnalysis => "trends-and-analysis",
            Self::InventoryOverview => "inventory-overview",
            Self::Transactions => "transactions",
            Self::AiInsights => "ai-insights",
            Self::Reports => "reports",
            Self::AnotherAgent => "another-agent",
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.slug() == slug)
    }

    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::DashboardHome => "/".to_owned(),
            other => format!("/pages/{}", other.slug()),
        }
    }

    /// Greeting line shown under a page heading. Reads the session only.
    #[must_use]
    pub fn subtitle(self, session: &Session) -> String {
        let who = session.email().unwrap_or("there");
        match self {
            Self::DashboardHome => format!("Welcome back, {who}."),
            Self::Reports => "Generate a PDF summary of recent sales performance.".to_owned(),
            _ => "No data source is connected to this view yet.".to_owned(),
        }
    }
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
