//! Route table for every view boundary in the app.
//!
//! DESIGN
//! ======
//! The router, the navigation bar and the Session Gate all read from this
//! one table, so a link can never point at a path the router does not serve.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

/// A client-side route. Unknown paths fall through to the not-found view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Home,
    Auth,
    Profile,
    Detection,
    About,
    Assistant,
    CropRecommend,
    Fertilizer,
}

impl AppRoute {
    pub const ALL: [Self; 8] = [
        Self::Home,
        Self::Auth,
        Self::Profile,
        Self::Detection,
        Self::About,
        Self::Assistant,
        Self::CropRecommend,
        Self::Fertilizer,
    ];

    /// Routes listed in the navigation bar, in display order.
    pub const NAV: [Self; 6] =
        [Self::Home, Self::Detection, Self::Assistant, Self::CropRecommend, Self::Fertilizer, Self::About];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Auth => "/auth",
            Self::Profile => "/profile",
            Self::Detection => "/detection",
            Self::About => "/about",
            Self::Assistant => "/ai-assistant",
            Self::CropRecommend => "/crop-recommend",
            Self::Fertilizer => "/fertilizer",
        }
    }

    /// Path without the leading slash, as the router's static segment.
    #[must_use]
    pub fn segment(self) -> &'static str {
        self.path().trim_start_matches('/')
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Auth => "Login",
            Self::Profile => "Profile",
            Self::Detection => "Detect Disease",
            Self::About => "About",
            Self::Assistant => "AI Assistant",
            Self::CropRecommend => "Crop Recommender",
            Self::Fertilizer => "Fertilizer Recommender",
        }
    }

    /// Gated views never render their body without a session.
    #[must_use]
    pub fn is_gated(self) -> bool {
        matches!(self, Self::Detection | Self::Assistant | Self::Profile)
    }

    /// Notification shown when a visitor without a session lands on a gated view.
    #[must_use]
    pub fn denied_notice(self) -> Option<&'static str> {
        match self {
            Self::Detection => Some("Please login to use disease detection"),
            Self::Assistant => Some("Please login to use the AI Assistant"),
            Self::Profile => Some("Please login to view your profile"),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }
}
