//! Shared WorkPay types (routes, role choices, navigation seam).

use serde::{Deserialize, Serialize};

/// A navigation directive: which screen to transition to, with typed params.
///
/// The route table is trimmed to the routes the session bootstrap and the
/// shell can actually reach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    /// Entry screen; initial route when no session is persisted.
    Login,
    /// Informational post-login screen (shows the reference id).
    LoginSuccess,
    /// Role selection, carrying the freshly established session.
    RoleSelection {
        token: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<String>,
    },
    /// Client (hire-side) profile completion.
    ClientProfile {
        token: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<String>,
    },
    /// Freelancer (work-side) onboarding.
    FreelancerOnboarding {
        token: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<String>,
    },
    /// Main screen; initial route when a session is persisted.
    Home,
}

impl Route {
    /// Returns the stable route name, matching the serialized tag.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Login => "login",
            Route::LoginSuccess => "login_success",
            Route::RoleSelection { .. } => "role_selection",
            Route::ClientProfile { .. } => "client_profile",
            Route::FreelancerOnboarding { .. } => "freelancer_onboarding",
            Route::Home => "home",
        }
    }
}

/// How the user wants to use WorkPay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleChoice {
    /// Hire freelancers for projects.
    Hire,
    /// Get hired for projects.
    Work,
    /// Both hire and work.
    Both,
}

impl RoleChoice {
    /// Parses a user-supplied choice string.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hire" => Some(RoleChoice::Hire),
            "work" => Some(RoleChoice::Work),
            "both" => Some(RoleChoice::Both),
            _ => None,
        }
    }

    /// Maps a role choice to its destination route.
    ///
    /// Hire and work carry the session params through; "both" goes straight
    /// to the main screen.
    pub fn destination(self, token: String, email: Option<String>) -> Route {
        match self {
            RoleChoice::Hire => Route::ClientProfile { token, email },
            RoleChoice::Work => Route::FreelancerOnboarding { token, email },
            RoleChoice::Both => Route::Home,
        }
    }

    /// Returns all choices for display.
    pub fn all() -> &'static [RoleChoice] {
        &[RoleChoice::Hire, RoleChoice::Work, RoleChoice::Both]
    }

    /// Returns the short display name for this choice.
    pub fn display_name(self) -> &'static str {
        match self {
            RoleChoice::Hire => "hire",
            RoleChoice::Work => "work",
            RoleChoice::Both => "both",
        }
    }
}

/// Performs route transitions on behalf of the core.
///
/// The bootstrap only *yields* a [`Route`]; the shell owns the transition.
/// Tests substitute a recording implementation.
pub trait Navigator {
    fn navigate(&mut self, route: &Route);
}
