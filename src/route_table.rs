use crate::{
    gate::{self, GateOutcome, HOME_PATH, LOGIN_PATH, Redirect},
    models::{AllowedRoles, KnownRole, NavigationOutcome, Page, Role, RouteSummary},
};

/// RouteEntry
///
/// Declares the authorization a single path requires. Built only through the
/// constructors below, so a public route can never carry an allowed-role set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub page: Page,
    pub requires_auth: bool,
    /// `None` admits any authenticated role.
    pub allowed_roles: Option<AllowedRoles>,
}

impl RouteEntry {
    /// Reachable without a session.
    pub fn public(path: &'static str, page: Page) -> Self {
        Self {
            path,
            page,
            requires_auth: false,
            allowed_roles: None,
        }
    }

    /// Reachable by any session holding a role.
    pub fn authenticated(path: &'static str, page: Page) -> Self {
        Self {
            path,
            page,
            requires_auth: true,
            allowed_roles: None,
        }
    }

    /// Reachable only by sessions whose role is in `allowed`.
    pub fn restricted(path: &'static str, page: Page, allowed: AllowedRoles) -> Self {
        Self {
            path,
            page,
            requires_auth: true,
            allowed_roles: Some(allowed),
        }
    }

    /// evaluate
    ///
    /// Applies this entry's requirements to a session role. Public entries
    /// render unconditionally; the rest go through the gate.
    pub fn evaluate(&self, role: Option<&Role>) -> GateOutcome<Page> {
        if !self.requires_auth {
            return GateOutcome::Render(self.page);
        }
        gate::guard(role, self.allowed_roles.as_ref(), self.page)
    }

    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            path: self.path.to_string(),
            page: self.page,
            requires_auth: self.requires_auth,
            allowed_roles: self
                .allowed_roles
                .as_ref()
                .map(|allowed| allowed.iter().cloned().collect()),
        }
    }
}

/// Resolution
///
/// Result of matching a path against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Matched(&'a RouteEntry),
    /// No entry matched; the wildcard applies.
    Fallback(Redirect),
}

/// RouteTable
///
/// Ordered route entries plus the wildcard fallback. Constructed once at
/// startup and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    fallback: Redirect,
}

impl RouteTable {
    /// Builds a table whose wildcard redirects home. When two entries share a
    /// path the earlier one wins.
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        Self {
            entries,
            fallback: Redirect::replace(HOME_PATH),
        }
    }

    /// standard
    ///
    /// The farmer portal's route table.
    pub fn standard() -> Self {
        let farmer = || AllowedRoles::only([KnownRole::Farmer]);
        let officer = || AllowedRoles::only([KnownRole::Officer]);

        Self::new(vec![
            // Public
            RouteEntry::public(HOME_PATH, Page::Home),
            RouteEntry::public(LOGIN_PATH, Page::Login),
            // Any signed-in role
            RouteEntry::authenticated("/about", Page::ProjectInfo),
            RouteEntry::authenticated("/technical", Page::TechnicalInfo),
            RouteEntry::authenticated("/contact", Page::Contact),
            RouteEntry::authenticated("/search", Page::Search),
            RouteEntry::authenticated("/weather", Page::Weather),
            // Farmer
            RouteEntry::restricted("/query", Page::Query, farmer()),
            RouteEntry::restricted("/community", Page::CommunityForum, farmer()),
            RouteEntry::restricted("/onboarding", Page::Onboarding, farmer()),
            RouteEntry::restricted("/profile", Page::Profile, farmer()),
            RouteEntry::restricted("/store", Page::Store, farmer()),
            RouteEntry::restricted("/checkout", Page::Checkout, farmer()),
            // Officer
            RouteEntry::restricted("/dashboard", Page::Dashboard, officer()),
        ])
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn fallback(&self) -> Redirect {
        self.fallback
    }

    /// resolve
    ///
    /// Exact, case-sensitive path match. The wildcard is only consulted when
    /// nothing else matches.
    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map(Resolution::Matched)
            .unwrap_or(Resolution::Fallback(self.fallback))
    }

    /// navigate
    ///
    /// Full routing decision for `path`. Unmatched paths redirect home without
    /// looking at the role; matched entries are evaluated against it.
    pub fn navigate(&self, path: &str, role: Option<&Role>) -> NavigationOutcome {
        match self.resolve(path) {
            Resolution::Fallback(redirect) => redirect.into(),
            Resolution::Matched(entry) => match entry.evaluate(role) {
                GateOutcome::Render(page) => NavigationOutcome::Render {
                    page,
                    path: entry.path.to_string(),
                },
                GateOutcome::Redirect(redirect) => redirect.into(),
            },
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}
