//! Route authorization gate.
//!
//! Decides, for one navigation, whether the wrapped page renders or the
//! caller is sent elsewhere. The decision is a pure function of the session
//! role and the route's allowed set; performing the redirect is left to the
//! routing layer.

use crate::models::{AllowedRoles, NavigationOutcome, Role};

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

/// Redirect
///
/// A navigation instruction. `replace` means the target overwrites the
/// current history entry, so "back" never lands on a gated page again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub to: &'static str,
    pub replace: bool,
}

impl Redirect {
    pub const fn replace(to: &'static str) -> Self {
        Self { to, replace: true }
    }
}

impl From<Redirect> for NavigationOutcome {
    fn from(redirect: Redirect) -> Self {
        NavigationOutcome::Redirect {
            to: redirect.to.to_string(),
            replace: redirect.replace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome<T> {
    Render(T),
    Redirect(Redirect),
}

impl<T> GateOutcome<T> {
    pub fn is_render(&self) -> bool {
        matches!(self, GateOutcome::Render(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> GateOutcome<U> {
        match self {
            GateOutcome::Render(content) => GateOutcome::Render(f(content)),
            GateOutcome::Redirect(redirect) => GateOutcome::Redirect(redirect),
        }
    }
}

/// authorize
///
/// Evaluated in order:
/// 1. no role: redirect to the login page;
/// 2. an allowed set that does not contain the role: redirect home;
/// 3. otherwise render.
///
/// `allowed = None` admits any role. `Some` of an empty set admits none.
pub fn authorize(role: Option<&Role>, allowed: Option<&AllowedRoles>) -> GateOutcome<()> {
    let Some(role) = role else {
        return GateOutcome::Redirect(Redirect::replace(LOGIN_PATH));
    };

    match allowed {
        Some(allowed) if !allowed.contains(role) => {
            GateOutcome::Redirect(Redirect::replace(HOME_PATH))
        }
        _ => GateOutcome::Render(()),
    }
}

/// guard
///
/// Wraps `content` with the `authorize` decision, handing it back untouched
/// when the caller may see it.
pub fn guard<T>(role: Option<&Role>, allowed: Option<&AllowedRoles>, content: T) -> GateOutcome<T> {
    authorize(role, allowed).map(|()| content)
}
