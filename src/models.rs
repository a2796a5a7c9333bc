use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt, str::FromStr};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Roles ---

/// Role
///
/// The permission class attached to a browser profile's session. Roles are an
/// open set of strings: any non-empty value is structurally valid, and only
/// specific values are meaningful to specific routes.
///
/// Equality is exact string equality. There is no case folding and no
/// implication between roles ("Officer" never satisfies a "Farmer" route).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Role(String);

impl Role {
    /// parse
    ///
    /// Interprets a raw persisted value. An empty string carries no role.
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() { None } else { Some(Self(raw)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// KnownRole
///
/// The closed set of roles this platform issues. Login validates against this
/// type once, so every role written to a session is one the route table knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub enum KnownRole {
    Farmer,
    Officer,
}

impl KnownRole {
    pub fn as_str(self) -> &'static str {
        match self {
            KnownRole::Farmer => "Farmer",
            KnownRole::Officer => "Officer",
        }
    }
}

impl From<KnownRole> for Role {
    fn from(role: KnownRole) -> Self {
        Role(role.as_str().to_string())
    }
}

impl FromStr for KnownRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Farmer" => Ok(KnownRole::Farmer),
            "Officer" => Ok(KnownRole::Officer),
            _ => Err(()),
        }
    }
}

/// AllowedRoles
///
/// The set of roles a route admits. A present-but-empty set admits nobody,
/// which is different from a route carrying no set at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedRoles(BTreeSet<Role>);

impl AllowedRoles {
    pub fn only<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        Self(roles.into_iter().map(Into::into).collect())
    }

    /// An allowed set with no members. Denies every role.
    pub fn nobody() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, role: &Role) -> bool {
        self.0.contains(role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.0.iter()
    }
}

// --- Pages & Preferences ---

/// Page
///
/// Identifies the content a route renders. Rendering itself belongs to the web
/// client; the server only decides which page (if any) the caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub enum Page {
    Home,
    Login,
    ProjectInfo,
    TechnicalInfo,
    Contact,
    Search,
    Weather,
    Query,
    CommunityForum,
    Onboarding,
    Profile,
    Store,
    Checkout,
    Dashboard,
}

/// Language
///
/// UI language preference persisted alongside the role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub enum Language {
    #[default]
    English,
    Malayalam,
    Tamil,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Malayalam => "Malayalam",
            Language::Tamil => "Tamil",
        }
    }
}

impl FromStr for Language {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "English" => Ok(Language::English),
            "Malayalam" => Ok(Language::Malayalam),
            "Tamil" => Ok(Language::Tamil),
            _ => Err(()),
        }
    }
}

// --- Navigation Schemas (Output) ---

/// NavigationOutcome
///
/// The routing decision for one navigation. Client-side routers apply it
/// themselves; `replace` asks them to overwrite the current history entry
/// instead of pushing a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
#[ts(export)]
pub enum NavigationOutcome {
    Render { page: Page, path: String },
    Redirect { to: String, replace: bool },
}

/// PageView
///
/// Body returned by a page route once the gate lets the request through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct PageView {
    pub page: Page,
    pub path: String,
}

/// RouteSummary
///
/// Public listing of one route table entry (GET /api/routes).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RouteSummary {
    pub path: String,
    pub page: Page,
    pub requires_auth: bool,
    /// Absent when any authenticated role is enough.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_roles: Option<Vec<Role>>,
}

// --- Session Payloads ---

/// LoginRequest
///
/// Input payload for POST /api/login. The role arrives as a raw string and is
/// validated against `KnownRole` by the handler.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginRequest {
    #[schema(example = "Farmer")]
    pub role: String,
}

/// LoginResponse
///
/// The profile id must be sent back as `x-profile-id` on later requests.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginResponse {
    pub profile_id: Uuid,
    pub role: Role,
    #[ts(type = "string")]
    pub logged_in_at: DateTime<Utc>,
}

/// SessionView
///
/// Current session state for the calling profile (GET /api/session).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SessionView {
    pub profile_id: Option<Uuid>,
    pub role: Option<Role>,
    pub language: Language,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LanguageRequest {
    pub language: Language,
}
