use farmer_portal::models::{
    AllowedRoles, KnownRole, Language, NavigationOutcome, Page, Role, RouteSummary,
};

#[test]
fn test_navigation_outcome_json_shape() {
    // Client routers switch on the "outcome" tag.
    let render = NavigationOutcome::Render {
        page: Page::CommunityForum,
        path: "/community".to_string(),
    };
    let json = serde_json::to_value(&render).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "outcome": "render", "page": "CommunityForum", "path": "/community" })
    );

    let redirect = NavigationOutcome::Redirect {
        to: "/login".to_string(),
        replace: true,
    };
    let json = serde_json::to_value(&redirect).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "outcome": "redirect", "to": "/login", "replace": true })
    );
}

#[test]
fn test_role_serializes_as_plain_string() {
    let role = Role::from(KnownRole::Officer);
    assert_eq!(serde_json::to_string(&role).unwrap(), r#""Officer""#);
}

#[test]
fn test_role_parse_rejects_empty() {
    assert_eq!(Role::parse(""), None);
    assert_eq!(Role::parse("Farmer").map(|r| r.to_string()), Some("Farmer".to_string()));
}

#[test]
fn test_known_role_parsing_is_exact() {
    assert_eq!("Farmer".parse::<KnownRole>(), Ok(KnownRole::Farmer));
    assert_eq!("Officer".parse::<KnownRole>(), Ok(KnownRole::Officer));
    assert!("farmer".parse::<KnownRole>().is_err());
    assert!(" Officer".parse::<KnownRole>().is_err());
}

#[test]
fn test_allowed_roles_membership() {
    let both = AllowedRoles::only([KnownRole::Farmer, KnownRole::Officer]);
    assert!(both.contains(&KnownRole::Farmer.into()));
    assert!(both.contains(&KnownRole::Officer.into()));
    assert!(!both.contains(&Role::parse("Admin").unwrap()));

    let nobody = AllowedRoles::nobody();
    assert!(nobody.is_empty());
    assert!(!nobody.contains(&KnownRole::Farmer.into()));
}

#[test]
fn test_language_round_trips_through_storage_format() {
    for language in [Language::English, Language::Malayalam, Language::Tamil] {
        assert_eq!(language.as_str().parse::<Language>(), Ok(language));
    }
    assert_eq!(Language::default(), Language::English);
}

#[test]
fn test_route_summary_omits_absent_allowed_roles() {
    let summary = RouteSummary {
        path: "/about".to_string(),
        page: Page::ProjectInfo,
        requires_auth: true,
        allowed_roles: None,
    };

    let json_output = serde_json::to_string(&summary).unwrap();
    assert!(!json_output.contains("allowed_roles"));
}
