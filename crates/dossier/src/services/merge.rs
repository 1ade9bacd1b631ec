//! Merge Pipeline
//!
//! Left-joins permission grants onto persona fields by handle, fills
//! missing matches with empty strings, explodes comma-separated permission
//! lists into one row per name, and applies the optional permission
//! filter. Pure function over in-memory tables; nothing survives the call.

use std::collections::HashMap;

use crate::domain::{Credential, MatchOptions, Persona, PermissionGrant, Roster, RosterRow};

/// Build the expanded roster for one upload cycle.
///
/// Every grant row appears in the output (left join); a grant whose handle
/// has no persona match carries empty persona fields. A grant listing k
/// comma-separated permissions yields exactly k rows, duplicates included.
pub fn build_roster(
    personas: &[Persona],
    grants: &[PermissionGrant],
    credentials: Option<&[Credential]>,
    options: &MatchOptions,
) -> Roster {
    let by_handle: HashMap<&str, &Persona> = personas
        .iter()
        .map(|p| (p.handle.as_str(), p))
        .collect();

    let creds_by_handle: HashMap<&str, &Credential> = credentials
        .unwrap_or_default()
        .iter()
        .map(|c| (c.handle.as_str(), c))
        .collect();

    let filter = parse_filter(options.permission_filter.as_deref());

    let mut rows = Vec::new();
    for grant in grants {
        let persona = by_handle.get(grant.handle.as_str());
        let credential = creds_by_handle.get(grant.handle.as_str());

        for permission in grant.split_permissions() {
            if let Some(allowed) = &filter {
                if !allowed.contains(&permission.to_lowercase()) {
                    continue;
                }
            }

            rows.push(RosterRow {
                handle: grant.handle.clone(),
                permission,
                name: persona.map(|p| p.name.clone()).unwrap_or_default(),
                faction: persona.map(|p| p.faction.clone()).unwrap_or_default(),
                beliefs: persona.map(|p| p.beliefs.clone()).unwrap_or_default(),
                tags: persona.map(|p| p.tags.clone()).unwrap_or_default(),
                bio: persona.map(|p| p.bio.clone()).unwrap_or_default(),
                image: persona.map(|p| p.image.clone()).unwrap_or_default(),
                email: credential.map(|c| c.email.clone()).unwrap_or_default(),
                password: credential.map(|c| c.password.clone()).unwrap_or_default(),
            });
        }
    }

    tracing::debug!(
        rows = rows.len(),
        grants = grants.len(),
        tear_sheet = options.tear_sheet,
        "Built roster"
    );

    Roster {
        rows,
        tear_sheet: options.tear_sheet,
    }
}

/// Parse the comma-separated allow-list into lowercase names. An empty or
/// whitespace-only filter means "keep everything".
fn parse_filter(raw: Option<&str>) -> Option<Vec<String>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    Some(
        raw.split(',')
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona(handle: &str, bio: &str) -> Persona {
        Persona {
            handle: handle.into(),
            name: String::new(),
            faction: String::new(),
            beliefs: String::new(),
            tags: String::new(),
            bio: bio.into(),
            image: String::new(),
        }
    }

    fn grant(handle: &str, permissions: &str) -> PermissionGrant {
        PermissionGrant {
            handle: handle.into(),
            permissions: permissions.into(),
        }
    }

    #[test]
    fn test_worked_example_alice_read_write() {
        let personas = vec![persona("alice", "hi")];
        let grants = vec![grant("alice", "read,write")];

        let roster = build_roster(&personas, &grants, None, &MatchOptions::default());

        assert_eq!(roster.rows.len(), 2);
        assert_eq!(roster.rows[0].permission, "read");
        assert_eq!(roster.rows[1].permission, "write");
        assert!(roster.rows.iter().all(|r| r.bio == "hi"));
    }

    #[test]
    fn test_join_fields_match_persona_or_are_empty() {
        let personas = vec![persona("alice", "hi")];
        let grants = vec![grant("alice", "read"), grant("ghost", "write")];

        let roster = build_roster(&personas, &grants, None, &MatchOptions::default());

        assert_eq!(roster.rows[0].bio, "hi");
        // unmatched handle keeps its row but with empty persona fields
        assert_eq!(roster.rows[1].handle, "ghost");
        assert_eq!(roster.rows[1].bio, "");
        assert_eq!(roster.rows[1].image, "");
    }

    #[test]
    fn test_explode_count_matches_list_length() {
        let grants = vec![grant("alice", "a, b ,c,d")];
        let roster = build_roster(&[], &grants, None, &MatchOptions::default());
        assert_eq!(roster.rows.len(), 4);
        assert_eq!(roster.rows[1].permission, "b");
    }

    #[test]
    fn test_explode_preserves_duplicates() {
        let grants = vec![grant("alice", "read,read")];
        let roster = build_roster(&[], &grants, None, &MatchOptions::default());
        let perms: Vec<&str> = roster.rows.iter().map(|r| r.permission.as_str()).collect();
        assert_eq!(perms, vec!["read", "read"]);
    }

    #[test]
    fn test_filter_keeps_only_listed_permissions() {
        let grants = vec![grant("alice", "read,write"), grant("bob", "admin")];
        let options = MatchOptions {
            permission_filter: Some("Read, admin".into()),
            tear_sheet: false,
        };

        let roster = build_roster(&[], &grants, None, &options);

        let perms: Vec<&str> = roster.rows.iter().map(|r| r.permission.as_str()).collect();
        assert_eq!(perms, vec!["read", "admin"]);
    }

    #[test]
    fn test_blank_filter_keeps_everything() {
        let grants = vec![grant("alice", "read")];
        let options = MatchOptions {
            permission_filter: Some("   ".into()),
            tear_sheet: false,
        };
        let roster = build_roster(&[], &grants, None, &options);
        assert_eq!(roster.rows.len(), 1);
    }

    #[test]
    fn test_tear_sheet_joins_credentials() {
        let personas = vec![persona("alice", "hi")];
        let grants = vec![grant("alice", "read"), grant("bob", "read")];
        let creds = vec![Credential {
            handle: "alice".into(),
            email: "a@x.io".into(),
            password: "s3cret".into(),
        }];
        let options = MatchOptions {
            permission_filter: None,
            tear_sheet: true,
        };

        let roster = build_roster(&personas, &grants, Some(&creds), &options);

        assert!(roster.tear_sheet);
        assert_eq!(roster.rows[0].email, "a@x.io");
        assert_eq!(roster.rows[0].password, "s3cret");
        // bob has no credential row
        assert_eq!(roster.rows[1].email, "");
    }
}
