//! Roster - the expanded (handle, single permission) table
//!
//! Produced by the merge pipeline and consumed verbatim by the HTML view
//! and both exporters. One `RosterRow` per permission name per grant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One expanded record: a single permission annotated with persona fields.
/// Fields are always present and default to ""; the credential pair is
/// only populated (and only displayed) in tear-sheet mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRow {
    pub handle: String,
    pub permission: String,
    pub name: String,
    pub faction: String,
    pub beliefs: String,
    pub tags: String,
    pub bio: String,
    pub image: String,
    pub email: String,
    pub password: String,
}

/// The displayed table: expanded rows plus the tear-sheet flag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub rows: Vec<RosterRow>,
    pub tear_sheet: bool,
}

/// Options for one merge run
#[derive(Debug, Clone, Default)]
pub struct MatchOptions {
    /// Comma-separated allow-list of permission names; None keeps all rows
    pub permission_filter: Option<String>,
    /// Join the credentials sheet and surface Email/Password columns
    pub tear_sheet: bool,
}

impl Roster {
    /// Group rows by permission name. Keys come out lexically sorted (the
    /// grouping order the original tool displayed); membership and order
    /// within a group follow input order, so repeated runs are identical.
    pub fn grouped(&self) -> Vec<(String, Vec<&RosterRow>)> {
        let mut groups: BTreeMap<&str, Vec<&RosterRow>> = BTreeMap::new();
        for row in &self.rows {
            groups.entry(row.permission.as_str()).or_default().push(row);
        }
        groups
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    /// Column headers for the tabular views (CSV, HTML table)
    pub fn columns(&self) -> Vec<&'static str> {
        let mut cols = vec![
            "Handle",
            "Permission",
            "Name",
            "Faction",
            "Beliefs",
            "Tags",
            "Bio",
            "Image",
        ];
        if self.tear_sheet {
            cols.push("Email");
            cols.push("Password");
        }
        cols
    }

    /// Cell values for one row, aligned with [`Roster::columns`]
    pub fn values<'a>(&self, row: &'a RosterRow) -> Vec<&'a str> {
        let mut values = vec![
            row.handle.as_str(),
            row.permission.as_str(),
            row.name.as_str(),
            row.faction.as_str(),
            row.beliefs.as_str(),
            row.tags.as_str(),
            row.bio.as_str(),
            row.image.as_str(),
        ];
        if self.tear_sheet {
            values.push(row.email.as_str());
            values.push(row.password.as_str());
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(handle: &str, permission: &str) -> RosterRow {
        RosterRow {
            handle: handle.into(),
            permission: permission.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_grouped_sorts_keys_lexically() {
        let roster = Roster {
            rows: vec![row("a", "write"), row("b", "admin"), row("c", "read")],
            tear_sheet: false,
        };
        let keys: Vec<String> = roster.grouped().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["admin", "read", "write"]);
    }

    #[test]
    fn test_grouped_keeps_input_order_within_a_group() {
        let roster = Roster {
            rows: vec![row("b", "read"), row("a", "read")],
            tear_sheet: false,
        };
        let grouped = roster.grouped();
        let handles: Vec<&str> = grouped[0].1.iter().map(|r| r.handle.as_str()).collect();
        assert_eq!(handles, vec!["b", "a"]);
    }

    #[test]
    fn test_grouping_is_stable_across_runs() {
        let roster = Roster {
            rows: vec![row("a", "read"), row("b", "write"), row("c", "read")],
            tear_sheet: false,
        };
        assert_eq!(roster.grouped(), roster.grouped());
    }

    #[test]
    fn test_tear_sheet_adds_credential_columns() {
        let plain = Roster::default();
        let tear = Roster {
            tear_sheet: true,
            ..Default::default()
        };
        assert!(!plain.columns().contains(&"Password"));
        assert_eq!(tear.columns().len(), plain.columns().len() + 2);
    }
}
