use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// `{id, name}` entry for locations, departments and job grades.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NamedEntry {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TeamEntry {
    pub id: String,
    pub name: String,
    pub department_id: String,
}

/// An already registered account. Other columns of the users table are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExistingUser {
    pub email: String,
}

/// Reference data loaded once per import session. Never mutated by the pipeline.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ReferenceSet {
    pub locations: Vec<NamedEntry>,
    pub departments: Vec<NamedEntry>,
    pub teams: Vec<TeamEntry>,
    pub job_grades: Vec<NamedEntry>,
    pub users: Vec<ExistingUser>,
}

impl ReferenceSet {
    /// Name of the department with `id`, if present.
    pub fn department_name(&self, id: &str) -> Option<&str> {
        self.departments
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.name.as_str())
    }
}

/// Lookup key for case-insensitive name matching.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

/// Registered emails, compared case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ExistingUserIndex {
    emails: HashSet<String>,
}

impl ExistingUserIndex {
    pub fn from_emails<'a>(emails: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            emails: emails.into_iter().map(normalize).collect(),
        }
    }

    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(&normalize(email))
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

/// Normalized lookup tables built once from a [`ReferenceSet`].
///
/// When two entries of one collection share a normalized name (teams:
/// within the same department) the first one listed wins, so every lookup
/// resolves to at most one entry. Teams whose department is not in the
/// snapshot can never be looked up and are left out.
#[derive(Debug, Clone)]
pub struct ReferenceIndex {
    locations: HashMap<String, NamedEntry>,
    departments: HashMap<String, NamedEntry>,
    /// Keyed by (department id, normalized team name).
    teams: HashMap<(String, String), TeamEntry>,
    users: ExistingUserIndex,
    skipped: usize,
}

impl ReferenceIndex {
    pub fn build(set: &ReferenceSet) -> Self {
        let mut skipped = 0;
        let locations = index_named("locations", &set.locations, &mut skipped);
        let departments = index_named("departments", &set.departments, &mut skipped);

        let department_ids: HashSet<&str> = set.departments.iter().map(|d| d.id.as_str()).collect();
        let mut teams: HashMap<(String, String), TeamEntry> = HashMap::with_capacity(set.teams.len());
        for team in &set.teams {
            if !department_ids.contains(team.department_id.as_str()) {
                tracing::warn!(
                    team = %team.name,
                    department_id = %team.department_id,
                    "team belongs to unknown department, ignored"
                );
                skipped += 1;
                continue;
            }
            match teams.entry((team.department_id.clone(), normalize(&team.name))) {
                Entry::Vacant(slot) => {
                    slot.insert(team.clone());
                }
                Entry::Occupied(kept) => {
                    tracing::warn!(
                        collection = "teams",
                        name = %team.name,
                        kept = %kept.get().id,
                        ignored = %team.id,
                        "duplicate reference name, first entry kept"
                    );
                    skipped += 1;
                }
            }
        }

        let users = ExistingUserIndex::from_emails(set.users.iter().map(|u| u.email.as_str()));

        tracing::debug!(
            locations = locations.len(),
            departments = departments.len(),
            teams = teams.len(),
            users = users.len(),
            skipped,
            "reference index built"
        );

        Self {
            locations,
            departments,
            teams,
            users,
            skipped,
        }
    }

    pub fn location(&self, name: &str) -> Option<&NamedEntry> {
        self.locations.get(&normalize(name))
    }

    pub fn department(&self, name: &str) -> Option<&NamedEntry> {
        self.departments.get(&normalize(name))
    }

    /// Team named `name` inside the department `department_id`.
    pub fn team(&self, department_id: &str, name: &str) -> Option<&TeamEntry> {
        self.teams.get(&(department_id.to_string(), normalize(name)))
    }

    pub fn is_registered(&self, email: &str) -> bool {
        self.users.contains(email)
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    pub fn department_count(&self) -> usize {
        self.departments.len()
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Snapshot entries left out of the index (shadowed duplicates and
    /// teams of unknown departments).
    pub fn skipped_count(&self) -> usize {
        self.skipped
    }
}

fn index_named(
    collection: &'static str,
    entries: &[NamedEntry],
    skipped: &mut usize,
) -> HashMap<String, NamedEntry> {
    let mut map: HashMap<String, NamedEntry> = HashMap::with_capacity(entries.len());
    for entry in entries {
        match map.entry(normalize(&entry.name)) {
            Entry::Vacant(slot) => {
                slot.insert(entry.clone());
            }
            Entry::Occupied(kept) => {
                tracing::warn!(
                    collection,
                    name = %entry.name,
                    kept = %kept.get().id,
                    ignored = %entry.id,
                    "duplicate reference name, first entry kept"
                );
                *skipped += 1;
            }
        }
    }
    map
}
