use crate::model::ContributionSnapshot;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityId(usize);

impl IdentityId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Default, Clone)]
pub struct IdentityTable {
    by_key: HashMap<String, IdentityId>,
    display: Vec<String>,
}

impl IdentityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: &ContributionSnapshot) -> Self {
        let mut table = Self::new();
        for link in &snapshot.links {
            table.intern(&link.contributor);
        }
        for record in &snapshot.extension_commits {
            table.intern(&record.committer);
        }
        table
    }

    pub fn intern(&mut self, email: &str) -> IdentityId {
        let key = canonical_key(email);
        if let Some(id) = self.by_key.get(&key) {
            return *id;
        }
        let id = IdentityId(self.display.len());
        self.display.push(email.trim().to_string());
        self.by_key.insert(key, id);
        id
    }

    #[cfg(test)]
    pub fn lookup(&self, email: &str) -> Option<IdentityId> {
        self.by_key.get(&canonical_key(email)).copied()
    }

    pub fn display(&self, id: IdentityId) -> &str {
        &self.display[id.0]
    }

    pub fn len(&self) -> usize {
        self.display.len()
    }

    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }
}

fn canonical_key(email: &str) -> String {
    email.trim().to_lowercase()
}
