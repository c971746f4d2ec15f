//! Grouping of unresolved records by postal code.

use std::collections::HashMap;

use super::record::RecordId;

/// Records sharing one postal code that still lack mileage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalGroup {
    postal_code: String,
    members: Vec<RecordId>,
}

impl PostalGroup {
    /// The postal code, exactly as it appeared in the input.
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    /// Member records, in input order. Never empty.
    pub fn members(&self) -> &[RecordId] {
        &self.members
    }
}

/// Postal groups in first-seen order.
#[derive(Debug, Default)]
pub struct PostalGroups {
    groups: Vec<PostalGroup>,
    index: HashMap<String, usize>,
}

impl PostalGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to its postal code's group, creating the group on
    /// first sight.
    pub fn add(&mut self, postal_code: &str, id: RecordId) {
        match self.index.get(postal_code) {
            Some(&i) => self.groups[i].members.push(id),
            None => {
                self.index.insert(postal_code.to_string(), self.groups.len());
                self.groups.push(PostalGroup {
                    postal_code: postal_code.to_string(),
                    members: vec![id],
                });
            }
        }
    }

    /// Look up a group by postal code.
    pub fn get(&self, postal_code: &str) -> Option<&PostalGroup> {
        self.index.get(postal_code).map(|&i| &self.groups[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &PostalGroup> {
        self.groups.iter()
    }

    /// Number of distinct postal codes.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total records across all groups.
    pub fn member_count(&self) -> usize {
        self.groups.iter().map(|g| g.members.len()).sum()
    }
}

impl<'a> IntoIterator for &'a PostalGroups {
    type Item = &'a PostalGroup;
    type IntoIter = std::slice::Iter<'a, PostalGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
