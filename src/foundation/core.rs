use std::collections::HashSet;

use crate::foundation::issue::{Issue, PathElem};

/// Highest part slot a motion program can address. Slot 0 is reserved for the whole body.
pub const MAX_PARTS: usize = 32;

/// Number of resolved parameters carried by every primitive assignment.
pub const PARAM_COUNT: usize = 12;

/// One named sub-region of the object being animated.
///
/// Ids are small positive integers; `0` means "unassigned" and is never matched.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PartInfo {
    /// Slot id in `1..=MAX_PARTS`.
    pub id: u32,
    /// Part name matched against rule patterns (`front_left_leg`, `tail`, ...).
    pub name: String,
    /// Optional parent part id.
    #[serde(default, alias = "parent_id", skip_serializing_if = "Option::is_none")]
    pub parent: Option<u32>,
}

impl PartInfo {
    /// Build a root part with no parent.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent: None,
        }
    }

    /// Attach a parent id.
    pub fn with_parent(mut self, parent: u32) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Return `true` when the id addresses a row of the encoded buffer.
    pub fn is_encodable(&self) -> bool {
        self.id >= 1 && self.id as usize <= MAX_PARTS
    }
}

/// The caller-supplied parts of one object, in caller order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PartList {
    parts: Vec<PartInfo>,
}

impl PartList {
    /// Wrap an explicit list of parts.
    pub fn new(parts: Vec<PartInfo>) -> Self {
        Self { parts }
    }

    /// Build a flat list, assigning ids `1..=N` in iteration order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parts = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| PartInfo::new(i as u32 + 1, name))
            .collect();
        Self { parts }
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Return `true` when there are no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Borrow the parts in caller order.
    pub fn as_slice(&self) -> &[PartInfo] {
        &self.parts
    }

    /// Iterate over the parts in caller order.
    pub fn iter(&self) -> std::slice::Iter<'_, PartInfo> {
        self.parts.iter()
    }

    /// Look up a part by id.
    pub fn get(&self, id: u32) -> Option<&PartInfo> {
        self.parts.iter().find(|p| p.id == id)
    }

    /// Report ids the encoder cannot address and broken parent links.
    ///
    /// Everything here is a warning: parsing skips parts it cannot encode.
    pub fn validate(&self) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();
        let ids: HashSet<u32> = self.parts.iter().map(|p| p.id).collect();

        for (i, part) in self.parts.iter().enumerate() {
            let path = [PathElem::Index(i)];
            if part.id == 0 {
                issues.push(Issue::warning(
                    None,
                    &path,
                    format!("part '{}' uses reserved id 0", part.name),
                ));
            } else if !part.is_encodable() {
                issues.push(Issue::warning(
                    None,
                    &path,
                    format!(
                        "part '{}' id {} exceeds the {MAX_PARTS} addressable slots",
                        part.name, part.id
                    ),
                ));
            }
            if !seen.insert(part.id) {
                issues.push(Issue::warning(
                    None,
                    &path,
                    format!("duplicate part id {}", part.id),
                ));
            }
            if let Some(parent) = part.parent
                && !ids.contains(&parent)
            {
                issues.push(Issue::warning(
                    None,
                    &[PathElem::Index(i), PathElem::Field("parent")],
                    format!("parent id {parent} does not name a part"),
                ));
            }
        }
        issues
    }
}

impl<'a> IntoIterator for &'a PartList {
    type Item = &'a PartInfo;
    type IntoIter = std::slice::Iter<'a, PartInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

impl FromIterator<PartInfo> for PartList {
    fn from_iter<T: IntoIterator<Item = PartInfo>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
