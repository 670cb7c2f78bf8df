//! Local checklist progress layered over an immutable audit.

use std::collections::HashSet;

use crate::commands::{AuditData, AuditSection};

/// Identifies one checklist item by section and position, so items with the
/// same task text stay independent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub section_id: String,
    pub index: usize,
}

impl ItemKey {
    pub fn new(section_id: impl Into<String>, index: usize) -> Self {
        Self {
            section_id: section_id.into(),
            index,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChecklistState {
    checked: HashSet<ItemKey>,
}

impl ChecklistState {
    pub fn toggle(&mut self, key: ItemKey) {
        if !self.checked.remove(&key) {
            self.checked.insert(key);
        }
    }

    pub fn is_checked(&self, key: &ItemKey) -> bool {
        self.checked.contains(key)
    }

    /// Checked items of one section.
    pub fn completed_in(&self, section: &AuditSection) -> usize {
        (0..section.checklist.len())
            .filter(|&i| self.is_checked(&ItemKey::new(section.id.as_str(), i)))
            .count()
    }

    pub fn progress(&self, data: &AuditData) -> Progress {
        let total = data.sections.iter().map(|s| s.checklist.len()).sum();
        let completed = data.sections.iter().map(|s| self.completed_in(s)).sum();
        Progress::new(total, completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
    /// 0..=100, 0 for an empty checklist
    pub percentage: u8,
}

impl Progress {
    pub fn new(total: usize, completed: usize) -> Self {
        let completed = completed.min(total);
        let percentage = if total == 0 {
            0
        } else {
            (100.0 * completed as f64 / total as f64).round() as u8
        };
        Self {
            total,
            completed,
            percentage,
        }
    }

    /// "Offene Tasks"
    pub fn open(&self) -> usize {
        self.total - self.completed
    }
}

/// Expanded/collapsed sections. Everything starts expanded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionExpansion {
    collapsed: HashSet<String>,
}

impl SectionExpansion {
    pub fn is_expanded(&self, section_id: &str) -> bool {
        !self.collapsed.contains(section_id)
    }

    pub fn toggle(&mut self, section_id: &str) {
        if !self.collapsed.remove(section_id) {
            self.collapsed.insert(section_id.to_string());
        }
    }
}
