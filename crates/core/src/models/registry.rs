use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::plan::Plan;

/// The collection of a user's redemption plans, in insertion order, plus
/// the currently selected plan (or none).
///
/// Plans are added only through a completed subscription and never removed;
/// the collection is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    /// All plans, oldest subscription first
    pub plans: Vec<Plan>,

    /// Id of the plan currently open in the dashboard, if any
    pub selected: Option<Uuid>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            plans: Vec::new(),
            selected: None,
        }
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Plan> {
        self.plans.iter_mut().find(|p| p.id == id)
    }

    /// The committed copy of the selected plan, if a selection exists.
    #[must_use]
    pub fn selected_plan(&self) -> Option<&Plan> {
        self.selected.and_then(|id| self.get(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
