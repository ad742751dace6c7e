use std::sync::Arc;

/// Label shown when no custom goal is set.
pub const DEFAULT_GOALS_LABEL: &str = "Using default goals";

/// Free-text investment goals, duplicate-free, in the order they were added.
///
/// When empty, the analysis request carries no `goals` field at all and the
/// backend applies its own defaults (retirement, home purchase,
/// aggressive growth).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalList {
    goals: Arc<Vec<String>>,
}

impl GoalList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a goal. Returns `false` (and changes nothing) when the trimmed
    /// text is empty or already present.
    pub fn add_goal(&mut self, text: &str) -> bool {
        let goal = text.trim();
        if goal.is_empty() || self.contains(goal) {
            tracing::debug!(goal, "goal rejected");
            return false;
        }
        let mut next = self.goals.as_ref().clone();
        next.push(goal.to_string());
        self.goals = Arc::new(next);
        true
    }

    /// Remove the goal matching `text` exactly. Returns whether one was removed.
    pub fn remove_goal(&mut self, text: &str) -> bool {
        let Some(idx) = self.goals.iter().position(|g| g == text) else {
            return false;
        };
        let mut next = self.goals.as_ref().clone();
        next.remove(idx);
        self.goals = Arc::new(next);
        true
    }

    #[must_use]
    pub fn contains(&self, goal: &str) -> bool {
        self.goals.iter().any(|g| g == goal)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.goals.iter()
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<String>> {
        Arc::clone(&self.goals)
    }

    /// Goals for the outgoing request: `None` when empty, so the field is omitted.
    #[must_use]
    pub fn to_request_goals(&self) -> Option<Vec<String>> {
        if self.goals.is_empty() {
            None
        } else {
            Some(self.goals.as_ref().clone())
        }
    }
}
