/// Two-phase guard for destructive actions.
///
/// Requesting an action stages its target and makes the confirmation
/// surface visible; the action itself only runs once `confirm` hands the
/// target back. Only one target is pending at a time — a new request
/// replaces the previous one, since the UI only ever shows one modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfirmationGate<T> {
    #[default]
    Idle,
    Pending(T),
}

impl<T> ConfirmationGate<T> {
    /// Stage `target`, replacing any previously staged one.
    pub fn request(&mut self, target: T) {
        *self = Self::Pending(target);
    }

    /// Consume the staged target, returning to idle. `None` when nothing
    /// was pending (a double-confirm is harmless).
    pub fn confirm(&mut self) -> Option<T> {
        match std::mem::replace(self, Self::Idle) {
            Self::Pending(target) => Some(target),
            Self::Idle => None,
        }
    }

    /// Drop the staged target without running anything.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    pub fn pending(&self) -> Option<&T> {
        match self {
            Self::Pending(target) => Some(target),
            Self::Idle => None,
        }
    }

    /// Whether the confirmation surface should be shown.
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}
