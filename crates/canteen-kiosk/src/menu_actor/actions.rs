//! Custom actions for the menu actor.

/// Operations on a single dish beyond patching its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Flips `is_available`. The result is the new value.
    ToggleAvailability,
}
