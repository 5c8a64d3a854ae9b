/// Room lifecycle handlers
pub mod room;
/// Slot generation, availability and update handlers
pub mod slot;
