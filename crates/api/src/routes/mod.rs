/// Health and version endpoints
pub mod health;
/// Room management endpoints
pub mod room;
/// Slot management and availability endpoints
pub mod slot;
