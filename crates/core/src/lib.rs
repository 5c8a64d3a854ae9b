//! Shared domain logic for the RoomSync service: wire-format models, the
//! error type surfaced by every layer, and the pure slot-window rules the
//! persistence layer and the tests both lean on.

pub mod errors;
pub mod models;
pub mod slots;
pub mod time;
