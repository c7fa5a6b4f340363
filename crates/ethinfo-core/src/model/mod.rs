// ── Domain model ──
//
// Raw source records (`BuiltinPort`, `BoardTopology`) and the canonical
// types produced by resolution (`PortInfo`) and device reads (`LinkState`).

pub mod board;
pub mod link;
pub mod port;

pub use board::{BoardNetwork, BoardTopology, RoleSection};
pub use link::{CounterSet, LinkState};
pub use port::{BuiltinPort, PortInfo, PortRole};
