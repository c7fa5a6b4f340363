// ethinfo-core: port discovery, link-state reconciliation, and display formatting.

pub mod device;
pub mod error;
pub mod format;
pub mod i18n;
pub mod model;
pub mod natural;
pub mod report;
pub mod resolver;
pub mod source;

// ── Primary re-exports ──────────────────────────────────────────────
pub use device::{DeviceHandle, DeviceRegistry, Registry, SnapshotRegistry, SysfsRegistry};
pub use error::CoreError;
pub use format::{StatLine, StatsBreakdown};
pub use i18n::{Catalog, Identity, Translator};
pub use natural::natural_cmp;
pub use report::{EthernetInfo, PortReport, render_pass};
pub use resolver::{PortSource, resolve};
pub use source::{FeatureGate, LinkSource, PortListSource, Snapshot, SourceConfig, load_snapshot};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    BoardNetwork, BoardTopology, BuiltinPort, CounterSet, LinkState, PortInfo, PortRole,
    RoleSection,
};
