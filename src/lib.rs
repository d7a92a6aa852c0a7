//! Stellar network topology simulation core
//!
//! Models the Stellar network graph (nodes, organizations, quorum sets) and
//! supports "what-if" edits with full undo/redo: toggling a validator's
//! flags, editing quorum set thresholds, adding and removing validators and
//! nested quorum sets, and adding hypothetical nodes.
//!
//! Edits are expressed as reversible [`NetworkChange`]s executed through a
//! [`ChangeQueue`]; a [`Store`] ties one network and one queue together for
//! the duration of an editing session. Fetching, persistence and rendering
//! of network snapshots are left to the surrounding application.

pub mod changes;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use changes::{ChangeQueue, NetworkChange};
pub use config::Settings;
pub use error::{AppError, Result};
pub use models::{Network, Node, Organization, PublicKey, QuorumSet, QuorumSetId};
pub use store::{AddNodeRequest, Store};
