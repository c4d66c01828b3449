//! Port interfaces for the queue and the application layer
//!
//! Ports define the contract between the durable queue / sync use cases and
//! infrastructure implementations. Following Hexagonal Architecture, the core
//! never touches a file, a socket or the system clock directly.
//!
//! ## Port Placement Guidelines
//!
//! Before adding a new port here, ask:
//!
//! 1. **Does this port represent a capability the queue or a use case needs?**
//! 2. **Is it implemented by the infrastructure layer or an outer collaborator?**
//!
//! If both answers are **yes**, place it in `fq-core/ports`.

mod clock;
pub mod connectivity;
pub mod durable_store;
pub mod id_generator;
pub mod remote;

pub use clock::*;
pub use connectivity::{Connectivity, ConnectivityPort};
pub use durable_store::{DurableStorePort, StorageKey, StoreError};
pub use id_generator::IdGeneratorPort;
pub use remote::{RemoteSubmitPort, SubmitError};
