//! Invocation request dispatch.
//!
//! This module implements the request pipeline of the helper: an
//! [`InvocationRequest`] is deserialized from the standard-input payload,
//! routed by [`Router`] to the parser or hasher operation it names, and the
//! resulting [`OperationOutput`] is printed by [`OutputWriter`].
//!
//! ## Protocol
//!
//! A request names one operation and carries positional arguments:
//!
//! ```json
//! {"function": "get_pipfile_hash", "args": ["Pipfile", "Pipfile.lock"]}
//! ```
//!
//! Parse operations consume the first argument only; hash operations consume
//! all of them. Unknown function names are a silent no-op.

mod errors;
mod request;
mod response;
mod router;

pub use errors::DispatchError;
pub use request::InvocationRequest;
pub use response::{OperationOutput, OutputWriter};
pub use router::{Operation, Router};

pub(crate) use router::DISPATCH_TARGET;
