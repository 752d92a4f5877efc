//! The transaction pipeline
//!
//! Every ledger write goes through the same path: refresh the account
//! cursor, build, simulate, assemble the simulated resources, sign, submit
//! and poll until the ledger reports a terminal status. [`Pipeline`] owns
//! that path; callers only provide an operation, a parser for the return
//! value and the [`TxParams`] of the account paying for it.
//!
//! Failures come back as a closed [`Error`] whose ledger-originated
//! variants carry a [`FailureKind`] produced by [`classify`].

mod confirm;
mod error;
mod params;
mod pipeline;

pub mod parse;

pub use error::*;
pub use params::*;
pub use parse::ParseError;
pub use pipeline::Pipeline;
