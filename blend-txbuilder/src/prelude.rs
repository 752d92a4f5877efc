pub use crate::assemble::assemble;
pub use crate::builder::TransactionBuilder;
pub use crate::{TxBuilderError, TxBuilderOptions, BASE_FEE};
pub use blend_primitives::Fragment;
