//! Wire-level building blocks: fixed-width integers, the field catalogue and
//! the RLP tree.

pub mod fields;
pub mod fixed;
pub mod rlp;

pub use fields::{Field, FieldSpec};
pub use rlp::RlpNode;
