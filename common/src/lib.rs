// Wire codec for plasma block headers and transactions
pub mod codec;
pub mod config;
pub mod consolidation;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{ClientConfig, Network};
pub use consolidation::MergePolicy;
pub use error::{PlasmaError, PlasmaResult};
pub use types::{
    Address, BlockHeader, SignedTransaction, Transaction, TransactionInput, TransactionOutput,
    TransactionType,
};
