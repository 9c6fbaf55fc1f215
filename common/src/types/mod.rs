pub mod address;
pub mod header;
pub mod input;
pub mod output;
pub mod signed;
pub mod transaction;

pub use address::{Address, AddressError};
pub use header::{BlockHeader, BLOCK_HEADER_LENGTH};
pub use input::TransactionInput;
pub use output::TransactionOutput;
pub use signed::SignedTransaction;
pub use transaction::{Transaction, TransactionType};
