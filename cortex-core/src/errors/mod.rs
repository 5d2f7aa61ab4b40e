mod cortex_error;
mod subsystem;

pub use cortex_error::{CortexError, CortexResult};
pub use subsystem::{AwakeError, ConsolidationError, MarketError, RetrievalError, StorageError};
