mod errors;
mod exchange;
mod interface;

pub use errors::{Result, StoreError};
pub use exchange::Exchanger;
#[cfg(any(test, feature = "testkit"))]
pub use interface::MockStoreService;
pub use interface::StoreService;
