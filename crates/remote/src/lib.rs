mod error;
mod http;
mod memory;
mod store;

pub use error::{RemoteError, Result};
pub use http::HttpRemoteStore;
pub use memory::MemoryStore;
pub use store::RemoteStore;
