pub mod record;
pub mod session;

mod file_store;
pub use file_store::FileStore;

mod memory;
pub use memory::MemoryStore;

pub use record::SessionRecord;
pub use session::{Session, SessionStore};
