pub mod notify;
pub mod scratch;
pub mod vault;

pub use notify::{ConsoleNotifier, MemoryNotifier, Notifier};
pub use scratch::{ScratchFile, SCRATCH_FILE};
pub use vault::{Asset, FsVault, LinkResolver, Note, Vault};
