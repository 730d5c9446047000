pub mod info;
pub mod init;
pub mod new;
pub mod reorder;
pub mod replay;

pub use info::{info, InfoArgs};
pub use init::{init, InitArgs};
pub use new::{new, NewArgs};
pub use reorder::{reorder, ReorderArgs};
pub use replay::{replay, ReplayArgs};

use crate::config::Config;
use folio_editor::EditSession;
use folio_store::MemoryStore;
use std::path::Path;

/// Open `path` in a fresh session configured from `config`
pub(crate) fn open_session(
    path: &Path,
    config: &Config,
) -> anyhow::Result<EditSession<MemoryStore>> {
    let mut session = EditSession::new(MemoryStore::new(), config.editor.clone());
    session.open(path, false)?;
    Ok(session)
}
