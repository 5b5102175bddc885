//! engine::message
//!
//! Commit message assembly.
//!
//! The sync tool writes contributor credits into the scratch message file
//! during download. Before committing, the banner line is put in front of
//! the credits, in place. The file is left behind afterwards as a record
//! of the last commit message.

use std::fs::OpenOptions;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Rewrite `path` as `banner` followed by its previous content.
pub fn prefix_message_file(path: &Path, banner: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().read(true).write(true).open(path)?;

    let mut credits = Vec::new();
    file.read_to_end(&mut credits)?;

    file.seek(SeekFrom::Start(0))?;
    file.set_len(0)?;
    file.write_all(banner.as_bytes())?;
    file.write_all(&credits)?;
    file.flush()
}
