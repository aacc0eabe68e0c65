//! LCFG I/O - Status File, Export, and Directory Persistence
//!
//! The two persistent serialisations that bound the `lcfg-core` data engine
//! to its environment: the line-oriented status file format and the shell
//! export format, plus directory-level (de)serialisation of a component set
//! and hold-file emission for pending-change review.

mod directory;
mod error;
mod export;
mod hold;
mod status;

pub use directory::{find_or_create, read_status_dir, write_status_dir};
pub use error::{IoError, IoResult, ParseError};
pub use export::{render_export, write_export_file};
pub use hold::write_hold_file;
pub use status::{emit_component, load_status_file, parse_component, save_status_file};
