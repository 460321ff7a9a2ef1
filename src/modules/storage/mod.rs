//! Storage module for uploaded snapshots
//!
//! Provides a local-disk backend that writes uploaded files under the
//! configured upload directory and reads them back for download.

mod local_disk;

pub use local_disk::{sanitize_file_name, LocalDiskStorage};
