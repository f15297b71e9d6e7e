pub mod archive;
pub mod reader;

pub use archive::{load_archive, load_archive_file};
pub use reader::read_table;
