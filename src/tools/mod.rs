pub use self::backup::create_backup;
pub use self::insert_in_file::insert_snippet;
pub use self::marker::{Marker, wrap_snippet};
pub use self::pattern::compile_pattern;
pub use self::read_file::{read_file, read_snippet_file};
pub use self::write_file::write_file;

mod backup;
mod insert_in_file;
mod marker;
mod pattern;
mod read_file;
mod write_file;
