pub mod fs;
pub mod url;
