pub mod fs_loader;
pub mod reports;
pub mod tester;

pub use fs_loader::FsLoader;
pub use tester::*;
