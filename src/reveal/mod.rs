pub mod errors;
pub mod fetch;
pub mod process;
pub mod resolver;

pub use errors::*;
pub use fetch::*;
pub use process::*;
pub use resolver::*;
