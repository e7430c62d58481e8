pub mod config;
pub mod errors;
pub mod records;
pub mod step;

pub use config::*;
pub use errors::*;
pub use records::*;
pub use step::*;
