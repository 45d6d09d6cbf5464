pub mod capture;
pub mod config;
pub mod live;

pub use capture::*;
pub use config::*;
pub use live::*;
