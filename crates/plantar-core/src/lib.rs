pub mod config;
pub mod error;
pub mod notification;
pub mod snapshot;
pub mod zones;

pub use config::*;
pub use error::*;
pub use notification::*;
pub use snapshot::*;
pub use zones::*;
