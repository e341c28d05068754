pub mod config;
pub mod confirm;
pub mod error;
pub mod format;
pub mod neglect;
pub mod policy;
pub mod schedule;
pub mod service;
pub mod store;
pub mod types;

pub use config::*;
pub use confirm::*;
pub use error::*;
pub use format::*;
pub use neglect::*;
pub use policy::*;
pub use schedule::*;
pub use service::*;
pub use store::*;
pub use types::*;
