//! Domain models shared by the storage, service and API crates.

mod artifact;
mod responses;
mod upload;
mod video;

pub use artifact::*;
pub use responses::*;
pub use upload::*;
pub use video::*;
