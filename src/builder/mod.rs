/// Build domain layer: request validation, command assembly and execution.
pub mod command;
pub mod errors;
pub mod request;

pub use command::{BuildCommand, BuildSettings};
pub use errors::BuildError;
pub use request::{Arch, BuildRequest, Firmware};
