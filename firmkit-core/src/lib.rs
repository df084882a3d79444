//! Firmkit core
//!
//! Domain types shared by the firmkit CLI and the provisioning client:
//! the step/pipeline driver, host OS detection with its invocation
//! strategy, pinned source-control revisions, and certificate
//! sanitization.

pub mod os;
pub mod pem;
pub mod revision;
pub mod step;

pub use os::HostOs;
pub use pem::sanitize_certificate;
pub use revision::PinnedRevision;
pub use step::{Pipeline, PipelineError, Step};
