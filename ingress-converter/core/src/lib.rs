#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod backend;
mod resource;

pub use self::{
    backend::{BackendId, InvalidBackendId},
    resource::{InvalidResourceType, ResourceType, TargetKind},
};
