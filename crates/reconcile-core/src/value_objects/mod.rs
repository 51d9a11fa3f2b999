//! Value objects - immutable types that represent domain concepts

mod endpoint_id;

pub use endpoint_id::EndpointId;
