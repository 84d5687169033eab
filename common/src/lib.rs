//! Types shared between the record store, the media layer and the HTTP handlers.

pub mod model;
pub mod requests;
