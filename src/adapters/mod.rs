// Adapters layer: concrete codecs and exporters for external collaborators.

pub mod csv;
pub mod json;
