// Adapters layer: concrete attribute providers for embedders without a reflection runtime.

pub mod manifest;

pub use manifest::ManifestAttributeProvider;
