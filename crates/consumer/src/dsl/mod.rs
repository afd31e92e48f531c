//! Content DSLs for message bodies and metadata

pub mod json_body;
pub mod metadata;
pub mod xml;

pub use json_body::{JsonArray, JsonBody};
pub use metadata::MetadataBuilder;
pub use xml::{PactXmlBuilder, XmlElementBuilder};
