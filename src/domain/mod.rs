//! The waste-collection domain: value objects, entities and protocol numbering.

pub mod entities;
pub mod numbering;
pub mod value_objects;
