//! Game data: where content comes from and what it must look like.
//!
//! ## Key Components
//!
//! - [`DataSource`]: a file or inline document, JSON or YAML
//! - [`AttributeDefinition`], [`ItemDefinition`], [`EventsDocument`]: the
//!   document shapes content authors write
//! - [`GameData`]: every loaded definition, validated and ready for the
//!   engine to install

mod bundle;
mod definitions;
mod source;

pub use bundle::GameData;
pub use definitions::{AttributeDefinition, EventsDocument, ItemDefinition};
pub use source::{load_document, parse_document, DataError, DataFormat, DataSource};
