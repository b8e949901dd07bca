//! Database connection configuration: the key/value source seam and the
//! alias resolver that reads connection parameters from it.

pub mod resolver;
pub mod source;

pub use resolver::{DbConfigResolver, DbConnectionConfig};
pub use source::{MemorySource, PropertySource, TomlFileSource};
