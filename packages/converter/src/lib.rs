pub mod converter;
pub mod error;

pub use converter::{document, DocumentConverter, Pandoc, StaticConverter};
pub use error::{ConvertError, ConvertResult};
