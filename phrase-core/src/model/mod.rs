pub mod catalog;
pub mod culture;
pub mod phrase;
