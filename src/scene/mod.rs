pub mod frame;
pub mod parse;
mod svg;
