//! Small shared helpers: MIME inference, text decoding, HTML snippet
//! injection and filesystem moves.

pub mod encoding;
pub mod fs;
pub mod html;
pub mod mime;
