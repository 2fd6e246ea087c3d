//! HTML transforms applied between Markdown rendering and PDF printing.
//!
//! Order used by the Markdown → PDF path:
//!  1. DataURL     (at render time: inline local images)
//!  2. PageMargin  (at print time: CLI margin overrides as an `@page` rule)
//!  3. Math        (at print time: typesetting bootstrap script)

pub mod data_url;
pub mod math;
pub mod page_margin;
