//! Wadler/Leijen pretty printing with annotations.
//!
//! Combinators build an immutable [`Doc`]; [`Doc::layout_pretty`],
//! [`Doc::layout_smart`], or [`Doc::layout_compact`] resolve it against a
//! [`PageWidth`] into a [`SimpleDoc`] stream; the renderers on
//! [`SimpleDoc`] (plain, decorated, streaming, ANSI) produce the final
//! output.

mod ansi;
mod combinators;
mod doc;
mod flatten;
mod layout;
mod simple_doc;

pub mod symbols;

pub use ansi::{
    bg_color, bg_color_dull, bold, color, color_dull, italicized, underlined, AnsiStyle, Color,
    Intensity,
};
pub use combinators::{
    cat, column, doc, enclose_sep, fill_cat, fill_sep, fold_doc, hard_line, hcat, hsep, line,
    line_break, list, nesting, nil, page_width, punctuate, reflow, semi_braces, sep, soft_line,
    soft_line_break, text, tupled, vcat, vsep, words,
};
pub use doc::{Doc, DocFn, DocNode, FusionDepth};
pub use layout::PageWidth;
pub use simple_doc::{RenderError, SimpleDoc, SimpleDocEvent};
