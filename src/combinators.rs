//! Constructors and combinators for building [`Doc`]s.

use crate::doc::{Doc, DocFn, DocNode};
use crate::flatten::changes_upon_flattening;
use crate::layout::PageWidth;
use crate::simple_doc::spaces;
use crate::symbols::{comma, lbrace, lbracket, lparen, rbrace, rbracket, rparen, space};
use std::rc::Rc;

/// The empty document.
pub fn nil<A>() -> Doc<A> {
    Doc::now(DocNode::Nil)
}

/// A literal text fragment. Must not contain `'\n'`; use [`doc`] to convert
/// strings with embedded newlines.
pub fn text<A>(s: impl Into<Rc<str>>) -> Doc<A> {
    let s = s.into();
    debug_assert!(
        !s.contains('\n'),
        "text() fragment contains a newline; split it with doc()"
    );
    Doc::now(DocNode::Text(s))
}

/// A line break that cannot be flattened away.
pub fn hard_line<A>() -> Doc<A> {
    Doc::now(DocNode::Line)
}

/// A line break that flattens to a space.
pub fn line<A>() -> Doc<A> {
    hard_line().flat_alt(&text(" "))
}

/// A line break that flattens to nothing.
pub fn line_break<A>() -> Doc<A> {
    hard_line().flat_alt(&nil())
}

/// A space if the line fits, otherwise a line break.
pub fn soft_line<A: Clone + 'static>() -> Doc<A> {
    line().group()
}

/// Nothing if the line fits, otherwise a line break.
pub fn soft_line_break<A: Clone + 'static>() -> Doc<A> {
    line_break().group()
}

/// Defer to the current output column.
pub fn column<A>(f: impl Fn(i32) -> Doc<A> + 'static) -> Doc<A> {
    Doc::now(DocNode::Column(DocFn::new(f)))
}

/// Defer to the current nesting level.
pub fn nesting<A>(f: impl Fn(i32) -> Doc<A> + 'static) -> Doc<A> {
    Doc::now(DocNode::Nesting(DocFn::new(f)))
}

/// Defer to the active page-width policy.
pub fn page_width<A>(f: impl Fn(PageWidth) -> Doc<A> + 'static) -> Doc<A> {
    Doc::now(DocNode::WithPageWidth(DocFn::new(f)))
}

/// Convert an arbitrary string, splitting embedded newlines into hard line
/// breaks.
pub fn doc<A>(s: &str) -> Doc<A> {
    if s.is_empty() {
        return nil();
    }
    let mut acc: Option<Doc<A>> = None;
    for part in s.split('\n') {
        let fragment = text(part);
        acc = Some(match acc {
            None => fragment,
            Some(prev) => prev + hard_line() + fragment,
        });
    }
    acc.unwrap_or_else(nil)
}

/// Split a string on spaces into word documents.
pub fn words<A>(s: &str) -> Vec<Doc<A>> {
    s.split(' ').map(doc).collect()
}

/// Lay out a string as a paragraph, breaking between words where needed.
pub fn reflow<A: Clone + 'static>(s: &str) -> Doc<A> {
    fill_sep(words(s))
}

impl<A> Doc<A> {
    /// Indent `Line`s inside this document by `i` more spaces (`i` may be
    /// negative; rendering clamps at column zero).
    pub fn nest(&self, i: i32) -> Doc<A> {
        Doc::now(DocNode::Nest(i, self.clone()))
    }

    /// Render `self` normally, `other` when flattened.
    pub fn flat_alt(&self, other: &Doc<A>) -> Doc<A> {
        Doc::now(DocNode::FlatAlt(self.clone(), other.clone()))
    }

    /// Attach an annotation to this document. The annotation travels through
    /// layout untouched and reaches the renderer as a balanced
    /// add/remove pair around the region's output.
    pub fn annotate(&self, ann: A) -> Doc<A> {
        Doc::now(DocNode::Annotated(ann, self.clone()))
    }

    /// `l + self + r`.
    pub fn enclose(&self, l: &Doc<A>, r: &Doc<A>) -> Doc<A> {
        l.clone() + self.clone() + r.clone()
    }

    /// `self` and `other` separated by a space.
    pub fn spaced(&self, other: &Doc<A>) -> Doc<A> {
        self.clone() + text(" ") + other.clone()
    }
}

impl<A: Clone + 'static> Doc<A> {
    /// Try to render this document on one line, falling back to the
    /// unflattened form when it does not fit.
    ///
    /// When flattening would not change the rendering at all, the document
    /// is returned unchanged rather than wrapped in a pointless choice.
    pub fn group(&self) -> Doc<A> {
        if let DocNode::Union(_, _) = self.node() {
            return self.clone();
        }
        match changes_upon_flattening(self) {
            Some(flat) => Doc::now(DocNode::Union(flat, self.clone())),
            None => self.clone(),
        }
    }
}

impl<A: 'static> Doc<A> {
    /// Set the indentation baseline to the current column, so the lines of
    /// this document align with wherever it starts.
    pub fn align(&self) -> Doc<A> {
        let this = self.clone();
        column(move |k| {
            let this = this.clone();
            nesting(move |i| this.nest(k - i))
        })
    }

    /// Like [`Doc::nest`], but relative to the current column.
    pub fn hang(&self, i: i32) -> Doc<A> {
        self.nest(i).align()
    }

    /// Indent this document `i` spaces from the current column, first line
    /// included.
    pub fn indent(&self, i: i32) -> Doc<A> {
        (text(spaces(i)) + self.clone()).hang(i)
    }

    /// Render `self`, then apply `f` to the number of columns it consumed.
    pub fn width(&self, f: impl Fn(i32) -> Doc<A> + 'static) -> Doc<A> {
        let this = self.clone();
        let f = Rc::new(f);
        column(move |k1| {
            let f = Rc::clone(&f);
            this.clone() + column(move |k2| f(k2 - k1))
        })
    }

    /// Pad this document with spaces to width `i`. Wider documents are left
    /// alone.
    pub fn fill(&self, i: i32) -> Doc<A> {
        self.width(move |w| if w > i { nil() } else { text(spaces(i - w)) })
    }

    /// Pad this document with spaces to width `i`, breaking onto a new line
    /// (nested by `i`) when the document is already wider.
    pub fn fill_break(&self, i: i32) -> Doc<A> {
        self.width(move |w| {
            if w > i {
                line_break().nest(i)
            } else {
                text(spaces(i - w))
            }
        })
    }
}

/// Fold documents together, or [`nil`] when empty.
pub fn fold_doc<A>(
    docs: impl IntoIterator<Item = Doc<A>>,
    f: impl Fn(Doc<A>, Doc<A>) -> Doc<A>,
) -> Doc<A> {
    let mut iter = docs.into_iter();
    match iter.next() {
        None => nil(),
        Some(first) => iter.fold(first, f),
    }
}

/// Join with spaces.
pub fn hsep<A>(docs: impl IntoIterator<Item = Doc<A>>) -> Doc<A> {
    fold_doc(docs, |a, b| a.spaced(&b))
}

/// Join with [`line`]s.
pub fn vsep<A>(docs: impl IntoIterator<Item = Doc<A>>) -> Doc<A> {
    fold_doc(docs, |a, b| a + line() + b)
}

/// Join with [`soft_line`]s: as many documents per line as fit.
pub fn fill_sep<A: Clone + 'static>(docs: impl IntoIterator<Item = Doc<A>>) -> Doc<A> {
    fold_doc(docs, |a, b| a + soft_line() + b)
}

/// [`vsep`], flattened onto one (spaced) line when it fits.
pub fn sep<A: Clone + 'static>(docs: impl IntoIterator<Item = Doc<A>>) -> Doc<A> {
    vsep(docs).group()
}

/// Concatenate directly.
pub fn hcat<A>(docs: impl IntoIterator<Item = Doc<A>>) -> Doc<A> {
    fold_doc(docs, |a, b| a + b)
}

/// Join with [`line_break`]s.
pub fn vcat<A>(docs: impl IntoIterator<Item = Doc<A>>) -> Doc<A> {
    fold_doc(docs, |a, b| a + line_break() + b)
}

/// Join with [`soft_line_break`]s: as many documents per line as fit,
/// without separating spaces.
pub fn fill_cat<A: Clone + 'static>(docs: impl IntoIterator<Item = Doc<A>>) -> Doc<A> {
    fold_doc(docs, |a, b| a + soft_line_break() + b)
}

/// [`vcat`], flattened onto one line when it fits.
pub fn cat<A: Clone + 'static>(docs: impl IntoIterator<Item = Doc<A>>) -> Doc<A> {
    vcat(docs).group()
}

/// Append `p` to every document except the last.
pub fn punctuate<A>(docs: Vec<Doc<A>>, p: &Doc<A>) -> Vec<Doc<A>> {
    let len = docs.len();
    docs.into_iter()
        .enumerate()
        .map(|(i, d)| if i + 1 == len { d } else { d + p.clone() })
        .collect()
}

/// Enclose documents in `l`/`r` with `sep` before every element after the
/// first, grouping so the whole sequence collapses onto one line when it
/// fits.
pub fn enclose_sep<A: Clone + 'static>(
    docs: Vec<Doc<A>>,
    l: Doc<A>,
    r: Doc<A>,
    sep: Doc<A>,
) -> Doc<A> {
    let mut iter = docs.into_iter();
    let first = match iter.next() {
        None => return l + r,
        Some(d) => d,
    };
    let rest: Vec<Doc<A>> = iter.collect();
    if rest.is_empty() {
        return l + first + r;
    }
    let mut rows = Vec::with_capacity(rest.len() + 1);
    rows.push(l + first);
    for d in rest {
        rows.push(sep.clone() + d);
    }
    cat(rows) + r
}

/// A `[a, b, c]`-style list that spills one element per line when it does
/// not fit.
pub fn list<A: Clone + 'static>(docs: Vec<Doc<A>>) -> Doc<A> {
    enclose_sep(
        docs,
        (lbracket() + space()).flat_alt(&lbracket()),
        (hard_line() + rbracket()).flat_alt(&rbracket()),
        comma() + space(),
    )
    .group()
}

/// A `(a, b, c)`-style tuple that spills one element per line when it does
/// not fit.
pub fn tupled<A: Clone + 'static>(docs: Vec<Doc<A>>) -> Doc<A> {
    enclose_sep(
        docs,
        (lparen() + space()).flat_alt(&lparen()),
        (hard_line() + rparen()).flat_alt(&rparen()),
        comma() + space(),
    )
    .group()
}

/// A `{a, b, c}`-style braced list that spills one element per line when it
/// does not fit.
pub fn semi_braces<A: Clone + 'static>(docs: Vec<Doc<A>>) -> Doc<A> {
    enclose_sep(
        docs,
        (lbrace() + space()).flat_alt(&lbrace()),
        (hard_line() + rbrace()).flat_alt(&rbrace()),
        comma() + space(),
    )
    .group()
}
