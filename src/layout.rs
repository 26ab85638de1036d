//! The Wadler–Leijen layout algorithm: resolving every grouping choice in a
//! [`Doc`] against a page-width policy, producing a flat [`SimpleDoc`]
//! render stream.
//!
//! Layout runs over an explicit worklist of `(indent, doc)` entries, so the
//! native call stack stays shallow no matter how deeply a document nests. A
//! `Union` is decided by a bounded trial scan of the candidate's first line
//! (or further lines, for the smart policy) against the remaining budget.

use crate::doc::{Doc, DocNode};
use crate::simple_doc::{SimpleDoc, SimpleDocEvent};
use unicode_width::UnicodeWidthStr;

/// How many columns a line may use.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum PageWidth {
    /// Lines hold `max_width` columns, and at most `ribbon_fraction` of the
    /// width (measured from the current line's indent) may be filled before
    /// a break is preferred.
    Available {
        max_width: i32,
        ribbon_fraction: f32,
    },
    /// No limit; groups never break.
    Unbounded,
}

impl PageWidth {
    pub fn available(max_width: i32, ribbon_fraction: f32) -> PageWidth {
        PageWidth::Available {
            max_width,
            ribbon_fraction,
        }
    }
}

impl Default for PageWidth {
    fn default() -> PageWidth {
        PageWidth::available(80, 0.4)
    }
}

#[derive(Clone, Copy)]
enum FitsPolicy {
    /// Scan the candidate's first line only.
    Pretty,
    /// Keep scanning past line breaks that land deeper than the nesting
    /// level of the choice point.
    Smart,
}

enum Entry<A> {
    Doc(i32, Doc<A>),
    PopAnnotation,
}

impl<A: Clone> Doc<A> {
    /// Resolve this document against `page_width`, checking each group
    /// against its first line only.
    pub fn layout_pretty(&self, page_width: PageWidth) -> SimpleDoc<A> {
        layout_wadler_leijen(self, page_width, FitsPolicy::Pretty)
    }

    /// Resolve this document against `page_width` with deeper lookahead:
    /// a group only commits to its flat form if the lines it influences
    /// stay within budget. Slower than [`Doc::layout_pretty`], but breaks
    /// more conservatively around constructs like `align`.
    pub fn layout_smart(&self, page_width: PageWidth) -> SimpleDoc<A> {
        layout_wadler_leijen(self, page_width, FitsPolicy::Smart)
    }

    /// Render to a string at width 80 with a 0.4 ribbon.
    pub fn pretty(&self) -> String {
        self.pretty_with(80, 0.4)
    }

    /// Render to a string at the given width and ribbon fraction.
    pub fn pretty_with(&self, max_width: i32, ribbon_fraction: f32) -> String {
        self.layout_pretty(PageWidth::available(max_width, ribbon_fraction))
            .render_string()
            .expect("layout produced an invalid render stream")
    }
}

impl<A> Doc<A> {
    /// Degenerate layout for non-pretty output: every group takes its broken
    /// branch and every line break renders with zero indent. Annotations are
    /// dropped.
    pub fn layout_compact(&self) -> SimpleDoc<A> {
        use DocNode::*;

        let mut events = Vec::new();
        let mut stack = vec![self.clone()];
        let mut column = 0;
        while let Some(doc) = stack.pop() {
            match doc.node() {
                Nil => {}
                Fail => {
                    events.push(SimpleDocEvent::Fail);
                    break;
                }
                Text(s) => {
                    column += text_width(s);
                    events.push(SimpleDocEvent::Text(s.clone()));
                }
                Line => {
                    events.push(SimpleDocEvent::Line(0));
                    column = 0;
                }
                FlatAlt(l, _) => stack.push(l.clone()),
                Combined(l, r) => {
                    stack.push(r.clone());
                    stack.push(l.clone());
                }
                Nest(_, d) => stack.push(d.clone()),
                Union(_, r) => stack.push(r.clone()),
                Column(f) => stack.push(f.apply(column)),
                Nesting(f) => stack.push(f.apply(0)),
                WithPageWidth(f) => stack.push(f.apply(PageWidth::Unbounded)),
                Annotated(_, d) => stack.push(d.clone()),
            }
        }
        SimpleDoc::new(events)
    }
}

fn layout_wadler_leijen<A: Clone>(
    doc: &Doc<A>,
    page_width: PageWidth,
    policy: FitsPolicy,
) -> SimpleDoc<A> {
    use DocNode::*;

    let mut events = Vec::new();
    let mut stack = vec![Entry::Doc(0, doc.clone())];
    // Indent of the line currently being filled, and the output column.
    let mut line_indent = 0;
    let mut column = 0;
    while let Some(entry) = stack.pop() {
        let (indent, doc) = match entry {
            Entry::PopAnnotation => {
                events.push(SimpleDocEvent::RemoveAnnotation);
                continue;
            }
            Entry::Doc(indent, doc) => (indent, doc),
        };
        match doc.node() {
            Nil => {}
            Fail => {
                // Only reachable if a caller hand-built a Union whose left
                // branch is not a flattening of the right. The renderers
                // report it.
                events.push(SimpleDocEvent::Fail);
                break;
            }
            Text(s) => {
                column += text_width(s);
                events.push(SimpleDocEvent::Text(s.clone()));
            }
            Line => {
                events.push(SimpleDocEvent::Line(indent));
                line_indent = indent;
                column = indent;
            }
            FlatAlt(l, _) => stack.push(Entry::Doc(indent, l.clone())),
            Combined(l, r) => {
                stack.push(Entry::Doc(indent, r.clone()));
                stack.push(Entry::Doc(indent, l.clone()));
            }
            Nest(j, d) => stack.push(Entry::Doc(indent + j, d.clone())),
            Union(l, r) => {
                let remaining = available_width(page_width, line_indent, column);
                let min_nesting = line_indent.min(column);
                let picked = if fits(
                    page_width,
                    policy,
                    min_nesting,
                    remaining,
                    line_indent,
                    column,
                    vec![(indent, l.clone())],
                    &stack,
                    stack.len(),
                ) {
                    l
                } else {
                    r
                };
                stack.push(Entry::Doc(indent, picked.clone()));
            }
            Column(f) => stack.push(Entry::Doc(indent, f.apply(column))),
            Nesting(f) => stack.push(Entry::Doc(indent, f.apply(indent))),
            WithPageWidth(f) => stack.push(Entry::Doc(indent, f.apply(page_width))),
            Annotated(ann, d) => {
                events.push(SimpleDocEvent::AddAnnotation(ann.clone()));
                stack.push(Entry::PopAnnotation);
                stack.push(Entry::Doc(indent, d.clone()));
            }
        }
    }
    SimpleDoc::new(events)
}

/// Columns left at a choice point: the smaller of what remains on the line
/// and what remains of the ribbon. `None` means unbounded.
fn available_width(page_width: PageWidth, line_indent: i32, column: i32) -> Option<i32> {
    match page_width {
        PageWidth::Unbounded => None,
        PageWidth::Available {
            max_width,
            ribbon_fraction,
        } => {
            let ribbon_width = ((max_width as f32 * ribbon_fraction).round() as i32)
                .min(max_width)
                .max(0);
            let cols_left_in_line = max_width - column;
            let cols_left_in_ribbon = line_indent + ribbon_width - column;
            Some(cols_left_in_line.min(cols_left_in_ribbon))
        }
    }
}

/// Trial-scan a `Union` candidate (followed by the rest of the worklist)
/// and decide whether it fits. `Fail` anywhere in the scanned region means
/// the candidate is unusable, which is also how a group over a hard line
/// falls back to its broken branch.
///
/// Nested `Union`s met during the scan are resolved the same way layout
/// would resolve them, with their own availability at that point; the
/// recursion is bounded by the remaining budget, since every real choice
/// contributes at least one column before the next one.
#[allow(clippy::too_many_arguments)]
fn fits<A>(
    page_width: PageWidth,
    policy: FitsPolicy,
    min_nesting: i32,
    mut remaining: Option<i32>,
    mut line_indent: i32,
    mut column: i32,
    mut scratch: Vec<(i32, Doc<A>)>,
    rest: &[Entry<A>],
    mut rest_pos: usize,
) -> bool {
    use DocNode::*;

    loop {
        if let Some(w) = remaining {
            if w < 0 {
                return false;
            }
        }
        let (indent, doc) = match scratch.pop() {
            Some(entry) => entry,
            None => {
                // The candidate is consumed. Without a budget the only way
                // left to not fit is a Fail, and a candidate carries its own
                // Fails, so the continuation need not be scanned.
                if remaining.is_none() {
                    return true;
                }
                let mut next = None;
                while rest_pos > 0 {
                    rest_pos -= 1;
                    if let Entry::Doc(i, d) = &rest[rest_pos] {
                        next = Some((*i, d.clone()));
                        break;
                    }
                }
                match next {
                    Some(entry) => entry,
                    // End of the document: everything fit.
                    None => return true,
                }
            }
        };
        match doc.node() {
            Nil => {}
            Fail => return false,
            Text(s) => {
                let w = text_width(s);
                if let Some(r) = remaining.as_mut() {
                    *r -= w;
                }
                column += w;
            }
            Line => match (policy, page_width) {
                (_, PageWidth::Unbounded) => return true,
                (FitsPolicy::Pretty, _) => return true,
                (FitsPolicy::Smart, PageWidth::Available { max_width, .. }) => {
                    if min_nesting < indent {
                        remaining = Some(max_width - indent);
                        line_indent = indent;
                        column = indent;
                    } else {
                        return true;
                    }
                }
            },
            FlatAlt(l, _) => scratch.push((indent, l.clone())),
            Combined(l, r) => {
                scratch.push((indent, r.clone()));
                scratch.push((indent, l.clone()));
            }
            Nest(j, d) => scratch.push((indent + j, d.clone())),
            Union(l, r) => {
                let sub_remaining = available_width(page_width, line_indent, column);
                let sub_min_nesting = line_indent.min(column);
                let mut sub_scratch = scratch.clone();
                sub_scratch.push((indent, l.clone()));
                let picked = if fits(
                    page_width,
                    policy,
                    sub_min_nesting,
                    sub_remaining,
                    line_indent,
                    column,
                    sub_scratch,
                    rest,
                    rest_pos,
                ) {
                    l
                } else {
                    r
                };
                scratch.push((indent, picked.clone()));
            }
            Column(f) => scratch.push((indent, f.apply(column))),
            Nesting(f) => scratch.push((indent, f.apply(indent))),
            WithPageWidth(f) => scratch.push((indent, f.apply(page_width))),
            Annotated(_, d) => scratch.push((indent, d.clone())),
        }
    }
}

pub(crate) fn text_width(s: &str) -> i32 {
    UnicodeWidthStr::width(s) as i32
}
