//! The resolved render stream ([`SimpleDoc`]) and the renderers that
//! consume it.

use std::rc::Rc;
use thiserror::Error;

/// A renderer met a malformed render stream. Layout never produces one of
/// these for well-formed documents; seeing this error means either a
/// hand-built stream was broken, or a hand-built `Union` violated the
/// flattened-left-branch invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("unresolved Fail in render stream; the layout that produced it is broken")]
    UnexpectedFail,
    #[error("annotation stack underflow: RemoveAnnotation without a matching AddAnnotation")]
    AnnotationStackUnderflow,
}

/// A fully resolved, choice-free render stream: the output of the layout
/// functions and the input to every renderer.
///
/// The stream is a flat event sequence; running off the end is the
/// terminator. `AddAnnotation`/`RemoveAnnotation` events are balanced with
/// stack discipline — layout guarantees this by construction, and the
/// renderers that track annotations report unbalanced hand-built streams
/// as [`RenderError::AnnotationStackUnderflow`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleDoc<A> {
    events: Vec<SimpleDocEvent<A>>,
}

/// One event of a [`SimpleDoc`] stream.
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleDocEvent<A> {
    /// Never produced for well-formed documents; renderers refuse it.
    Fail,
    /// A text fragment on the current line.
    Text(Rc<str>),
    /// A line break followed by this much indentation (clamped to zero when
    /// rendered).
    Line(i32),
    /// Open an annotated region.
    AddAnnotation(A),
    /// Close the most recently opened region.
    RemoveAnnotation,
}

impl<A> SimpleDoc<A> {
    pub fn new(events: Vec<SimpleDocEvent<A>>) -> SimpleDoc<A> {
        SimpleDoc { events }
    }

    pub fn events(&self) -> &[SimpleDocEvent<A>] {
        &self.events
    }

    /// Render to a plain string, ignoring annotations.
    pub fn render_string(&self) -> Result<String, RenderError> {
        let mut out = String::new();
        self.render_stream(|fragment| out.push_str(fragment))?;
        Ok(out)
    }

    /// Invoke `write` once per text or line fragment, in order, without
    /// buffering the whole document. Annotations are ignored.
    pub fn render_stream(&self, mut write: impl FnMut(&str)) -> Result<(), RenderError> {
        for event in &self.events {
            match event {
                SimpleDocEvent::Fail => return Err(RenderError::UnexpectedFail),
                SimpleDocEvent::Text(s) => write(s),
                SimpleDocEvent::Line(i) => write(&line_fragment(*i)),
                SimpleDocEvent::AddAnnotation(_) | SimpleDocEvent::RemoveAnnotation => {}
            }
        }
        Ok(())
    }

    /// Fold the stream into a single `B`. `combine` must be associative
    /// with `empty` as its identity. An explicit stack of open annotations
    /// hands `remove_annotation` the value being closed, not just a flag.
    pub fn render_decorated<B>(
        &self,
        empty: B,
        mut combine: impl FnMut(B, B) -> B,
        mut from_text: impl FnMut(&str) -> B,
        mut add_annotation: impl FnMut(&A) -> B,
        mut remove_annotation: impl FnMut(&A) -> B,
    ) -> Result<B, RenderError> {
        let mut acc = empty;
        let mut open: Vec<&A> = Vec::new();
        for event in &self.events {
            acc = match event {
                SimpleDocEvent::Fail => return Err(RenderError::UnexpectedFail),
                SimpleDocEvent::Text(s) => combine(acc, from_text(s)),
                SimpleDocEvent::Line(i) => combine(acc, from_text(&line_fragment(*i))),
                SimpleDocEvent::AddAnnotation(ann) => {
                    open.push(ann);
                    combine(acc, add_annotation(ann))
                }
                SimpleDocEvent::RemoveAnnotation => {
                    let ann = open.pop().ok_or(RenderError::AnnotationStackUnderflow)?;
                    combine(acc, remove_annotation(ann))
                }
            };
        }
        Ok(acc)
    }
}

fn line_fragment(indent: i32) -> String {
    let mut s = String::with_capacity(1 + indent.max(0) as usize);
    s.push('\n');
    s.push_str(&spaces(indent));
    s
}

pub(crate) fn spaces(n: i32) -> String {
    " ".repeat(n.max(0) as usize)
}
