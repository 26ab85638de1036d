use crate::layout::PageWidth;
use once_cell::unsync::OnceCell;
use std::cell::RefCell;
use std::fmt;
use std::ops::Add;
use std::rc::Rc;

/// A lazily evaluated document, generic over the annotation type `A`.
///
/// `Doc`s are immutable and persistent: combinators build new trees from old
/// ones without mutation, and cloning is a reference-count bump. Each node is
/// forced at most once; the result is cached, so repeated layout queries over
/// shared subtrees never redo construction work.
///
/// Build `Doc`s with the combinators in this crate ([`crate::text`],
/// [`crate::line`], [`Doc::group`], ...), lay them out with
/// [`Doc::layout_pretty`] and friends, and render the result with the
/// [`crate::SimpleDoc`] renderers.
pub struct Doc<A> {
    cell: Rc<DocCell<A>>,
}

struct DocCell<A> {
    node: OnceCell<DocNode<A>>,
    thunk: RefCell<Option<Box<dyn FnOnce() -> DocNode<A>>>>,
}

/// One node of a [`Doc`] tree.
///
/// `Text` must not contain `'\n'`; multi-line strings are split into
/// `Text`/`Line` chains by [`crate::doc`]. `Fail` marks a branch with no
/// valid flattened rendering and must never survive into a render stream.
#[derive(Clone)]
pub enum DocNode<A> {
    /// The empty document.
    Nil,
    /// No valid rendering. Only legal inside the left branch of a `Union`.
    Fail,
    /// A hard line break, indented by the nesting level in effect.
    Line,
    /// Literal text, never containing a newline.
    Text(Rc<str>),
    /// Left: flattened rendering of the same content as the right; right:
    /// the fallback. Produced by [`Doc::group`].
    Union(Doc<A>, Doc<A>),
    /// Sequential concatenation.
    Combined(Doc<A>, Doc<A>),
    /// Adjust the indentation of `Line`s inside the child by the offset
    /// (which may be negative).
    Nest(i32, Doc<A>),
    /// Defer to the current output column.
    Column(DocFn<i32, A>),
    /// Defer to the current nesting level.
    Nesting(DocFn<i32, A>),
    /// Left when laid out normally, right when flattened.
    FlatAlt(Doc<A>, Doc<A>),
    /// Attach an annotation to a region.
    Annotated(A, Doc<A>),
    /// Defer to the active page-width policy.
    WithPageWidth(DocFn<PageWidth, A>),
}

impl<A> Doc<A> {
    pub(crate) fn now(node: DocNode<A>) -> Doc<A> {
        Doc {
            cell: Rc::new(DocCell {
                node: OnceCell::with_value(node),
                thunk: RefCell::new(None),
            }),
        }
    }

    pub(crate) fn defer(thunk: impl FnOnce() -> DocNode<A> + 'static) -> Doc<A> {
        Doc {
            cell: Rc::new(DocCell {
                node: OnceCell::new(),
                thunk: RefCell::new(Some(Box::new(thunk))),
            }),
        }
    }

    /// Force this document one level and return its node. The node is
    /// computed once and cached.
    pub fn node(&self) -> &DocNode<A> {
        self.cell.node.get_or_init(|| {
            let thunk = self.cell.thunk.borrow_mut().take();
            match thunk {
                Some(f) => f(),
                None => unreachable!("deferred doc node lost its thunk"),
            }
        })
    }
}

impl<A> Clone for Doc<A> {
    fn clone(&self) -> Doc<A> {
        Doc {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<A> From<DocNode<A>> for Doc<A> {
    fn from(node: DocNode<A>) -> Doc<A> {
        Doc::now(node)
    }
}

impl<A> Add<Doc<A>> for Doc<A> {
    type Output = Doc<A>;

    /// Shorthand for `Combined`.
    fn add(self, other: Doc<A>) -> Doc<A> {
        Doc::now(DocNode::Combined(self, other))
    }
}

impl<A: fmt::Debug> fmt::Debug for Doc<A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use DocNode::*;

        match self.node() {
            Nil => write!(f, "Nil"),
            Fail => write!(f, "Fail"),
            Line => write!(f, "Line"),
            Text(s) => write!(f, "Text({:?})", s),
            Union(l, r) => f.debug_tuple("Union").field(l).field(r).finish(),
            Combined(l, r) => f.debug_tuple("Combined").field(l).field(r).finish(),
            Nest(i, d) => f.debug_tuple("Nest").field(i).field(d).finish(),
            Column(_) => write!(f, "Column(<fn>)"),
            Nesting(_) => write!(f, "Nesting(<fn>)"),
            FlatAlt(l, r) => f.debug_tuple("FlatAlt").field(l).field(r).finish(),
            Annotated(ann, d) => f.debug_tuple("Annotated").field(ann).field(d).finish(),
            WithPageWidth(_) => write!(f, "WithPageWidth(<fn>)"),
        }
    }
}

/// A deferred `I -> Doc<A>` child, used by the `Column`, `Nesting`, and
/// `WithPageWidth` nodes.
///
/// Results are memoized per distinct argument, so probing the same column
/// repeatedly during layout runs the underlying closure once. The cache is a
/// small linear-scan vector: a node is only ever queried at a handful of
/// distinct positions, and `PageWidth` has no hash.
pub struct DocFn<I, A> {
    inner: Rc<DocFnInner<I, A>>,
}

struct DocFnInner<I, A> {
    f: Box<dyn Fn(I) -> Doc<A>>,
    cache: RefCell<Vec<(I, Doc<A>)>>,
}

impl<I: Clone + PartialEq, A> DocFn<I, A> {
    pub fn new(f: impl Fn(I) -> Doc<A> + 'static) -> DocFn<I, A> {
        DocFn {
            inner: Rc::new(DocFnInner {
                f: Box::new(f),
                cache: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn apply(&self, input: I) -> Doc<A> {
        if let Some((_, doc)) = self
            .inner
            .cache
            .borrow()
            .iter()
            .find(|(key, _)| *key == input)
        {
            return doc.clone();
        }
        let doc = (self.inner.f)(input.clone());
        self.inner.cache.borrow_mut().push((input, doc.clone()));
        doc
    }
}

impl<I: Clone + PartialEq + 'static, A: 'static> DocFn<I, A> {
    /// Compose a document transform behind the closure, preserving laziness.
    pub(crate) fn and_then<B>(&self, g: impl Fn(Doc<A>) -> Doc<B> + 'static) -> DocFn<I, B> {
        let this = self.clone();
        DocFn::new(move |input| g(this.apply(input)))
    }
}

impl<I, A> Clone for DocFn<I, A> {
    fn clone(&self) -> DocFn<I, A> {
        DocFn {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// How far [`Doc::fuse`] reaches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FusionDepth {
    /// Fuse the plain tree but leave deferred (`Column`/`Nesting`/
    /// `WithPageWidth`) children untouched.
    Shallow,
    /// Also fuse behind deferred children once they are produced.
    Deep,
}

enum FuseTask<A> {
    Enter(Doc<A>),
    Nest(i32),
    Annotated(A),
    FlatAlt,
    Union,
    Combined,
}

impl<A: Clone + 'static> Doc<A> {
    /// Merge adjacent `Text` nodes and drop `Nil`s and zero `Nest`s. The
    /// fused document renders identically to the original under every page
    /// width; fusing is purely a speedup for documents assembled from many
    /// small fragments.
    pub fn fuse(&self, depth: FusionDepth) -> Doc<A> {
        use DocNode::*;

        let mut tasks = vec![FuseTask::Enter(self.clone())];
        let mut results: Vec<Doc<A>> = Vec::new();
        while let Some(task) = tasks.pop() {
            match task {
                FuseTask::Enter(doc) => match doc.node() {
                    Combined(l, r) => {
                        tasks.push(FuseTask::Combined);
                        tasks.push(FuseTask::Enter(r.clone()));
                        tasks.push(FuseTask::Enter(l.clone()));
                    }
                    Nest(i, d) => {
                        tasks.push(FuseTask::Nest(*i));
                        tasks.push(FuseTask::Enter(d.clone()));
                    }
                    Annotated(ann, d) => {
                        tasks.push(FuseTask::Annotated(ann.clone()));
                        tasks.push(FuseTask::Enter(d.clone()));
                    }
                    FlatAlt(l, r) => {
                        tasks.push(FuseTask::FlatAlt);
                        tasks.push(FuseTask::Enter(r.clone()));
                        tasks.push(FuseTask::Enter(l.clone()));
                    }
                    Union(l, r) => {
                        tasks.push(FuseTask::Union);
                        tasks.push(FuseTask::Enter(r.clone()));
                        tasks.push(FuseTask::Enter(l.clone()));
                    }
                    Column(f) => results.push(match depth {
                        FusionDepth::Shallow => doc.clone(),
                        FusionDepth::Deep => {
                            Doc::now(Column(f.and_then(|d| d.fuse(FusionDepth::Deep))))
                        }
                    }),
                    Nesting(f) => results.push(match depth {
                        FusionDepth::Shallow => doc.clone(),
                        FusionDepth::Deep => {
                            Doc::now(Nesting(f.and_then(|d| d.fuse(FusionDepth::Deep))))
                        }
                    }),
                    WithPageWidth(f) => results.push(match depth {
                        FusionDepth::Shallow => doc.clone(),
                        FusionDepth::Deep => {
                            Doc::now(WithPageWidth(f.and_then(|d| d.fuse(FusionDepth::Deep))))
                        }
                    }),
                    Nil | Fail | Line | Text(_) => results.push(doc.clone()),
                },
                FuseTask::Nest(i) => {
                    let child = pop_result(&mut results);
                    if i == 0 {
                        results.push(child);
                    } else {
                        let collapsed = match child.node() {
                            Nest(j, inner) => Doc::now(Nest(i + j, inner.clone())),
                            _ => Doc::now(Nest(i, child.clone())),
                        };
                        results.push(collapsed);
                    }
                }
                FuseTask::Annotated(ann) => {
                    let child = pop_result(&mut results);
                    results.push(Doc::now(Annotated(ann, child)));
                }
                FuseTask::FlatAlt => {
                    let r = pop_result(&mut results);
                    let l = pop_result(&mut results);
                    results.push(Doc::now(FlatAlt(l, r)));
                }
                FuseTask::Union => {
                    let r = pop_result(&mut results);
                    let l = pop_result(&mut results);
                    results.push(Doc::now(Union(l, r)));
                }
                FuseTask::Combined => {
                    let r = pop_result(&mut results);
                    let l = pop_result(&mut results);
                    let merged = match (l.node(), r.node()) {
                        (Text(a), Text(b)) => Some(Doc::now(Text(format!("{}{}", a, b).into()))),
                        (Nil, _) => Some(r.clone()),
                        (_, Nil) => Some(l.clone()),
                        _ => None,
                    };
                    results.push(merged.unwrap_or_else(|| Doc::now(Combined(l, r))));
                }
            }
        }
        pop_result(&mut results)
    }

    /// Transform every annotation in the document.
    pub fn re_annotate<B: Clone + 'static>(&self, f: impl Fn(&A) -> B + 'static) -> Doc<B> {
        map_annotations(self, Rc::new(f))
    }

    /// Replace each annotation with zero or more annotations. Replacing with
    /// none removes the region boundary entirely, which is how
    /// [`Doc::un_annotate`] strips a document.
    pub fn alter_annotations<B: Clone + 'static>(
        &self,
        f: impl Fn(&A) -> Vec<B> + 'static,
    ) -> Doc<B> {
        alter_annotations_shared(self, Rc::new(f))
    }

    /// Remove every annotation.
    pub fn un_annotate<B: Clone + 'static>(&self) -> Doc<B> {
        self.alter_annotations(|_| Vec::new())
    }
}

fn pop_result<A>(results: &mut Vec<Doc<A>>) -> Doc<A> {
    match results.pop() {
        Some(doc) => doc,
        None => unreachable!("fuse result stack underflow"),
    }
}

fn map_annotations<A: Clone + 'static, B: Clone + 'static>(
    doc: &Doc<A>,
    f: Rc<dyn Fn(&A) -> B>,
) -> Doc<B> {
    use DocNode::*;

    let doc = doc.clone();
    Doc::defer(move || match doc.node() {
        Nil => Nil,
        Fail => Fail,
        Line => Line,
        Text(s) => Text(s.clone()),
        Union(l, r) => Union(map_annotations(l, f.clone()), map_annotations(r, f.clone())),
        Combined(l, r) => Combined(map_annotations(l, f.clone()), map_annotations(r, f.clone())),
        Nest(i, d) => Nest(*i, map_annotations(d, f)),
        Column(g) => Column(g.and_then(move |d| map_annotations(&d, f.clone()))),
        Nesting(g) => Nesting(g.and_then(move |d| map_annotations(&d, f.clone()))),
        FlatAlt(l, r) => FlatAlt(map_annotations(l, f.clone()), map_annotations(r, f.clone())),
        Annotated(ann, d) => Annotated(f(ann), map_annotations(d, f.clone())),
        WithPageWidth(g) => WithPageWidth(g.and_then(move |d| map_annotations(&d, f.clone()))),
    })
}

fn alter_annotations_shared<A: Clone + 'static, B: Clone + 'static>(
    doc: &Doc<A>,
    f: Rc<dyn Fn(&A) -> Vec<B>>,
) -> Doc<B> {
    use DocNode::*;

    let doc = doc.clone();
    Doc::defer(move || match doc.node() {
        Nil => Nil,
        Fail => Fail,
        Line => Line,
        Text(s) => Text(s.clone()),
        Union(l, r) => Union(
            alter_annotations_shared(l, f.clone()),
            alter_annotations_shared(r, f.clone()),
        ),
        Combined(l, r) => Combined(
            alter_annotations_shared(l, f.clone()),
            alter_annotations_shared(r, f.clone()),
        ),
        Nest(i, d) => Nest(*i, alter_annotations_shared(d, f)),
        Column(g) => Column(g.and_then(move |d| alter_annotations_shared(&d, f.clone()))),
        Nesting(g) => Nesting(g.and_then(move |d| alter_annotations_shared(&d, f.clone()))),
        FlatAlt(l, r) => FlatAlt(
            alter_annotations_shared(l, f.clone()),
            alter_annotations_shared(r, f.clone()),
        ),
        Annotated(ann, d) => {
            let mut replaced = alter_annotations_shared(d, f.clone());
            for ann in f(ann) {
                replaced = Doc::now(Annotated(ann, replaced));
            }
            replaced.node().clone()
        }
        WithPageWidth(g) => {
            WithPageWidth(g.and_then(move |d| alter_annotations_shared(&d, f.clone())))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::text;
    use std::cell::Cell;

    #[test]
    fn doc_fn_memoizes_per_argument() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let f: DocFn<i32, ()> = DocFn::new(move |i: i32| {
            counter.set(counter.get() + 1);
            text(i.to_string())
        });
        f.apply(3);
        f.apply(3);
        f.apply(4);
        f.apply(3);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn thunks_force_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let doc: Doc<()> = Doc::defer(move || {
            counter.set(counter.get() + 1);
            DocNode::Nil
        });
        assert!(matches!(doc.node(), DocNode::Nil));
        assert!(matches!(doc.node(), DocNode::Nil));
        assert_eq!(calls.get(), 1);
    }
}
