//! Flattening: collapsing the line breaks of a sub-document into their
//! same-line equivalents. [`Doc::group`] uses this to build the left branch
//! of a `Union`, and skips the `Union` entirely when flattening would not
//! change anything.

use crate::doc::{Doc, DocNode};

enum Step<A> {
    Become(Doc<A>),
    Done(DocNode<A>),
}

/// Lazily flatten a document: `FlatAlt` picks its flat branch, `Union` its
/// left branch, and a hard `Line` becomes `Fail` (there is no flat rendering
/// of an unconditional break). Each node is rewritten on demand, so building
/// the flat alternative of a large group costs nothing until layout actually
/// probes it.
pub(crate) fn flatten<A: Clone + 'static>(doc: &Doc<A>) -> Doc<A> {
    use DocNode::*;

    let doc = doc.clone();
    Doc::defer(move || {
        let mut current = doc;
        loop {
            // FlatAlt and Union chains collapse into whichever branch
            // flattening selects; everything else rewrites one level.
            let step = match current.node() {
                FlatAlt(_, r) => Step::Become(r.clone()),
                Union(l, _) => Step::Become(l.clone()),
                Line => Step::Done(Fail),
                Nest(i, d) => Step::Done(Nest(*i, flatten(d))),
                Combined(l, r) => Step::Done(Combined(flatten(l), flatten(r))),
                Annotated(ann, d) => Step::Done(Annotated(ann.clone(), flatten(d))),
                Column(f) => Step::Done(Column(f.and_then(|d| flatten(&d)))),
                Nesting(f) => Step::Done(Nesting(f.and_then(|d| flatten(&d)))),
                WithPageWidth(f) => Step::Done(WithPageWidth(f.and_then(|d| flatten(&d)))),
                Nil => Step::Done(Nil),
                Fail => Step::Done(Fail),
                Text(s) => Step::Done(Text(s.clone())),
            };
            match step {
                Step::Become(next) => current = next,
                Step::Done(node) => return node,
            }
        }
    })
}

enum ChangeTask<A> {
    Enter(Doc<A>),
    Nest(i32),
    Annotated(A),
    Combined(Doc<A>, Doc<A>),
}

/// Decide whether flattening `doc` would change its rendering. `None` means
/// flattening is the identity; `Some(flat)` is the changed flat version
/// (which may contain `Fail` if the document cannot be flattened at all).
///
/// Explicit work stack: documents nest arbitrarily deep and this runs on
/// every `group` call.
pub(crate) fn changes_upon_flattening<A: Clone + 'static>(doc: &Doc<A>) -> Option<Doc<A>> {
    use DocNode::*;

    let mut tasks = vec![ChangeTask::Enter(doc.clone())];
    let mut results: Vec<Option<Doc<A>>> = Vec::new();
    while let Some(task) = tasks.pop() {
        match task {
            ChangeTask::Enter(doc) => match doc.node() {
                FlatAlt(_, r) => results.push(Some(flatten(r))),
                Line => results.push(Some(Doc::now(Fail))),
                Union(l, _) => results.push(Some(l.clone())),
                Column(f) => results.push(Some(Doc::now(Column(f.and_then(|d| flatten(&d)))))),
                Nesting(f) => results.push(Some(Doc::now(Nesting(f.and_then(|d| flatten(&d)))))),
                WithPageWidth(f) => {
                    results.push(Some(Doc::now(WithPageWidth(f.and_then(|d| flatten(&d))))))
                }
                Nest(i, d) => {
                    tasks.push(ChangeTask::Nest(*i));
                    tasks.push(ChangeTask::Enter(d.clone()));
                }
                Annotated(ann, d) => {
                    tasks.push(ChangeTask::Annotated(ann.clone()));
                    tasks.push(ChangeTask::Enter(d.clone()));
                }
                Combined(l, r) => {
                    tasks.push(ChangeTask::Combined(l.clone(), r.clone()));
                    tasks.push(ChangeTask::Enter(r.clone()));
                    tasks.push(ChangeTask::Enter(l.clone()));
                }
                Nil | Fail | Text(_) => results.push(None),
            },
            ChangeTask::Nest(i) => {
                let changed = pop_change(&mut results);
                results.push(changed.map(|d| Doc::now(Nest(i, d))));
            }
            ChangeTask::Annotated(ann) => {
                let changed = pop_change(&mut results);
                results.push(changed.map(|d| Doc::now(Annotated(ann, d))));
            }
            ChangeTask::Combined(orig_l, orig_r) => {
                let changed_r = pop_change(&mut results);
                let changed_l = pop_change(&mut results);
                let combined = match (changed_l, changed_r) {
                    (Some(l), Some(r)) => Some(Doc::now(Combined(l, r))),
                    (Some(l), None) => Some(Doc::now(Combined(l, orig_r))),
                    (None, Some(r)) => Some(Doc::now(Combined(orig_l, r))),
                    (None, None) => None,
                };
                results.push(combined);
            }
        }
    }
    pop_change(&mut results)
}

fn pop_change<A>(results: &mut Vec<Option<Doc<A>>>) -> Option<Doc<A>> {
    match results.pop() {
        Some(changed) => changed,
        None => unreachable!("flattening result stack underflow"),
    }
}
