//! Concrete layout scenarios with exact expected output.

use wl_pretty::{
    doc, hard_line, hcat, line, list, nil, punctuate, soft_line, text, Doc, PageWidth,
    SimpleDocEvent,
};

#[track_caller]
fn assert_pp(doc: &Doc<()>, max_width: i32, ribbon_fraction: f32, expected_lines: &[&str]) {
    let expected = expected_lines.join("\n");
    let actual = doc.pretty_with(max_width, ribbon_fraction);
    if actual != expected {
        eprintln!("EXPECTED:\n{}\nACTUAL:\n{}", expected, actual);
        assert_eq!(actual, expected);
    }
}

#[test]
fn haskell_like_type_signature() {
    let ty = vec![doc("Int"), doc("Int"), doc("IO Int")];
    let arrows = hcat(punctuate(ty, &(soft_line() + text("-> "))));
    let d: Doc<()> = doc("fooBar").spaced(&text("::").spaced(&arrows).align());

    assert_pp(&d, 80, 0.4, &["fooBar :: Int -> Int -> IO Int"]);
    assert_pp(&d, 20, 0.4, &["fooBar :: Int", "       -> Int", "       -> IO Int"]);
}

#[test]
fn list_spills_one_element_per_line() {
    let items = vec!["Hello World", "100", "false", "Cool", "-1000"];
    let d: Doc<()> = list(items.into_iter().map(doc).collect());

    assert_pp(&d, 80, 1.0, &["[Hello World, 100, false, Cool, -1000]"]);
    assert_pp(
        &d,
        20,
        1.0,
        &["[ Hello World", ", 100", ", false", ", Cool", ", -1000", "]"],
    );
}

#[test]
fn empty_doc_renders_empty() {
    let d: Doc<()> = nil();
    for width in [0, 1, 20, 80] {
        assert_eq!(d.pretty_with(width, 0.4), "");
    }
    let under_unbounded = d.layout_pretty(PageWidth::Unbounded);
    assert_eq!(under_unbounded.render_string().unwrap(), "");
}

#[test]
fn grouped_hard_line_takes_the_broken_branch() {
    // No flat alternative exists, so the group must fall back without ever
    // leaking a Fail into the stream.
    let d: Doc<()> = (hard_line() + wl_pretty::line_break()).group();
    let stream = d.layout_pretty(PageWidth::default());
    assert!(!stream
        .events()
        .iter()
        .any(|event| matches!(event, SimpleDocEvent::Fail)));
    assert_eq!(stream.render_string().unwrap(), "\n\n");
}

#[test]
fn grouped_hard_line_under_unbounded_width() {
    let d: Doc<()> = hard_line::<()>().group();
    let stream = d.layout_pretty(PageWidth::Unbounded);
    assert_eq!(stream.render_string().unwrap(), "\n");

    let flat: Doc<()> = (text("a") + line() + text("b")).group();
    let stream = flat.layout_pretty(PageWidth::Unbounded);
    assert_eq!(stream.render_string().unwrap(), "a b");
}

#[test]
fn group_breaks_when_too_narrow() {
    let d: Doc<()> = (text("a") + line() + text("b")).group();
    assert_pp(&d, 80, 0.4, &["a b"]);
    assert_pp(&d, 1, 1.0, &["a", "b"]);
}

#[test]
fn group_is_idempotent() {
    let inner: Doc<()> = text("aaa") + line() + text("bbb") + line() + text("ccc");
    for width in [1, 5, 8, 80] {
        assert_eq!(
            inner.group().group().pretty_with(width, 1.0),
            inner.group().pretty_with(width, 1.0),
        );
    }
}

#[test]
fn ribbon_fraction_bounds_line_use() {
    let d: Doc<()> = text("prefix") + (line::<()>() + text("suffix")).group();
    assert_pp(&d, 40, 1.0, &["prefix suffix"]);
    // The line would fit, but the ribbon (10 columns from the line start)
    // is already spent.
    assert_pp(&d, 40, 0.25, &["prefix", "suffix"]);
}

#[test]
fn align_sets_baseline_to_current_column() {
    let d: Doc<()> = text("hello") + (text("world") + hard_line() + text("again")).align();
    assert_pp(&d, 80, 0.4, &["helloworld", "     again"]);
}

#[test]
fn indent_pads_first_line_and_hangs() {
    let body: Doc<()> = text("cd") + hard_line() + text("ef");
    let d = text("ab") + body.indent(2);
    assert_pp(&d, 80, 0.4, &["ab  cd", "    ef"]);
}

#[test]
fn nest_applies_to_inner_lines_only() {
    let d: Doc<()> = text("start") + (hard_line::<()>() + text("deep")).nest(4) + hard_line() + text("end");
    assert_pp(&d, 80, 0.4, &["start", "    deep", "end"]);
}

#[test]
fn negative_nesting_clamps_at_zero() {
    let d: Doc<()> = text("a") + (hard_line::<()>() + text("b")).nest(-3);
    assert_pp(&d, 80, 0.4, &["a", "b"]);
}

#[test]
fn smart_layout_looks_past_deeper_lines() {
    let pw = PageWidth::available(10, 1.0);
    let grouped: Doc<()> = (text("aa") + line() + text("bb")).group();
    let deep: Doc<()> = (grouped.clone() + hard_line() + text("cccccccc")).nest(4);

    // Plain fits stops at the group's own first line.
    assert_eq!(
        deep.layout_pretty(pw).render_string().unwrap(),
        "aa bb\n    cccccccc"
    );
    // Smart fits keeps scanning because the following line is nested deeper
    // than the choice point, sees the overflow, and breaks the group.
    assert_eq!(
        deep.layout_smart(pw).render_string().unwrap(),
        "aa\n    bb\n    cccccccc"
    );
    // A following line at the choice point's own nesting level ends the
    // smart scan instead.
    let shallow: Doc<()> = grouped + hard_line() + text("cccccccc");
    assert_eq!(
        shallow.layout_smart(pw).render_string().unwrap(),
        "aa bb\ncccccccc"
    );
}

#[test]
fn compact_layout_ignores_groups_and_indent() {
    let d: Doc<()> = (text("a") + line() + text("b")).group().nest(4);
    assert_eq!(d.layout_compact().render_string().unwrap(), "a\nb");
}

#[test]
fn doc_splits_embedded_newlines() {
    let d: Doc<()> = doc("one\ntwo\nthree");
    // Hard lines survive any width.
    assert_pp(&d, 3, 1.0, &["one", "two", "three"]);
    assert_pp(&d, 80, 1.0, &["one", "two", "three"]);
    assert_eq!(doc::<()>("").pretty(), "");
}

#[test]
fn reflow_wraps_words() {
    let d: Doc<()> = wl_pretty::reflow("the quick brown fox jumps");
    assert_pp(&d, 10, 1.0, &["the quick", "brown fox", "jumps"]);
    assert_pp(&d, 80, 1.0, &["the quick brown fox jumps"]);
}

#[test]
fn fill_pads_to_width() {
    let sig = |name: &str, ty: &str| -> Doc<()> {
        text(name.to_owned()).fill(7).spaced(&text("::")).spaced(&doc(ty))
    };
    let defs = vec![
        sig("nil", "Doc"),
        sig("nest", "Int -> Doc -> Doc"),
        sig("fillSep", "[Doc] -> Doc"),
    ];
    let d: Doc<()> = text("let ") + wl_pretty::vcat(defs).align();
    assert_pp(
        &d,
        80,
        0.4,
        &[
            "let nil     :: Doc",
            "    nest    :: Int -> Doc -> Doc",
            "    fillSep :: [Doc] -> Doc",
        ],
    );
}

#[test]
fn fill_break_breaks_overwide_entries() {
    let sig = |name: &str, ty: &str| -> Doc<()> {
        text(name.to_owned())
            .fill_break(5)
            .spaced(&text("::"))
            .spaced(&doc(ty))
    };
    let defs = vec![sig("nest", "Int -> Doc -> Doc"), sig("fillSep", "[Doc] -> Doc")];
    let d: Doc<()> = text("let ") + wl_pretty::vcat(defs).align();
    assert_pp(
        &d,
        80,
        0.4,
        &[
            "let nest  :: Int -> Doc -> Doc",
            "    fillSep",
            "          :: [Doc] -> Doc",
        ],
    );
}

#[test]
fn width_reports_columns_consumed() {
    let bracketed = |d: &Doc<()>| {
        d.clone()
            .brackets()
            .width(|w| text(format!(" <- {} columns", w)))
    };
    let d = bracketed(&text("abc"));
    assert_pp(&d, 80, 0.4, &["[abc] <- 5 columns"]);
}

#[test]
fn pretty_default_is_eighty_columns() {
    let d: Doc<()> = wl_pretty::sep(vec![text("aaaa"); 10]);
    assert_eq!(d.pretty(), d.pretty_with(80, 0.4));
}
