//! ANSI style merging, SGR serialization, and scope restoration.

use wl_pretty::{
    bg_color, bg_color_dull, bold, color, color_dull, italicized, text, underlined, AnsiStyle,
    Color, Doc, Intensity, PageWidth, RenderError, SimpleDoc, SimpleDocEvent,
};

fn render(doc: &Doc<AnsiStyle>) -> String {
    doc.layout_pretty(PageWidth::default())
        .render_ansi_string()
        .unwrap()
}

#[test]
fn sgr_codes() {
    assert_eq!(AnsiStyle::empty().to_raw_string(), "\x1b[0m");
    assert_eq!(color(Color::Red).to_raw_string(), "\x1b[0;91m");
    assert_eq!(color_dull(Color::Red).to_raw_string(), "\x1b[0;31m");
    assert_eq!(bg_color(Color::Blue).to_raw_string(), "\x1b[0;104m");
    assert_eq!(bg_color_dull(Color::Blue).to_raw_string(), "\x1b[0;44m");
    assert_eq!(bold().to_raw_string(), "\x1b[0;1m");
    assert_eq!(underlined().to_raw_string(), "\x1b[0;4m");
    assert_eq!(italicized().to_raw_string(), "\x1b[0;3m");
    assert_eq!(
        (color(Color::Green) + bold()).to_raw_string(),
        "\x1b[0;92;1m"
    );
}

#[test]
fn combine_is_left_biased() {
    let merged = color(Color::Red) + color(Color::Green);
    assert_eq!(merged.foreground, Some((Intensity::Vivid, Color::Red)));

    let filled = (bold() + color(Color::Red)).combine(bg_color(Color::Blue));
    assert_eq!(filled.foreground, Some((Intensity::Vivid, Color::Red)));
    assert_eq!(filled.background, Some((Intensity::Vivid, Color::Blue)));
    assert!(filled.bold);

    assert_eq!(AnsiStyle::empty() + bold(), bold());
    assert_eq!(bold() + AnsiStyle::empty(), bold());
}

#[test]
fn nested_scopes_merge_and_restore() {
    let d: Doc<AnsiStyle> = text("start ")
        + (text("outer ") + text("inner").annotate(bold() + color(Color::Red)) + text(" after"))
            .annotate(bg_color(Color::Blue));
    assert_eq!(
        render(&d),
        "start \x1b[0;104mouter \x1b[0;91;104;1minner\x1b[0;104m after\x1b[0m"
    );
}

#[test]
fn inner_facets_win_over_outer() {
    let d: Doc<AnsiStyle> =
        text("a").annotate(color(Color::Green)).annotate(color(Color::Red));
    // Outer red, inner green: the inner annotation is met second and wins
    // the foreground while it is open.
    assert_eq!(render(&d), "\x1b[0;91m\x1b[0;92ma\x1b[0;91m\x1b[0m");
}

#[test]
fn underflow_is_reported() {
    let unbalanced: SimpleDoc<AnsiStyle> = SimpleDoc::new(vec![SimpleDocEvent::RemoveAnnotation]);
    assert_eq!(
        unbalanced.render_ansi_string().unwrap_err(),
        RenderError::AnnotationStackUnderflow
    );
}
