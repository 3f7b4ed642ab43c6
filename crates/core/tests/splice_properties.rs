use hide_hooks_core::locate::locate;
use hide_hooks_core::splice::{apply, plan, SpliceKind};
use hide_hooks_core::{patch_text, PatchConfig};

fn config() -> PatchConfig {
    PatchConfig::default().with_marker("' hook succeeded: '")
}

#[test]
fn return_with_semicolon_collapses_to_bare_return() {
    let text = b"x(); return createElement(' hook succeeded: ', a, b);";
    let patched = patch_text(text, &config()).unwrap();
    assert_eq!(patched.splice.kind, SpliceKind::ReturnConsumingSemicolon);
    assert_eq!(patched.contents, b"x(); return;");
}

#[test]
fn wrapped_call_keeps_outer_closing_paren() {
    // The closest call is `createElement(...)`; the `)` after it belongs to
    // `wrap(`, so the semicolon is not adjacent and is left alone.
    let text = b"x(); return wrap(createElement(' hook succeeded: ', a, b));";
    let patched = patch_text(text, &config()).unwrap();
    assert_eq!(patched.splice.kind, SpliceKind::Return);
    assert_eq!(patched.contents, b"x(); return;);");
}

#[test]
fn return_without_semicolon_gets_one() {
    let text = b"if(ok) return createElement(' hook succeeded: ')\n}";
    let patched = patch_text(text, &config()).unwrap();
    assert_eq!(patched.splice.kind, SpliceKind::Return);
    assert_eq!(patched.contents, b"if(ok) return;\n}");
}

#[test]
fn no_return_in_window_becomes_null() {
    let padding = "a".repeat(120);
    let input = format!("return 0;{padding} x = [createElement(' hook succeeded: ', n)];");
    let patched = patch_text(input.as_bytes(), &config()).unwrap();
    assert_eq!(patched.splice.kind, SpliceKind::Null);
    assert_eq!(patched.located.return_start, None);
    let expected = format!("return 0;{padding} x = [null];");
    assert_eq!(patched.contents, expected.as_bytes());
}

#[test]
fn bytes_outside_splice_are_untouched() {
    let mut text = b"\xff\xfe binary header; ".to_vec();
    text.extend_from_slice(b"function h(){return createElement(Text,' hook succeeded: ',(n));}");
    text.extend_from_slice(b" trailing \x00\x01 bytes");

    let loc = locate(&text, "' hook succeeded: '", "createElement", 100).unwrap();
    let splice = plan(&text, &loc);
    let out = apply(&text, &splice);
    let replacement = splice.replacement().as_bytes();

    assert_eq!(&out[..splice.range.start], &text[..splice.range.start]);
    assert_eq!(
        &out[splice.range.start..splice.range.start + replacement.len()],
        replacement
    );
    assert_eq!(&out[splice.range.start + replacement.len()..], &text[splice.range.end..]);
}

#[test]
fn duplicate_marker_outside_call_survives() {
    let text = b"log(' hook succeeded: '); return createElement(' hook succeeded: ');";
    let patched = patch_text(text, &config()).unwrap_err();
    // The first marker sits in `log(`, which is not a createElement call.
    assert!(patched.to_string().contains("createElement("));

    let text = b"return createElement(' hook succeeded: '); log(' hook succeeded: ');";
    let patched = patch_text(text, &config()).unwrap();
    assert_eq!(patched.contents, b"return; log(' hook succeeded: ');");
}
