//! Tests for urlencoded form handling.

use boardtest_netutils::form::{
    FormError, FormFields, decode_component, find_field, write_html_escaped,
};

#[test]
fn iterates_pairs_and_skips_empty_segments() {
    let fields: Vec<_> = FormFields::new("a=1&&b=&c").collect();
    assert_eq!(fields, vec![("a", "1"), ("b", ""), ("c", "")]);
}

#[test]
fn finds_first_matching_field() {
    let body = "iwcThingName=testThing&stringParam=abc&stringParam=zzz";
    assert_eq!(find_field(body, "stringParam"), Some("abc"));
    assert_eq!(find_field(body, "floatParam"), None);
}

#[test]
fn decodes_plus_and_percent_escapes() {
    let value: heapless::String<32> = decode_component("Hello+World%21%20%C3%A9").unwrap();
    assert_eq!(value.as_str(), "Hello World! é");
}

#[test]
fn reports_decoding_errors() {
    assert_eq!(decode_component::<8>("%4"), Err(FormError::InvalidEscape));
    assert_eq!(decode_component::<8>("%zz"), Err(FormError::InvalidEscape));
    assert_eq!(decode_component::<8>("%FF"), Err(FormError::InvalidUtf8));
    assert_eq!(decode_component::<3>("abcd"), Err(FormError::TooLong));
}

#[test]
fn escapes_html_special_characters() {
    let mut out = String::new();
    write_html_escaped(&mut out, r#"<a href="x">'&'</a>"#).unwrap();
    assert_eq!(out, "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
}
