//! Edge case tests for stategroups-html

use stategroups_html::{HtmlParser, parse};

#[test]
fn test_empty_input_still_has_body() {
    let doc = parse("").unwrap();
    assert!(doc.body().is_valid());
    assert_eq!(doc.tree().children(doc.body()).count(), 0);
}

#[test]
fn test_json_options_survive_parsing() {
    let html = r#"<div id="g" data-state-options='{"role":"group","groupId":"g1"}'></div>"#;
    let doc = parse(html).unwrap();
    let node = doc.get_element_by_id("g").unwrap();
    assert_eq!(
        doc.tree().get_attribute(node, "data-state-options"),
        Some(r#"{"role":"group","groupId":"g1"}"#)
    );
}

#[test]
fn test_nesting_preserved() {
    let html = r#"<form id="f"><fieldset id="s"><button id="b">Go</button></fieldset></form>"#;
    let doc = parse(html).unwrap();
    let form = doc.get_element_by_id("f").unwrap();
    let button = doc.get_element_by_id("b").unwrap();
    let fieldset = doc.get_element_by_id("s").unwrap();

    let ancestors: Vec<_> = doc.tree().ancestors(button).take(2).collect();
    assert_eq!(ancestors, vec![fieldset, form]);
}

#[test]
fn test_unclosed_tags_recovered() {
    let doc = parse("<div id='a'><span id='b'>text").unwrap();
    let a = doc.get_element_by_id("a").unwrap();
    let b = doc.get_element_by_id("b").unwrap();
    assert_eq!(doc.tree().parent(b), Some(a));
}

#[test]
fn test_url_recorded() {
    let doc = HtmlParser::new()
        .parse_with_url("<p>x</p>", "https://example.com/")
        .unwrap();
    assert_eq!(doc.url(), "https://example.com/");
}
