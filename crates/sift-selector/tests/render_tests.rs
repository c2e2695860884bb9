//! Integration tests for canonical rendering and JSON output.

use sift_selector::{parse_selector, parse_selector_group, render, render_group};

fn canonical(input: &str) -> String {
    render(&parse_selector(input).unwrap_or_else(|err| panic!("{input:?}: {err}")))
}

#[test]
fn test_canonical_forms() {
    let cases = [
        (".kl", "*.kl"),
        ("#idi", "*#idi"),
        ("*", "*"),
        ("div", "div"),
        ("div b", "div b"),
        ("  div   b  ", "div b"),
        ("a>b", "a > b"),
        ("a+b~c", "a + b ~ c"),
        ("div[a1='123']", "div[a1='123']"),
        ("div[ a1 = \"123\" ]", "div[a1=\"123\"]"),
        ("div[a1=123]", "div[a1=123]"),
        ("a[href^='http']", "a[href^='http']"),
        ("li:nth-child(odd)", "li:nth-child(2n+1)"),
        ("li:nth-child( -n + 6 )", "li:nth-child(-n+6)"),
        ("li:nth-child(0n+5)", "li:nth-child(5)"),
        ("li:NTH-CHILD(even)", "li:nth-child(2n)"),
        ("foo::image", "foo:image"),
        ("input:not(':checked')", "input:not(*:checked)"),
        ("div.k1.k2 > b#xo:not(:checked)", "div.k1.k2 > b#xo:not(*:checked)"),
        ("x:has(a > b, c)", "x:has(a > b, c)"),
        ("tr:eq( 3 )", "tr:eq(3)"),
        ("p:contains('hello')", "p:contains('hello')"),
        ("p:contains( hello )", "p:contains( hello )"),
        ("p:contains(\"a (b)\")", "p:contains(\"a (b)\")"),
        (r"itunes\:image", r"itunes\:image"),
        (r"itunes\:image#foo\:bar", r"itunes\:image#foo\:bar"),
    ];
    for (input, expected) in cases {
        assert_eq!(canonical(input), expected, "{input:?}");
    }
}

#[test]
fn test_round_trip_is_stable() {
    let inputs = [
        ".kl",
        "div b",
        "html > body div.main + p ~ a:first-child",
        "div[a1='123'][b~=\"x y\"][c|=en][d]",
        "a[title='it\\'s']",
        "li:nth-child( +3n - 2 ):nth-last-of-type(n)",
        "input:not(':checked'):not(.x, #y > z)",
        "section:has(h1:contains('a (b) c'))",
        "p:contains( padded )",
        r#"p:contains("x\"y\'")"#,
        r"p:contains('a\\'),p:contains('\'\\\'')",
        "tr:gt(-1):lt(5):eq(0)",
        r"a\ b.c\.d#e\#f",
        "ul li:even, ol > li:odd",
        "x:not(:not(:not(.deep)))",
    ];
    for input in inputs {
        let group = parse_selector_group(input).unwrap();
        let rendered = render_group(&group);
        let reparsed = parse_selector_group(&rendered)
            .unwrap_or_else(|err| panic!("{rendered:?} (from {input:?}) failed: {err}"));
        assert_eq!(reparsed, group, "{input:?} rendered as {rendered:?}");
        assert_eq!(render_group(&reparsed), rendered);
    }
}

#[test]
fn test_group_rendering() {
    let group = parse_selector_group("a ,b>c,   d").unwrap();
    assert_eq!(render_group(&group), "a, b > c, d");
    assert_eq!(group.to_string(), "a, b > c, d");
}

#[test]
fn test_display_matches_render() {
    let list = parse_selector("div > p.x").unwrap();
    assert_eq!(list.to_string(), render(&list));
    assert_eq!(list[1].to_string(), "p.x");
}

#[test]
fn test_json_dump() {
    let list = parse_selector("div > a[href^='http']:nth-child(2n+1)").unwrap();
    let json = serde_json::to_value(&list).unwrap();

    assert_eq!(json[0]["element"], "div");
    assert_eq!(json[0]["combinator"], "child");
    assert_eq!(json[0]["next"], 1);
    assert_eq!(json[1]["prev"], 0);
    assert!(json[1]["combinator"].is_null());

    let attribute = &json[1]["simple_selectors"][0];
    assert_eq!(attribute["type"], "attribute");
    assert_eq!(attribute["value"]["name"], "href");
    assert_eq!(attribute["value"]["condition"]["operator"], "^=");
    assert_eq!(attribute["value"]["condition"]["quote"], "'");

    let nth = &json[1]["simple_selectors"][1];
    assert_eq!(nth["type"], "pseudo-function");
    assert_eq!(nth["value"]["function"], "nth-child");
    assert_eq!(nth["value"]["expression"]["type"], "an-b");
    assert_eq!(nth["value"]["expression"]["value"]["a"], 2);
    assert_eq!(nth["value"]["expression"]["value"]["b"], 1);
}

#[test]
fn test_error_json() {
    let err = parse_selector("div:bogus").unwrap_err();
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["kind"], "unknown-pseudo-class");
    assert_eq!(json["position"], 4);
}
