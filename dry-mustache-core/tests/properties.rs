use dry_mustache_core::Template;
use proptest::prelude::*;
use serde_json::json;

// Text that never opens a tag
fn plain_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?:;\n\t{}<>&\"']{0,80}".prop_filter("no open delimiter", |s| !s.contains("{{"))
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn literal_passthrough(text in plain_text()) {
        let template = Template::parse(&text).unwrap();
        prop_assert_eq!(template.render(&json!({"any": "thing"})), text);
    }

    #[test]
    fn escaped_output_has_no_markup(text in plain_text()) {
        let out = Template::parse("{{v}}").unwrap().render(&json!({"v": text.clone()}));
        prop_assert!(!out.contains('<') && !out.contains('>') && !out.contains('"'));
        prop_assert_eq!(unescape(&out), text);
    }

    #[test]
    fn raw_output_is_verbatim(text in plain_text()) {
        let out = Template::parse("{{{v}}}").unwrap().render(&json!({"v": text.clone()}));
        prop_assert_eq!(out, text);
    }

    #[test]
    fn sections_repeat_per_item(items in prop::collection::vec("[a-z]{1,5}", 0..8)) {
        let out = Template::parse("{{#items}}{{.}};{{/items}}").unwrap().render(&json!({"items": items.clone()}));
        prop_assert_eq!(out, items.iter().map(|item| format!("{};", item)).collect::<String>());
    }
}
