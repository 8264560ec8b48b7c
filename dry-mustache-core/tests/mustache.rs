use dry_mustache_core::{Error, Template};
use serde_json::{json, Value};

fn render(template: &str, data: Value) -> String {
    Template::parse(template).unwrap().render(&data)
}

fn render_with_partials(template: &str, data: Value, partials: &[(&str, &str)]) -> String {
    let mut template = Template::parse(template).unwrap();
    for (name, src) in partials {
        template.add_partial(*name, src).unwrap();
    }
    template.render(&data)
}

fn malformed(template: &str) -> bool {
    matches!(Template::parse(template), Err(Error::MalformedTemplate { .. }))
}

mod interpolation {
    use super::*;

    #[test]
    fn no_tags_pass_through() {
        let text = "Hello from {Mustache}!\n}} and { and } stay put\n";
        assert_eq!(render(text, json!({"anything": 1})), text);
    }

    #[test]
    fn basic() {
        assert_eq!(render("Hello, {{subject}}!", json!({"subject": "world"})), "Hello, world!");
    }

    #[test]
    fn escaping() {
        let data = json!({"forbidden": "& \" < > '"});
        assert_eq!(render("{{forbidden}}", data.clone()), "&amp; &quot; &lt; &gt; '");
        assert_eq!(render("{{{forbidden}}}", data.clone()), "& \" < > '");
        assert_eq!(render("{{&forbidden}}", data), "& \" < > '");
    }

    #[test]
    fn bold_round_trip() {
        let data = json!({"key": "<b>"});
        assert_eq!(render("{{key}}", data.clone()), "&lt;b&gt;");
        assert_eq!(render("{{{key}}}", data), "<b>");
    }

    #[test]
    fn numbers_and_booleans() {
        assert_eq!(render("{{mph}} miles an hour!", json!({"mph": 85})), "85 miles an hour!");
        assert_eq!(render("{{power}} jiggawatts!", json!({"power": 1.21})), "1.21 jiggawatts!");
        assert_eq!(render("{{yes}}/{{no}}", json!({"yes": true, "no": false})), "true/false");
    }

    #[test]
    fn null_and_missing() {
        assert_eq!(render("I ({{cannot}}) be seen!", json!({"cannot": null})), "I () be seen!");
        assert_eq!(render("I ({{cannot}}) be seen!", json!({})), "I () be seen!");
    }

    #[test]
    fn dotted_names() {
        let data = json!({"person": {"name": "Joe"}, "a": {"b": {"c": {"d": {"e": {"name": "Phil"}}}}}});
        assert_eq!(render("\"{{person.name}}\"", data.clone()), "\"Joe\"");
        assert_eq!(render("\"{{{person.name}}}\"", data.clone()), "\"Joe\"");
        assert_eq!(render("\"{{a.b.c.d.e.name}}\"", data), "\"Phil\"");
    }

    #[test]
    fn dotted_names_short_circuit() {
        let data = json!({"a": {"x": 1}, "b": {"c": "ERROR"}});
        assert_eq!(render("\"{{a.b.c}}\"", data), "\"\"");
    }

    #[test]
    fn dotted_names_do_not_fall_back_to_outer_contexts() {
        let data = json!({"a": {"b": {}}, "b": {"c": "ERROR"}});
        assert_eq!(render("{{#a}}{{b.c}}{{/a}}", data), "");
    }

    #[test]
    fn initial_resolution_walks_outward() {
        let data = json!({"outer": "out", "inner": {"value": "in"}});
        assert_eq!(render("{{#inner}}{{value}}/{{outer}}{{/inner}}", data), "in/out");
    }

    #[test]
    fn interpolation_is_never_standalone() {
        assert_eq!(render("  {{string}}\n", json!({"string": "---"})), "  ---\n");
        assert_eq!(render("  {{{string}}}\n", json!({"string": "---"})), "  ---\n");
    }

    #[test]
    fn whitespace_padding() {
        let data = json!({"string": "---"});
        assert_eq!(render("|{{ string }}|", data.clone()), "|---|");
        assert_eq!(render("|{{{ string }}}|", data.clone()), "|---|");
        assert_eq!(render("|{{& string }}|", data), "|---|");
    }

    #[test]
    fn unterminated_tag() {
        assert!(malformed("Hello {{name"));
        assert!(malformed("Hello {{{name}}"));
    }
}

mod sections {
    use super::*;

    #[test]
    fn truthy_and_falsy() {
        let template = "\"{{#boolean}}This should be rendered.{{/boolean}}\"";
        assert_eq!(render(template, json!({"boolean": true})), "\"This should be rendered.\"");
        assert_eq!(render(template, json!({"boolean": false})), "\"\"");
        assert_eq!(render(template, json!({})), "\"\"");
        assert_eq!(render(template, json!({"boolean": null})), "\"\"");
        assert_eq!(render(template, json!({"boolean": ""})), "\"\"");
    }

    #[test]
    fn empty_and_non_empty_lists() {
        assert_eq!(render("{{#a}}X{{/a}}", json!({"a": []})), "");
        assert_eq!(render("{{#a}}{{.}},{{/a}}", json!({"a": [1, 2]})), "1,2,");
        assert_eq!(render("\"{{#list}}{{item}}{{/list}}\"", json!({"list": [{"item": 1}, {"item": 2}, {"item": 3}]})), "\"123\"");
    }

    #[test]
    fn mapping_context() {
        assert_eq!(render("\"{{#context}}Hi {{name}}.{{/context}}\"", json!({"context": {"name": "Joe"}})), "\"Hi Joe.\"");
    }

    #[test]
    fn truthy_scalar_keeps_the_outer_context() {
        assert_eq!(render("{{#flag}}{{name}}{{/flag}}", json!({"flag": "yes", "name": "n"})), "n");
        assert_eq!(render("{{#count}}{{name}}{{/count}}", json!({"count": 3, "name": "n"})), "n");
    }

    #[test]
    fn deeply_nested_contexts() {
        let data = json!({"a": {"one": 1}, "b": {"two": 2}, "c": {"three": 3}});
        let template = "{{#a}}{{one}}{{#b}}{{one}}{{two}}{{#c}}{{one}}{{two}}{{three}}{{/c}}{{/b}}{{/a}}";
        assert_eq!(render(template, data), "112123");
    }

    #[test]
    fn doubled() {
        let template = "{{#bool}}\n* first\n{{/bool}}\n* {{two}}\n{{#bool}}\n* third\n{{/bool}}\n";
        assert_eq!(render(template, json!({"bool": true, "two": "second"})), "* first\n* second\n* third\n");
    }

    #[test]
    fn nested_truthy() {
        let template = "| A {{#bool}}B {{#bool}}C{{/bool}} D{{/bool}} E |";
        assert_eq!(render(template, json!({"bool": true})), "| A B C D E |");
        assert_eq!(render(template, json!({"bool": false})), "| A  E |");
    }

    #[test]
    fn dotted_section_keys() {
        let template = "\"{{#a.b.c}}Here{{/a.b.c}}\" == \"Here\"";
        assert_eq!(render(template, json!({"a": {"b": {"c": true}}})), "\"Here\" == \"Here\"");
        assert_eq!(render(template, json!({"a": {}})), "\"\" == \"Here\"");
    }

    #[test]
    fn implicit_iterator() {
        assert_eq!(render("\"{{#list}}({{.}}){{/list}}\"", json!({"list": ["a", "b", "c"]})), "\"(a)(b)(c)\"");
        assert_eq!(render("{{#list}}<{{.}}>{{{.}}}{{/list}}", json!({"list": ["&"]})), "<&amp;>&");
    }

    #[test]
    fn list_of_lists() {
        let data = json!({"list": [[1, 2], [3]]});
        assert_eq!(render("{{#list}}[{{#.}}{{.}}{{/.}}]{{/list}}", data), "[12][3]");
    }

    #[test]
    fn standalone_section_lines() {
        assert_eq!(render("{{#a}}\ntext\n{{/a}}\n", json!({"a": true})), "text\n");
        assert_eq!(
            render("| This Is\n{{#boolean}}\n|\n{{/boolean}}\n| A Line\n", json!({"boolean": true})),
            "| This Is\n|\n| A Line\n"
        );
        assert_eq!(
            render("| This Is\n  {{#boolean}}\n|\n  {{/boolean}}\n| A Line\n", json!({"boolean": true})),
            "| This Is\n|\n| A Line\n"
        );
    }

    #[test]
    fn indented_inline_sections_keep_whitespace() {
        let template = " {{#boolean}}YES{{/boolean}}\n {{#boolean}}GOOD{{/boolean}}\n";
        assert_eq!(render(template, json!({"boolean": true})), " YES\n GOOD\n");
    }

    #[test]
    fn standalone_line_endings() {
        assert_eq!(render("|\r\n{{#boolean}}\r\n{{/boolean}}\r\n|", json!({"boolean": true})), "|\r\n|");
        assert_eq!(render("  {{#boolean}}\n#{{/boolean}}\n/", json!({"boolean": true})), "#\n/");
        assert_eq!(render("#{{#boolean}}\n/\n  {{/boolean}}", json!({"boolean": true})), "#\n/\n");
    }

    #[test]
    fn padding() {
        assert_eq!(render("|{{# boolean }}={{/ boolean }}|", json!({"boolean": true})), "|=|");
    }

    #[test]
    fn mismatched_close_is_malformed() {
        assert!(malformed("{{#a}}...{{/b}}"));
        assert!(malformed("{{#a}}{{#b}}{{/a}}{{/b}}"));
    }

    #[test]
    fn unclosed_and_unopened_sections_are_malformed() {
        assert!(malformed("{{#a}}never closed"));
        assert!(malformed("{{^a}}never closed"));
        assert!(malformed("closed {{/a}} without opening"));
    }
}

mod inverted {
    use super::*;

    #[test]
    fn renders_only_when_falsy() {
        let template = "{{^a}}X{{/a}}";
        assert_eq!(render(template, json!({})), "X");
        assert_eq!(render(template, json!({"a": false})), "X");
        assert_eq!(render(template, json!({"a": []})), "X");
        assert_eq!(render(template, json!({"a": null})), "X");
        assert_eq!(render(template, json!({"a": true})), "");
        assert_eq!(render(template, json!({"a": [1]})), "");
        assert_eq!(render(template, json!({"a": {}})), "");
        assert_eq!(render(template, json!({"a": "text"})), "");
    }

    #[test]
    fn keeps_the_outer_context() {
        assert_eq!(render("{{^list}}{{empty}}{{/list}}", json!({"list": [], "empty": "none"})), "none");
    }

    #[test]
    fn standalone_lines() {
        let template = "| This Is\n{{^boolean}}\n|\n{{/boolean}}\n| A Line\n";
        assert_eq!(render(template, json!({"boolean": false})), "| This Is\n|\n| A Line\n");
    }
}

mod comments {
    use super::*;

    #[test]
    fn inline() {
        assert_eq!(render("12345{{! Comment Block! }}67890", json!({})), "1234567890");
        assert_eq!(render("  12 {{! 34 }}\n", json!({})), "  12 \n");
    }

    #[test]
    fn standalone() {
        assert_eq!(render("Begin.\n{{! Comment Block! }}\nEnd.\n", json!({})), "Begin.\nEnd.\n");
        assert_eq!(render("Begin.\n  {{! Indented Comment Block! }}\nEnd.\n", json!({})), "Begin.\nEnd.\n");
        assert_eq!(render("  {{! I'm Still Standalone }}", json!({})), "");
    }

    #[test]
    fn multiline() {
        assert_eq!(
            render("Begin.\n{{!\nSomething's going on here...\n}}\nEnd.\n", json!({})),
            "Begin.\nEnd.\n"
        );
    }
}

mod delimiters {
    use super::*;

    #[test]
    fn pair_behavior() {
        assert_eq!(render("{{=<% %>=}}(<%text%>)", json!({"text": "Hey!"})), "(Hey!)");
        assert_eq!(render("({{=[ ]=}}[text])", json!({"text": "It worked!"})), "(It worked!)");
    }

    #[test]
    fn switching_back_and_forth() {
        let data = json!({"greeting": "hi"});
        assert_eq!(render("{{=<% %>=}}<%greeting%><%={{ }}=%>{{greeting}}", data), "hihi");
    }

    #[test]
    fn switching_back_needs_the_active_delimiters() {
        // `{{=` is plain text while `<% %>` is active; only `<%={{ }}=%>` is a tag
        let data = json!({"greeting": "hi"});
        assert_eq!(render("{{=<% %>=}}<%greeting%>{{=<%={{ }}=%>}}{{greeting}}", data), "hi{{=}}hi");
    }

    #[test]
    fn triple_mustache_with_custom_delimiters() {
        assert_eq!(render("{{=<% %>=}}<%{text}%><%&text%>", json!({"text": "<>"})), "<><>");
    }

    #[test]
    fn sections() {
        let template = "[\n{{#section}}\n  {{data}}\n  |data|\n{{/section}}\n\n{{= | | =}}\n|#section|\n  {{data}}\n  |data|\n|/section|\n]\n";
        let data = json!({"section": true, "data": "I got interpolated."});
        assert_eq!(render(template, data), "[\n  I got interpolated.\n  |data|\n\n  {{data}}\n  I got interpolated.\n]\n");
    }

    #[test]
    fn change_persists_after_a_section() {
        assert_eq!(render("{{#a}}{{=| |=}}|/a||b|", json!({"a": true, "b": "B"})), "B");
    }

    #[test]
    fn standalone() {
        assert_eq!(render("Begin.\n{{=@ @=}}\nEnd.\n", json!({})), "Begin.\nEnd.\n");
        assert_eq!(render("Begin.\n  {{=@ @=}}\nEnd.\n", json!({})), "Begin.\nEnd.\n");
    }

    #[test]
    fn partials_start_with_the_default_pair() {
        let partials = [("include", ".{{value}}.")];
        let template = "[ {{>include}} ]\n{{= | | =}}\n[ |>include| ]\n";
        assert_eq!(render_with_partials(template, json!({"value": "yes"}), &partials), "[ .yes. ]\n[ .yes. ]\n");
    }

    #[test]
    fn partial_changes_stay_in_the_partial() {
        let partials = [("include", ".{{value}}. {{= | | =}} .|value|.")];
        let template = "[ {{>include}} ]\n[ .{{value}}.  .|value|. ]\n";
        assert_eq!(
            render_with_partials(template, json!({"value": "yes"}), &partials),
            "[ .yes.  .yes. ]\n[ .yes.  .|value|. ]\n"
        );
    }

    #[test]
    fn malformed_changes() {
        assert!(malformed("{{=<%=}}"));
        assert!(malformed("{{=<% % %>=}}"));
        assert!(malformed("{{=<%= %>=}}"));
    }
}

mod partials {
    use super::*;

    #[test]
    fn basic() {
        assert_eq!(render_with_partials("\"{{>text}}\"", json!({}), &[("text", "from partial")]), "\"from partial\"");
    }

    #[test]
    fn missing_partial_renders_nothing() {
        assert_eq!(render("\"{{>text}}\"", json!({})), "\"\"");
    }

    #[test]
    fn undefined_keys_in_partials_render_empty() {
        assert_eq!(render_with_partials("[{{>p}}]", json!({}), &[("p", "<{{nowhere.to.be.found}}>")]), "[<>]");
    }

    #[test]
    fn context() {
        assert_eq!(
            render_with_partials("\"{{>partial}}\"", json!({"text": "content"}), &[("partial", "*{{text}}*")]),
            "\"*content*\""
        );
    }

    #[test]
    fn recursion() {
        let data = json!({"content": "X", "nodes": [{"content": "Y", "nodes": []}]});
        let partials = [("node", "{{content}}<{{#nodes}}{{>node}}{{/nodes}}>")];
        assert_eq!(render_with_partials("{{>node}}", data, &partials), "X<Y<>>");
    }

    #[test]
    fn standalone_lines_are_trimmed_without_reindenting() {
        assert_eq!(render_with_partials("|\r\n{{>partial}}\r\n|", json!({}), &[("partial", ">")]), "|\r\n>|");
        assert_eq!(render_with_partials("\\\n  {{>partial}}\n/\n", json!({}), &[("partial", "|\n|\n")]), "\\\n|\n|\n/\n");
    }

    #[test]
    fn inline_partials_keep_surrounding_whitespace() {
        assert_eq!(render_with_partials("  {{>partial}} |\n", json!({}), &[("partial", "x")]), "  x |\n");
    }
}

#[test]
fn concurrent_rendering_of_a_loaded_template() {
    let mut template = Template::parse("{{#items}}{{>item}}{{/items}}").unwrap();
    template.add_partial("item", "<{{.}}>").unwrap();
    let template = &template;
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|n| scope.spawn(move || template.render(&json!({"items": [n, n + 1]}))))
            .collect();
        for (n, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("<{}><{}>", n, n + 1));
        }
    });
}
