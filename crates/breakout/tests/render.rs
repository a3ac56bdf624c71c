//! End-to-end rendering tests.

use std::sync::Once;

use breakout::parser::Mode;
use breakout::{
    ConfigError, DelimiterConfig, Delimiters, Map, RenderError, Renderer, Value, context, render,
    render_with,
};
use insta::assert_snapshot;

static INIT: Once = Once::new();

/// Initialize the tracing subscriber for tests.
/// Only initializes once, even if called multiple times.
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .with_target(false)
            .init();
    });
}

fn users() -> Value {
    vec![
        Value::Map(context! { "name" => "test1", "admin" => true }),
        Value::Map(context! { "name" => "test2" }),
    ]
    .into()
}

// =========================================================================
// Variables
// =========================================================================

#[test]
fn variable_is_substituted() {
    init_tracing();
    let data = context! { "foo" => "bar" };
    assert_eq!(render("{{foo}}", &data).unwrap(), "bar");
    assert_eq!(render("this is a {{ foo }} test", &data).unwrap(), "this is a bar test");
}

#[test]
fn text_without_delimiters_is_unchanged() {
    let data = context! { "foo" => "bar" };
    for text in [
        "",
        "plain text",
        "braces { and } and % alone",
        "<p>markup & \"quotes\"</p>\n\tüñï",
        "{ {foo} } % } {",
    ] {
        assert_eq!(render(text, &data).unwrap(), text);
    }
}

#[test]
fn replacements_of_differing_lengths_line_up() {
    let data = context! { "a" => "", "b" => "a much longer value", "c" => "x" };
    assert_eq!(
        render("[{{ a }}|{{ b }}|{{ c }}|{{ a }}|{{ b }}]", &data).unwrap(),
        "[|a much longer value|x||a much longer value]"
    );
}

#[test]
fn variable_is_html_escaped_by_default() {
    let data = context! { "foo" => "<b>" };
    assert_snapshot!(render("{{ foo }}", &data).unwrap(), @"&lt;b&gt;");
}

#[test]
fn variable_with_named_context() {
    let data = context! { "q" => "a&b c", "s" => "it's" };
    assert_snapshot!(render("?q={{ q|url }}", &data).unwrap(), @"?q=a%26b+c");
    assert_snapshot!(render("'{{ s | js }}'", &data).unwrap(), @r"'it\x27s'");
}

#[test]
fn missing_variable_renders_empty() {
    let data = Map::new();
    assert_eq!(render("[{{ nothing }}][{{ a.b.c }}]", &data).unwrap(), "[][]");
}

#[test]
fn scalars_render_canonical_text() {
    let data = context! {
        "count" => 42,
        "ratio" => 1.5,
        "on" => true,
        "off" => false,
        "none" => Value::Null,
    };
    assert_snapshot!(
        render("{{ count }} {{ ratio }} {{ on }} {{ off }} [{{ none }}]", &data).unwrap(),
        @"42 1.5 true false []"
    );
}

#[test]
fn compound_value_in_string_context_is_an_error() {
    let data = context! { "items" => vec![Value::from("a")] };
    let err = render("{{ items }}", &data).unwrap_err();
    assert!(matches!(err, RenderError::InvalidEscapeInput(_)));
    assert_eq!(render("{{ items|url }}", &data).unwrap(), "0=a");
}

#[test]
fn unterminated_variable_is_left_as_text() {
    let data = context! { "a" => "x" };
    assert_eq!(render("{{ a", &data).unwrap(), "{{ a");
    assert_eq!(render("{{ a }} and {{ b", &data).unwrap(), "x and {{ b");
}

#[test]
fn substituted_text_is_not_rescanned() {
    let data = context! { "a" => "{{ b }}", "b" => "nope" };
    assert_eq!(render("{{ a }}", &data).unwrap(), "{{ b }}");
    assert_eq!(render("{{ a|js }}", &data).unwrap(), r"\x7b\x7b b \x7d\x7d");
}

// =========================================================================
// for
// =========================================================================

#[test]
fn for_iterates_list_of_maps() {
    init_tracing();
    let data = context! {
        "items" => vec![
            Value::Map(context! { "name" => "a" }),
            Value::Map(context! { "name" => "b" }),
        ],
    };
    assert_eq!(
        render("{% for item in items %}{{item.name}},{% endfor %}", &data).unwrap(),
        "a,b,"
    );
}

#[test]
fn for_keeps_surrounding_whitespace() {
    let data = context! { "items" => users() };
    assert_eq!(
        render(
            "this is a {% for item in items %} name: {{ item.name }} {% endfor %} here",
            &data
        )
        .unwrap(),
        "this is a  name: test1  name: test2  here"
    );
}

#[test]
fn for_over_empty_list_renders_nothing() {
    let data = context! { "items" => Vec::<Value>::new() };
    assert_eq!(
        render("[{% for item in items %}x{% endfor %}]", &data).unwrap(),
        "[]"
    );
}

#[test]
fn for_over_missing_variable_is_an_error() {
    let err = render("{% for item in items %}x{% endfor %}", &Map::new()).unwrap_err();
    assert!(matches!(err, RenderError::VariableNotFound { ref path } if path == "items"));
    assert_eq!(
        err.to_string(),
        "variable 'items' not found for use in for loop"
    );
}

#[test]
fn for_over_scalar_is_an_error() {
    let data = context! { "name" => "Ada" };
    let err = render("{% for c in name %}{{ c }}{% endfor %}", &data).unwrap_err();
    assert_eq!(err.to_string(), "cannot iterate over 'name': found string");
}

#[test]
fn for_over_map_yields_values_in_key_order() {
    let data = context! {
        "scores" => Value::Map(context! { "b" => 2, "a" => 1, "c" => 3 }),
    };
    assert_snapshot!(
        render("{% for s in scores %}{{ s }}{% endfor %}", &data).unwrap(),
        @"123"
    );
}

#[test]
fn for_binding_shadows_and_restores() {
    let data = context! {
        "item" => "outer",
        "title" => "T",
        "items" => vec![Value::from("a"), Value::from("b")],
    };
    assert_snapshot!(
        render(
            "{% for item in items %}{{ title }}{{ item }} {% endfor %}{{ item }}",
            &data
        )
        .unwrap(),
        @"Ta Tb outer"
    );
}

#[test]
fn nested_for_loops() {
    let data = context! {
        "rows" => vec![
            Value::from(vec![Value::from(1), Value::from(2)]),
            Value::from(vec![Value::from(3)]),
        ],
    };
    assert_snapshot!(
        render(
            "{% for row in rows %}{% for cell in row %}{{ cell }}{% endfor %};{% endfor %}",
            &data
        )
        .unwrap(),
        @"12;3;"
    );
}

#[test]
fn nested_loop_sees_outer_binding() {
    let data = context! {
        "groups" => vec![
            Value::Map(context! { "name" => "g1", "members" => vec![Value::from("x"), Value::from("y")] }),
        ],
    };
    assert_snapshot!(
        render(
            "{% for g in groups %}{% for m in g.members %}{{ g.name }}/{{ m }};{% endfor %}{% endfor %}",
            &data
        )
        .unwrap(),
        @"g1/x;g1/y;"
    );
}

// =========================================================================
// if
// =========================================================================

#[test]
fn if_else_picks_branch_on_presence() {
    init_tracing();
    let template = "{% if bar %}yes{% else %}no{% endif %}";
    assert_eq!(render(template, &Map::new()).unwrap(), "no");
    assert_eq!(render(template, &context! { "bar" => "x" }).unwrap(), "yes");
}

#[test]
fn if_treats_empty_and_zero_as_present() {
    let template = "{% if v %}yes{% else %}no{% endif %}";
    for value in [Value::from(""), Value::from("0"), Value::from(0), Value::from(false), Value::Null] {
        let data = context! { "v" => value };
        assert_eq!(render(template, &data).unwrap(), "yes");
    }
}

#[test]
fn if_without_else_removes_block_when_false() {
    assert_eq!(
        render("a{% if missing %}hidden{% endif %}b", &Map::new()).unwrap(),
        "ab"
    );
}

#[test]
fn if_equals_compares_against_literal() {
    let data = context! { "foo" => "bar", "n" => 3, "flag" => true };
    assert_eq!(render("{% if foo == bar %}y{% endif %}", &data).unwrap(), "y");
    assert_eq!(render("{% if foo == 'bar' %}y{% endif %}", &data).unwrap(), "y");
    assert_eq!(render("{% if foo == 'baz' %}y{% else %}n{% endif %}", &data).unwrap(), "n");
    assert_eq!(render("{% if n == 3 %}y{% endif %}", &data).unwrap(), "y");
    assert_eq!(render("{% if flag == 'true' %}y{% endif %}", &data).unwrap(), "y");
}

#[test]
fn if_not_equals() {
    let data = context! { "foo" => "bar" };
    assert_eq!(render("{% if foo != 'baz' %}y{% endif %}", &data).unwrap(), "y");
    assert_eq!(render("{% if foo != bar %}y{% else %}n{% endif %}", &data).unwrap(), "n");
    assert_eq!(render("{% if nope != 'x' %}y{% endif %}", &data).unwrap(), "y");
    assert_eq!(render("{% if nope == '' %}y{% else %}n{% endif %}", &data).unwrap(), "n");
}

#[test]
fn if_branch_is_rendered_with_context() {
    let data = context! { "user" => Value::Map(context! { "name" => "<Ada>" }) };
    assert_snapshot!(
        render("{% if user.name %}Hi {{ user.name }}{% else %}Hi stranger{% endif %}", &data)
            .unwrap(),
        @"Hi &lt;Ada&gt;"
    );
}

#[test]
fn nested_if_blocks() {
    let template = "{% if a %}A{% if b %}B{% else %}-{% endif %}{% else %}none{% endif %}";
    assert_eq!(render(template, &context! { "a" => 1, "b" => 1 }).unwrap(), "AB");
    assert_eq!(render(template, &context! { "a" => 1 }).unwrap(), "A-");
    assert_eq!(render(template, &context! { "b" => 1 }).unwrap(), "none");
}

#[test]
fn if_inside_for() {
    let data = context! { "users" => users() };
    assert_snapshot!(
        render(
            "{% for u in users %}{% if u.admin %}[{{ u.name }}]{% else %}{{ u.name }}{% endif %};{% endfor %}",
            &data
        )
        .unwrap(),
        @"[test1];test2;"
    );
}

#[test]
fn for_inside_if() {
    let data = context! { "show" => "y", "xs" => vec![Value::from("1"), Value::from("2")] };
    assert_eq!(
        render("{% if show %}{% for x in xs %}{{ x }}{% endfor %}{% endif %}", &data).unwrap(),
        "12"
    );
}

#[test]
fn malformed_if_header_is_an_error() {
    let err = render("{% if a b %}x{% endif %}", &context! { "a" => 1 }).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid tag '{% if a b %}': unexpected 'b' after condition, expected `==` or `!=`"
    );
    let err = render("{% for x %}x{% endfor %}", &Map::new()).unwrap_err();
    assert!(matches!(err, RenderError::InvalidTag { .. }));
}

// =========================================================================
// raw
// =========================================================================

#[test]
fn raw_block_is_copied_verbatim() {
    let data = context! { "x" => "ignored" };
    assert_eq!(render("{% raw %}{{x}}{% endraw %}", &data).unwrap(), "{{x}}");
    assert_eq!(
        render("this is a {% raw %} {{ test }} {% endraw %} raw block", &data).unwrap(),
        "this is a  {{ test }}  raw block"
    );
}

#[test]
fn raw_block_keeps_control_tags() {
    assert_eq!(
        render("{% raw %}{% if a %}{% endif %}{% endraw %}", &Map::new()).unwrap(),
        "{% if a %}{% endif %}"
    );
}

#[test]
fn raw_inside_for_repeats_verbatim() {
    let data = context! { "xs" => vec![Value::from(1), Value::from(2)] };
    assert_eq!(
        render("{% for x in xs %}{{ x }}{% raw %}{{ x }}{% endraw %}{% endfor %}", &data).unwrap(),
        "1{{ x }}2{{ x }}"
    );
}

// =========================================================================
// Lenient handling of malformed tags
// =========================================================================

#[test]
fn stray_block_tags_are_dropped() {
    let data = context! { "a" => "x" };
    assert_eq!(
        render("{{ a }} {% endif %} {% block %}", &data).unwrap(),
        "x  "
    );
    assert_eq!(render("a{% endif %}b{% else %}c", &Map::new()).unwrap(), "abc");
}

#[test]
fn stray_tags_inside_a_block_are_dropped() {
    let data = context! { "a" => 1 };
    assert_eq!(
        render("{% if a %}[{% endfor %}]{% endif %}", &data).unwrap(),
        "[]"
    );
}

#[test]
fn unclosed_block_renders_body_and_keeps_opener() {
    let data = context! { "y" => "Y" };
    assert_eq!(render("{% if x %}{{ y }}", &data).unwrap(), "{% if x %}Y");
}

// =========================================================================
// Delimiters
// =========================================================================

#[test]
fn custom_delimiters() {
    let delimiters = Delimiters::builder()
        .variable_open("<<")
        .variable_close(">>")
        .block_open("<%")
        .block_close("%>")
        .build()
        .unwrap();
    let data = context! { "name" => "Ada", "xs" => vec![Value::from("1"), Value::from("2")] };
    assert_eq!(
        render_with("<< name >> {{ name }} <% for x in xs %><< x >><% endfor %>", &data, delimiters)
            .unwrap(),
        "Ada {{ name }} 12"
    );
}

#[test]
fn delimiters_from_json_config() {
    let config: DelimiterConfig =
        serde_json::from_str(r#"{ "variable": ["${", "}"] }"#).unwrap();
    let delimiters = Delimiters::try_from(config).unwrap();
    assert_eq!(delimiters.variable(), ("${", "}"));
    assert_eq!(delimiters.block(), ("{%", "%}"));

    let data = context! { "x" => "1" };
    assert_eq!(render_with("${x}{% if x %}!{% endif %}", &data, delimiters).unwrap(), "1!");
}

#[test]
fn delimiter_config_rejects_unknown_fields() {
    let result: Result<DelimiterConfig, _> = serde_json::from_str(r#"{ "tag": ["a", "b"] }"#);
    assert!(result.is_err());
}

#[test]
fn invalid_delimiters_are_rejected() {
    let err = Delimiters::builder().variable_close("").build().unwrap_err();
    assert_eq!(
        err,
        ConfigError::EmptyDelimiter {
            which: "variable close"
        }
    );

    let err = Delimiters::builder().block_open("{{").build().unwrap_err();
    assert_eq!(err.to_string(), "variable and block tags cannot both open with '{{'");
}

// =========================================================================
// Renderer configuration
// =========================================================================

#[test]
fn renderer_defaults() {
    let renderer = Renderer::new();
    assert_eq!(renderer.mode(), Mode::Lenient);
    assert_eq!(renderer.max_depth(), 64);
    assert_eq!(renderer.delimiters(), &Delimiters::default());
}

#[test]
fn depth_limit_is_enforced() {
    let renderer = Renderer::builder().max_depth(1).build();
    let data = context! { "a" => 1 };
    assert_eq!(renderer.render("{% if a %}x{% endif %}", &data).unwrap(), "x");

    let err = renderer
        .render("{% if a %}{% if a %}x{% endif %}{% endif %}", &data)
        .unwrap_err();
    assert!(matches!(err, RenderError::MaxDepthExceeded { limit: 1 }));
    assert_eq!(err.to_string(), "maximum nesting depth of 1 exceeded");
}

#[test]
fn deeply_nested_blocks_fail_before_rendering() {
    let depth = 20_000;
    let template = "{% if a %}".repeat(depth) + &"{% endif %}".repeat(depth);
    let err = render(&template, &context! { "a" => 1 }).unwrap_err();
    assert!(matches!(err, RenderError::MaxDepthExceeded { limit: 64 }));
}

#[test]
fn long_chain_of_unclosed_openers_hits_depth_limit() {
    let template = "{% if a %}".repeat(200_000);
    let err = render(&template, &Map::new()).unwrap_err();
    assert!(matches!(err, RenderError::MaxDepthExceeded { limit: 64 }));
}

#[test]
fn unclosed_openers_count_toward_depth() {
    let renderer = Renderer::builder().max_depth(2).build();
    let data = context! { "y" => "Y" };
    assert_eq!(
        renderer.render("{% if x %}{% for z in zs %}{{ y }}", &data).unwrap(),
        "{% if x %}{% for z in zs %}Y"
    );
    let err = renderer
        .render("{% if x %}{% if x %}{% if x %}{{ y }}", &data)
        .unwrap_err();
    assert!(matches!(err, RenderError::MaxDepthExceeded { limit: 2 }));
}

#[test]
fn many_tags_in_one_template() {
    let template = "{{ x }}".repeat(40_000);
    let out = render(&template, &context! { "x" => "a" }).unwrap();
    assert_eq!(out.len(), 40_000);
    assert!(out.chars().all(|c| c == 'a'));
}

#[test]
fn default_depth_allows_reasonable_nesting() {
    let template = "{% if a %}".repeat(20) + "deep" + &"{% endif %}".repeat(20);
    assert_eq!(render(&template, &context! { "a" => 1 }).unwrap(), "deep");
}

#[test]
fn template_renders_many_times() {
    let renderer = Renderer::new();
    let template = renderer.parse("Hello {{ name }}!").unwrap();
    assert_eq!(template.source(), "Hello {{ name }}!");
    assert_eq!(template.nodes().len(), 1);

    for name in ["Ada", "Grace"] {
        let out = renderer
            .render_template(&template, &context! { "name" => name })
            .unwrap();
        assert_eq!(out, format!("Hello {name}!"));
    }
}
