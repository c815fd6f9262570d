use pretty_assertions::assert_eq;

use storykeep::action::Node;
use storykeep::parser::{coerce_number, lex};

fn sym(s: &str) -> Node {
    Node::Symbol(s.to_string(), 0..0)
}

fn num(n: f64) -> Node {
    Node::Number(n, 0..0)
}

fn list(items: Vec<Node>) -> Node {
    Node::List(items, 0..0)
}

#[test]
fn nested_goto_form() {
    let lexed = lex("(goto (storyFragment about))", 0);
    assert!(lexed.is_clean());
    assert_eq!(
        lexed.nodes,
        vec![list(vec![sym("goto"), list(vec![sym("storyFragment"), sym("about")])])]
    );
}

#[test]
fn numeric_tokens_coerce() {
    let lexed = lex("(goto (bunny intro 90))", 0);
    assert_eq!(
        lexed.nodes,
        vec![list(vec![sym("goto"), list(vec![sym("bunny"), sym("intro"), num(90.0)])])]
    );
}

#[test]
fn coercion_follows_unary_plus() {
    assert_eq!(coerce_number("42"), Some(42.0));
    assert_eq!(coerce_number("-5"), Some(-5.0));
    assert_eq!(coerce_number("1.5"), Some(1.5));
    assert_eq!(coerce_number(".5"), Some(0.5));
    assert_eq!(coerce_number("1e3"), Some(1000.0));
    assert_eq!(coerce_number("007"), Some(7.0));
    assert_eq!(coerce_number("0x10"), Some(16.0));
    assert_eq!(coerce_number("0b101"), Some(5.0));
    assert_eq!(coerce_number("Infinity"), Some(f64::INFINITY));
}

#[test]
fn radix_literals_past_u64_stay_numbers() {
    assert_eq!(coerce_number("0x1ffffffffffffffff"), Some(36893488147419103000.0));
    assert_eq!(coerce_number("0xFF"), Some(255.0));
    assert_eq!(coerce_number("0o17"), Some(15.0));
    assert_eq!(coerce_number("0b102"), None);
    assert_eq!(coerce_number("0xg"), None);
}

#[test]
fn falsy_and_nan_tokens_stay_symbols() {
    assert_eq!(coerce_number("0"), None);
    assert_eq!(coerce_number("0.0"), None);
    assert_eq!(coerce_number("inf"), None);
    assert_eq!(coerce_number("nan"), None);
    assert_eq!(coerce_number("1_000"), None);
    assert_eq!(coerce_number("12px"), None);
    assert_eq!(coerce_number("0x"), None);
    assert_eq!(coerce_number("-"), None);

    let lexed = lex("(slide 0)", 0);
    assert_eq!(lexed.nodes, vec![list(vec![sym("slide"), sym("0")])]);
}

#[test]
fn quoted_strings_lex_to_a_one_atom_list() {
    let lexed = lex("(goto (url \"https://example.com/a b\" \"42\" \"\"))", 0);
    assert!(lexed.is_clean());
    assert_eq!(
        lexed.nodes,
        vec![list(vec![
            sym("goto"),
            list(vec![
                sym("url"),
                list(vec![sym("https://example.com/a b")]),
                list(vec![num(42.0)]),
                list(vec![]),
            ]),
        ])]
    );
}

#[test]
fn comments_are_inert_inside_strings() {
    let lexed = lex("(url \"a ; b\")", 0);
    assert!(lexed.is_clean());
    assert_eq!(lexed.nodes, vec![list(vec![sym("url"), list(vec![sym("a ; b")])])]);
}

#[test]
fn comments_run_to_end_of_line() {
    let lexed = lex("(goto ; jump home\n  (home))", 0);
    assert!(lexed.is_clean());
    assert_eq!(lexed.nodes, vec![list(vec![sym("goto"), list(vec![sym("home")])])]);
}

#[test]
fn parens_and_quotes_end_tokens() {
    let lexed = lex("(a(b)c\"d\"e)", 0);
    assert_eq!(
        lexed.nodes,
        vec![list(vec![sym("a"), list(vec![sym("b")]), sym("c"), list(vec![sym("d")]), sym("e")])]
    );
}

#[test]
fn any_whitespace_separates() {
    let lexed = lex("(goto\t(context\n  pricing))", 0);
    assert_eq!(
        lexed.nodes,
        vec![list(vec![sym("goto"), list(vec![sym("context"), sym("pricing")])])]
    );
}

#[test]
fn several_top_level_forms() {
    let lexed = lex("(a) (b) c", 0);
    assert_eq!(lexed.nodes, vec![list(vec![sym("a")]), list(vec![sym("b")]), sym("c")]);
}

#[test]
fn unclosed_lists_are_closed_at_end_with_warnings() {
    let lexed = lex("(goto (home", 0);
    assert_eq!(lexed.nodes, vec![list(vec![sym("goto"), list(vec![sym("home")])])]);
    assert_eq!(lexed.diagnostics.len(), 2);
    assert!(lexed.diagnostics.iter().all(|d| d.is_warning()));
    assert!(lexed.diagnostics[0].message.contains("unclosed"));
}

#[test]
fn stray_close_stops_the_scan() {
    let lexed = lex("(home)) (ignored)", 0);
    assert_eq!(lexed.nodes, vec![list(vec![sym("home")])]);
    assert_eq!(lexed.diagnostics.len(), 1);
    assert_eq!(lexed.diagnostics[0].span, 6..17);
}

#[test]
fn unterminated_string_runs_to_end() {
    let lexed = lex("(url \"abc", 0);
    assert_eq!(lexed.nodes, vec![list(vec![sym("url"), list(vec![sym("abc")])])]);
    assert_eq!(lexed.diagnostics.len(), 2);
    assert!(lexed.diagnostics[0].message.contains("unterminated string"));
}

#[test]
fn spans_cover_source() {
    let lexed = lex("(home \"x y\")", 0);
    let Node::List(items, span) = &lexed.nodes[0] else {
        panic!("expected a list");
    };
    assert_eq!(*span, 0..12);
    assert_eq!(*items[0].span(), 1..5);
    assert_eq!(*items[1].span(), 6..11);
    assert_eq!(*items[1].as_list().unwrap()[0].span(), 7..10);
}

#[test]
fn non_ascii_tokens() {
    let lexed = lex("(goto (storyFragment café))", 0);
    assert_eq!(
        lexed.nodes,
        vec![list(vec![sym("goto"), list(vec![sym("storyFragment"), sym("café")])])]
    );
}

#[test]
fn display_reads_back_as_source() {
    let lexed = lex("(goto  (bunny intro 90))", 0);
    assert_eq!(lexed.nodes[0].to_string(), "(goto (bunny intro 90))");
}

#[test]
fn empty_input() {
    let lexed = lex("", 0);
    assert!(lexed.nodes.is_empty());
    assert!(lexed.is_clean());
}
