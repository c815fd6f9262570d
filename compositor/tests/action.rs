use pretty_assertions::assert_eq;

use compositor::action::{Action, BunnySeek, StoryKeepTarget, pre_parse_action, pre_parse_bunny};
use compositor::error::ActionError;

fn href(source: &str) -> String {
    let lexed = storykeep::parser::lex(source, 0);
    pre_parse_action(&lexed.nodes, "current", false)
}

fn href_in_context(source: &str, slug: &str) -> String {
    let lexed = storykeep::parser::lex(source, 0);
    pre_parse_action(&lexed.nodes, slug, true)
}

#[test]
fn page_targets() {
    assert_eq!(href("(goto (home))"), "/");
    assert_eq!(href("(goto (concierge profile))"), "/concierge/profile");
    assert_eq!(href("(goto (context privacy))"), "/context/privacy");
    assert_eq!(href("(goto (product widget))"), "/products/widget");
    assert_eq!(href("(goto (storyFragment about))"), "/about");
    assert_eq!(href("(goto (storyFragmentPane about team))"), "/about#team");
}

#[test]
fn flat_and_nested_forms_agree() {
    assert_eq!(
        Action::parse("(goto storyFragment about)"),
        Action::parse("(goto (storyFragment about))")
    );
    assert_eq!(href("(goto home)"), "/");
}

#[test]
fn numeric_slugs_render_as_text() {
    assert_eq!(href("(goto (storyFragment 404))"), "/404");
}

#[test]
fn pane_anchor_requires_text() {
    assert_eq!(href("(goto (storyFragmentPane about 42))"), "");
    assert_eq!(
        Action::parse("(goto (storyFragmentPane about 42))"),
        Err(ActionError::BadArgument {
            target: "storyFragmentPane".to_string(),
            index: 2,
            expected: "a string",
            got: "number",
        })
    );
}

#[test]
fn bunny_seeks_in_place_on_the_same_page() {
    assert_eq!(href("(goto (bunny current 90))"), "#t=90s");
    assert_eq!(href("(goto (bunny intro 90))"), "/intro?t=90s");
    assert_eq!(href_in_context("(goto (bunnyContext faq 30))", "faq"), "#t=30s");
    assert_eq!(href_in_context("(goto (bunnyContext faq 30))", "other"), "/context/faq?t=30s");
    // A story fragment with the same slug is a different page from a context pane.
    assert_eq!(href_in_context("(goto (bunny faq 30))", "faq"), "/faq?t=30s");
}

#[test]
fn bunny_accepts_quoted_seconds() {
    assert_eq!(href(r#"(goto (bunny intro "12.5"))"#), "/intro?t=12.5s");
    assert_eq!(href("(goto (bunny intro 0))"), "/intro?t=0s");
    assert_eq!(href("(goto (bunny intro soon))"), "");
}

#[test]
fn quoted_arguments_read_as_their_atom() {
    assert_eq!(href(r#"(goto (url "https://example.com/a b"))"#), "https://example.com/a b");
    assert_eq!(href(r#"(goto (storyFragment "404"))"#), "/404");
    assert_eq!(href(r#"(goto "storyFragment" about)"#), "/about");
    // A quoted number is still a number, so it cannot name a pane.
    assert_eq!(href(r#"(goto (storyFragmentPane about "42"))"#), "");
}

#[test]
fn external_and_editor_targets() {
    assert_eq!(href("(goto (url https://example.com/docs))"), "https://example.com/docs");
    assert_eq!(href(r#"(goto (url "/pricing"))"#), "/pricing");
    assert_eq!(href("(goto (storykeep dashboard))"), "/storykeep");
    assert_eq!(href("(goto (storykeep settings))"), "/storykeep/settings");
    assert_eq!(href("(goto (storykeep login))"), "/storykeep/login?force=true");
    assert_eq!(href("(goto (storykeep logout))"), "/storykeep/logout");
    assert_eq!(
        Action::parse("(goto (storykeep login))"),
        Ok(Action::StoryKeep(StoryKeepTarget::Login))
    );
}

#[test]
fn misfires_degrade_to_empty_href() {
    assert_eq!(href(""), "");
    assert_eq!(href("()"), "");
    assert_eq!(href("(goto (context))"), "");
    assert_eq!(href("(goto (teleport mars))"), "");
    assert_eq!(href("(goto (storykeep admin))"), "");
    assert_eq!(href("(declare (belief x))"), "");
}

#[test]
fn decode_errors() {
    assert_eq!(Action::parse(""), Err(ActionError::Empty));
    assert_eq!(
        Action::parse("(go (home))"),
        Err(ActionError::UnknownCommand("go".to_string()))
    );
    assert_eq!(
        Action::parse("(goto (nope))"),
        Err(ActionError::UnknownTarget {
            command: "goto".to_string(),
            target: "nope".to_string(),
        })
    );
    assert_eq!(
        Action::parse("(goto (context))"),
        Err(ActionError::MissingArgument {
            target: "context".to_string(),
            index: 1,
        })
    );
}

#[test]
fn recovered_lexer_input_still_decodes() {
    assert_eq!(
        Action::parse("(goto (storyFragment about"),
        Ok(Action::StoryFragment("about".to_string()))
    );
}

#[test]
fn bunny_projection() {
    let lexed = storykeep::parser::lex("(goto (bunnyContext faq 42))", 0);
    assert_eq!(
        pre_parse_bunny(&lexed.nodes),
        Some(BunnySeek {
            slug: "faq".to_string(),
            t: 42.0,
            is_context: true,
        })
    );

    let lexed = storykeep::parser::lex("(goto (storyFragment faq))", 0);
    assert_eq!(pre_parse_bunny(&lexed.nodes), None);
}
