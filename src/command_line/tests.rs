use super::parser::{parse, ParsedCommand};
use super::substitute::SubstituteRange;
use super::*;
use crate::test_utils::{buffer_lines, feed, session_with_lines};

// ============================================================
// Parsing
// ============================================================

#[test]
fn full_names_and_abbreviations_parse() {
    assert_eq!(parse("write"), ParsedCommand::Write { path: None });
    assert_eq!(parse("w"), ParsedCommand::Write { path: None });
    assert_eq!(parse("quit"), ParsedCommand::Quit { force: false });
    assert_eq!(parse("q!"), ParsedCommand::Quit { force: true });
    assert_eq!(parse("wq"), ParsedCommand::WriteQuit { path: None });
    assert_eq!(parse("x"), ParsedCommand::WriteQuit { path: None });
}

#[test]
fn leading_colon_is_accepted() {
    assert_eq!(parse(":undo"), ParsedCommand::Undo);
}

#[test]
fn write_takes_an_optional_path() {
    assert_eq!(
        parse("w /tmp/out.txt"),
        ParsedCommand::Write {
            path: Some("/tmp/out.txt".to_string())
        }
    );
}

#[test]
fn edit_requires_separate_handling_of_bang() {
    assert_eq!(
        parse("e! notes.md"),
        ParsedCommand::Edit {
            path: Some("notes.md".to_string()),
            force: true
        }
    );
}

#[test]
fn buffer_window_tab_commands_parse() {
    assert_eq!(parse("bn"), ParsedCommand::BufferNext);
    assert_eq!(parse("bprevious"), ParsedCommand::BufferPrev);
    assert_eq!(parse("sp"), ParsedCommand::Split);
    assert_eq!(parse("vs"), ParsedCommand::VSplit);
    assert_eq!(parse("tabnew"), ParsedCommand::TabNew);
    assert_eq!(parse("tabn"), ParsedCommand::TabNext);
    assert_eq!(parse("tabp"), ParsedCommand::TabPrev);
}

#[test]
fn set_forms_parse() {
    assert_eq!(
        parse("set number"),
        ParsedCommand::Set {
            option: "number".to_string(),
            value: None
        }
    );
    assert_eq!(
        parse("set ts=4"),
        ParsedCommand::Set {
            option: "ts".to_string(),
            value: Some("4".to_string())
        }
    );
    assert_eq!(
        parse("set sw 2"),
        ParsedCommand::Set {
            option: "sw".to_string(),
            value: Some("2".to_string())
        }
    );
    assert_eq!(
        parse("set number?"),
        ParsedCommand::SetShow {
            option: "number".to_string()
        }
    );
}

#[test]
fn unknown_command_is_reported_not_thrown() {
    assert_eq!(
        parse("frobnicate"),
        ParsedCommand::Unknown {
            name: "frobnicate".to_string()
        }
    );
}

#[test]
fn shared_prefix_is_ambiguous() {
    let ParsedCommand::Ambiguous { prefix, matches } = parse("ta") else {
        panic!("expected ambiguity for 'ta'");
    };
    assert_eq!(prefix, "ta");
    assert!(matches.contains(&"tabnew".to_string()));
    assert!(matches.contains(&"tabnext".to_string()));
}

// ============================================================
// Substitute parsing
// ============================================================

#[test]
fn substitute_forms_parse() {
    let ParsedCommand::Substitute(sub) = parse("s/a/b/") else {
        panic!("expected substitute");
    };
    assert_eq!(sub.range, SubstituteRange::CurrentLine);
    assert_eq!(sub.pattern, "a");
    assert_eq!(sub.replacement, "b");
    assert!(!sub.ignore_case);

    let ParsedCommand::Substitute(sub) = parse("%s/foo/bar/gi") else {
        panic!("expected substitute");
    };
    assert_eq!(sub.range, SubstituteRange::AllLines);
    assert!(sub.ignore_case);
}

#[test]
fn substitute_supports_other_delimiters_and_escapes() {
    let ParsedCommand::Substitute(sub) = parse("s#a/b#c#") else {
        panic!("expected substitute");
    };
    assert_eq!(sub.pattern, "a/b");
    assert_eq!(sub.replacement, "c");

    let ParsedCommand::Substitute(sub) = parse(r"s/a\/b/c/") else {
        panic!("expected substitute");
    };
    assert_eq!(sub.pattern, "a/b");
}

#[test]
fn malformed_substitute_is_unknown() {
    assert!(matches!(parse("s//x/"), ParsedCommand::Unknown { .. }));
    assert!(matches!(parse("s/onlypattern"), ParsedCommand::Unknown { .. }));
}

#[test]
fn set_is_not_mistaken_for_substitute() {
    assert!(matches!(parse("set nu"), ParsedCommand::Set { .. }));
    assert!(matches!(parse("sp"), ParsedCommand::Split));
}

// ============================================================
// Execution
// ============================================================

#[test]
fn substitute_replaces_all_on_current_line() {
    let (mut session, _) = session_with_lines(&["aaa", "aaa"]);
    let result = execute_line(&mut session, "s/a/b/");
    assert_eq!(result, ExecutionResult::Success);
    assert_eq!(buffer_lines(&session), vec!["bbb", "aaa"]);
    assert!(session
        .status()
        .unwrap()
        .text
        .contains("3 substitutions on 1 line"));
}

#[test]
fn percent_substitute_covers_every_line() {
    let (mut session, _) = session_with_lines(&["aaa", "baa"]);
    execute_line(&mut session, "%s/a/b/");
    assert_eq!(buffer_lines(&session), vec!["bbb", "bbb"]);
    assert!(session
        .status()
        .unwrap()
        .text
        .contains("5 substitutions on 2 lines"));
}

#[test]
fn substitute_with_capture_groups() {
    let (mut session, _) = session_with_lines(&["hello world"]);
    execute_line(&mut session, r"s/(\w+) (\w+)/$2 $1/");
    assert_eq!(buffer_lines(&session), vec!["world hello"]);
}

#[test]
fn substitute_is_one_undo_step() {
    let (mut session, _) = session_with_lines(&["aaa", "aaa"]);
    execute_line(&mut session, "%s/a/b/");
    feed(&mut session, "u");
    assert_eq!(buffer_lines(&session), vec!["aaa", "aaa"]);
}

#[test]
fn substitute_missing_pattern_reports_error() {
    let (mut session, _) = session_with_lines(&["hello"]);
    let result = execute_line(&mut session, "s/xyz/a/");
    assert!(matches!(result, ExecutionResult::Error(_)));
    assert_eq!(buffer_lines(&session), vec!["hello"]);
}

#[test]
fn substitute_invalid_regex_is_a_status_error() {
    let (mut session, _) = session_with_lines(&["hello"]);
    let result = execute_line(&mut session, "s/[bad/a/");
    assert!(matches!(result, ExecutionResult::Error(_)));
    assert!(session.status().unwrap().text.contains("Invalid pattern"));
}

#[test]
fn substitute_honors_ignorecase_option() {
    let (mut session, _) = session_with_lines(&["Hello"]);
    execute_line(&mut session, "set ignorecase");
    execute_line(&mut session, "s/hello/bye/");
    assert_eq!(buffer_lines(&session), vec!["bye"]);
}

#[test]
fn unknown_command_becomes_status_error() {
    let (mut session, _) = session_with_lines(&["x"]);
    let result = execute_line(&mut session, "frobnicate");
    assert_eq!(
        result,
        ExecutionResult::Error("Not an editor command: frobnicate".to_string())
    );
    assert!(session.status().is_some());
}

#[test]
fn quit_with_unsaved_changes_is_rejected() {
    let (mut session, _) = session_with_lines(&["x"]);
    feed(&mut session, "ihello<Esc>");
    let result = execute_line(&mut session, "q");
    assert!(matches!(result, ExecutionResult::Error(_)));
    assert!(!session.should_quit());

    let result = execute_line(&mut session, "q!");
    assert_eq!(result, ExecutionResult::Quit);
    assert!(session.should_quit());
}

#[test]
fn quit_closes_extra_windows_first() {
    let (mut session, _) = session_with_lines(&["x"]);
    execute_line(&mut session, "split");
    assert_eq!(session.tabs.active().windows().len(), 2);
    assert_eq!(execute_line(&mut session, "q"), ExecutionResult::Success);
    assert_eq!(session.tabs.active().windows().len(), 1);
    assert_eq!(execute_line(&mut session, "q"), ExecutionResult::Quit);
}

#[test]
fn close_on_last_window_is_an_error() {
    let (mut session, _) = session_with_lines(&["x"]);
    let result = execute_line(&mut session, "close");
    assert_eq!(
        result,
        ExecutionResult::Error("Cannot close last window".to_string())
    );
}

#[test]
fn undo_redo_commands() {
    let (mut session, _) = session_with_lines(&["abc"]);
    feed(&mut session, "x");
    execute_line(&mut session, "undo");
    assert_eq!(buffer_lines(&session), vec!["abc"]);
    execute_line(&mut session, "redo");
    assert_eq!(buffer_lines(&session), vec!["bc"]);
    let result = execute_line(&mut session, "redo");
    assert!(matches!(result, ExecutionResult::Error(_)));
}

#[test]
fn set_show_renders_value_in_status() {
    let (mut session, _) = session_with_lines(&["x"]);
    execute_line(&mut session, "set ts?");
    assert_eq!(session.status().unwrap().text, "tabstop=8");
}

#[test]
fn nohlsearch_clears_highlight() {
    let (mut session, _) = session_with_lines(&["hello"]);
    feed(&mut session, "/hello<CR>");
    assert_eq!(session.search_highlight(), Some("hello"));
    execute_line(&mut session, "noh");
    assert_eq!(session.search_highlight(), None);
}

#[test]
fn registers_command_lists_contents() {
    let (mut session, _) = session_with_lines(&["word here"]);
    feed(&mut session, "yw");
    execute_line(&mut session, "registers");
    assert!(session.status().unwrap().text.contains("word "));
}
