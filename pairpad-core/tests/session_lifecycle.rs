//! Integration test for the editor session.
//!
//! Exercises: send (write_file, show_diff, echo), snapshot, compare, and the
//! pure `apply` transition through the public API.

use pairpad_core::session::{ECHO_HINT, SNAPSHOT_ACK, STARTER_CODE};
use pairpad_core::{Action, ChatMessage, DiffLineKind, EditorSession, Role};

fn has_change_lines(diff: &str) -> bool {
    diff.lines().any(|l| l.starts_with(['+', '-']))
}

#[test]
fn full_session_lifecycle() {
    let mut session = EditorSession::new();
    assert_eq!(session.code(), STARTER_CODE);
    assert_eq!(session.language(), "typescript");

    // Write a file with an explicit language
    session.send(r#"{"tool":"write_file","content":"X","language":"go"}"#);
    assert_eq!(session.code(), "X", "buffer should be replaced");
    assert_eq!(session.language(), "go", "language should follow the call");
    let reply = &session.messages()[1];
    assert_eq!(reply.role, Role::Assistant);
    assert!(
        reply.content.contains("Wrote 1 chars (lang: go)"),
        "unexpected reply: {}",
        reply.content
    );

    // Plain chat is echoed
    session.send("not json");
    let reply = session.messages().last().unwrap();
    assert!(reply.content.starts_with("You said: not json"));
    assert!(reply.content.ends_with(ECHO_HINT));
    assert_eq!(session.code(), "X", "echo must not touch the buffer");

    // Snapshot then compare with no edits in between
    session.snapshot();
    assert_eq!(session.messages().last().unwrap().content, SNAPSHOT_ACK);
    let before = session.messages().len();
    session.compare();
    assert_eq!(session.messages().len(), before, "compare appends no message");
    assert!(!session.diff_text().is_empty());
    assert!(!has_change_lines(session.diff_text()), "no edits -> no +/- lines");

    // Edit, then compare again
    session.send(r#"{"tool":"write_file","content":"Y"}"#);
    session.compare();
    assert_eq!(session.diff_text(), "@@ -1,1 +1,1 @@\n-X\n+Y\n");
    let kinds: Vec<DiffLineKind> = session.diff_lines().iter().map(|l| l.kind).collect();
    assert_eq!(
        kinds,
        vec![DiffLineKind::Meta, DiffLineKind::Del, DiffLineKind::Add, DiffLineKind::Context]
    );

    // Every send appended exactly one user entry followed by one reply
    let roles: Vec<Role> = session.messages().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant,
            Role::Assistant,
            Role::User,
            Role::Assistant,
        ]
    );
}

#[test]
fn show_diff_replaces_previous_diff() {
    let mut session = EditorSession::new();
    session.send(r#"{"tool":"show_diff","from":"a","to":"a\nb"}"#);
    assert!(session.diff_text().contains("\n+b\n"));
    assert_eq!(session.messages()[1].content, "Showing diff for snippet.ts.");

    session.send(r#"{"tool":"show_diff","from":"console.log('a')","to":"console.log('b')","file":"demo.ts"}"#);
    assert_eq!(
        session.diff_text(),
        "@@ -1,1 +1,1 @@\n-console.log('a')\n+console.log('b')\n"
    );
    assert_eq!(session.messages()[3].content, "Showing diff for demo.ts.");
    assert_eq!(session.code(), STARTER_CODE, "show_diff never writes the buffer");
}

#[test]
fn apply_returns_appended_messages() {
    let session = EditorSession::new();

    let (session, appended) = session.apply(Action::Send("hello".to_owned()));
    assert_eq!(
        appended,
        vec![
            ChatMessage::user("hello"),
            ChatMessage::assistant(format!("You said: hello\n{ECHO_HINT}")),
        ]
    );

    let (session, appended) = session.apply(Action::Snapshot);
    assert_eq!(appended, vec![ChatMessage::assistant(SNAPSHOT_ACK)]);

    let (session, appended) = session.apply(Action::Compare);
    assert!(appended.is_empty());
    assert!(session.diff_text().starts_with("@@ -1,5 +1,5 @@\n"));
    assert_eq!(session.messages().len(), 3);
}

#[test]
fn chat_messages_serialize_with_lowercase_roles() {
    let json = serde_json::to_string(&ChatMessage::assistant("hi")).unwrap();
    assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
}
