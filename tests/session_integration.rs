//! End-to-end editing through the public message API.

use prodios::app::{App, Message, update};
use prodios::editor::{Key, Motion, Selection};
use prodios::session::{Session, SessionError};

fn type_str(model: prodios::app::Model, text: &str) -> prodios::app::Model {
    text.chars()
        .fold(model, |model, ch| update(model, Message::KeyDown(Key::Char(ch))))
}

#[test]
fn test_two_tab_editing_session() {
    let model = App::new()
        .with_file_names(vec!["page.tsx".to_string(), "Header.tsx".to_string()])
        .initial_model((80, 24));
    let header = model.session.active_id().unwrap();
    let page = model.session.tabs()[0].id();

    let model = type_str(model, "export function Header(");
    let model = update(model, Message::MoveCaret(Motion::LineEnd, false));
    let model = type_str(model, " {");
    let model = update(model, Message::KeyDown(Key::Enter));
    let model = update(model, Message::KeyDown(Key::Tab));
    let model = type_str(model, "return null;");

    let header_text = model.session.get(header).unwrap().buffer().text().to_string();
    assert_eq!(header_text, "export function Header() {\n  return null;}");

    let model = update(model, Message::RequestTabActivate(page));
    let model = type_str(model, "[");
    let snapshot = model.session.snapshot();
    let active = snapshot.active.unwrap();
    assert_eq!(active.text, "[]");
    assert_eq!(active.selection, Selection::caret(1));
    assert_eq!(active.language_id, "tsx");
    assert_eq!(model.session.get(header).unwrap().buffer().text(), header_text);
}

#[test]
fn test_conflict_flow_leaves_session_untouched() {
    let model = App::new()
        .with_file_names(vec!["a.ts".to_string()])
        .initial_model((80, 24));
    let before = model.session.snapshot();

    let model = update(model, Message::OpenNewFilePrompt);
    let model = update(model, Message::PromptInput("a.ts".to_string()));
    let model = update(model, Message::PromptSubmit);
    assert!(model.conflict_visible);
    assert_eq!(model.session.snapshot(), before);

    let model = update(model, Message::DismissConflict);
    assert!(!model.conflict_visible);
}

#[test]
fn test_session_errors_are_descriptive() {
    let mut session = Session::new();
    let id = session.create("a.ts").unwrap();
    let err = session.create("a.ts").unwrap_err();
    assert_eq!(
        err,
        SessionError::NameConflict {
            name: "a.ts".to_string()
        }
    );
    assert_eq!(err.to_string(), "a file named \"a.ts\" is already open");

    session.close(id);
    assert_eq!(
        session.activate(id).unwrap_err().to_string(),
        format!("no open tab with id {id}")
    );
}

#[test]
fn test_order_is_never_renumbered() {
    let mut session = Session::new();
    let a = session.create("a.ts").unwrap();
    session.create("b.ts").unwrap();
    session.close(a);
    session.create("c.ts").unwrap();
    let orders: Vec<u64> = session.tabs().iter().map(|tab| tab.order()).collect();
    assert_eq!(orders, vec![2, 3]);
}
