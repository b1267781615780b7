//! End-to-end scenario: a posture machine driven by triggers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use machina::{DiagnosticSink, Machine, NoteDirection, UmlDirection};

machina::id_enum! {
    enum Posture {
        Standing,
        Sitting,
        Lying,
        Jumping,
    }
}

machina::id_enum! {
    enum Input {
        Down,
        Up,
        Space,
    }
}

type Log = Rc<RefCell<Vec<String>>>;

/// Sink collecting diagnostics for assertions.
#[derive(Default)]
struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn warn(&self, message: &str) {
        self.messages.lock().unwrap().push(format!("warn: {message}"));
    }

    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(format!("error: {message}"));
    }
}

fn scenario(cond: &Rc<Cell<bool>>, log: &Log) -> Machine<Posture, Input> {
    let mut builder = Machine::builder(Posture::Standing).state(Posture::Standing);
    for posture in [
        Posture::Standing,
        Posture::Sitting,
        Posture::Lying,
        Posture::Jumping,
    ] {
        let enter = log.clone();
        let exit = log.clone();
        builder = builder
            .state(posture)
            .on_enter(move |_| enter.borrow_mut().push(format!("enter {posture}")))
            .on_exit(move |_| exit.borrow_mut().push(format!("exit {posture}")));
    }

    let flag = cond.clone();
    let changed = log.clone();
    builder
        .state(Posture::Standing)
        .to(Posture::Sitting)
        .on(Input::Down)
        .to(Posture::Jumping)
        .on(Input::Space)
        .guard(move |_, _| flag.get())
        .state(Posture::Sitting)
        .to(Posture::Lying)
        .on(Input::Down)
        .to(Posture::Standing)
        .on(Input::Up)
        .state(Posture::Lying)
        .to(Posture::Sitting)
        .on(Input::Up)
        .state(Posture::Jumping)
        .to(Posture::Standing)
        .on(Input::Down)
        .build_with(move |change| {
            changed
                .borrow_mut()
                .push(format!("changed {} -> {}", change.from, change.to))
        })
        .unwrap()
}

#[test]
fn machine_starts_at_the_initial_state() {
    let cond = Rc::new(Cell::new(false));
    let log = Log::default();
    let machine = scenario(&cond, &log);

    assert_eq!(machine.current_state().id(), machine.initial_state().id());
    assert_eq!(machine.current_state().id(), &Posture::Standing);
    assert!(machine.history().is_empty());
}

#[test]
fn guarded_jump_fires_only_when_the_flag_is_set() {
    let cond = Rc::new(Cell::new(false));
    let log = Log::default();
    let mut machine = scenario(&cond, &log);

    assert!(!machine.fire(Input::Space));
    assert_eq!(machine.current_state().id(), &Posture::Standing);
    assert!(log.borrow().is_empty());

    cond.set(true);
    assert!(machine.fire(Input::Space));
    assert_eq!(machine.current_state().id(), &Posture::Jumping);
    assert_eq!(
        *log.borrow(),
        vec![
            "exit Standing".to_string(),
            "enter Jumping".to_string(),
            "changed Standing -> Jumping".to_string(),
        ]
    );
}

#[test]
fn postures_walk_the_declared_edges() {
    let cond = Rc::new(Cell::new(false));
    let log = Log::default();
    let mut machine = scenario(&cond, &log);

    for input in [Input::Down, Input::Down, Input::Up, Input::Up] {
        assert!(machine.fire(input));
    }

    assert_eq!(machine.current_state().id(), &Posture::Standing);
    let path: Vec<String> = machine
        .history()
        .path()
        .iter()
        .map(|posture| posture.to_string())
        .collect();
    assert_eq!(path, vec!["Standing", "Sitting", "Lying", "Sitting", "Standing"]);
    assert_eq!(machine.history().records()[0].trigger, Some(Input::Down));
}

#[test]
fn rejected_triggers_leave_no_trace() {
    let cond = Rc::new(Cell::new(false));
    let log = Log::default();
    let mut machine = scenario(&cond, &log);

    // Up has no edge out of Standing.
    assert!(!machine.fire(Input::Up));
    assert_eq!(machine.current_state().id(), &Posture::Standing);
    assert!(log.borrow().is_empty());
    assert!(machine.history().is_empty());
}

#[test]
fn diagram_reflects_the_topology() {
    let cond = Rc::new(Cell::new(false));
    let log = Log::default();
    let machine = scenario(&cond, &log);

    let uml = machine.uml(UmlDirection::TopToBottom, Some("postures"));
    assert!(uml.contains("title postures\n"));
    assert!(uml.contains("top to bottom direction\n"));
    assert!(uml.contains("agent Standing\n"));
    assert!(uml.contains("Start --> Standing\n"));
    assert!(uml.contains("Standing --> Sitting : Down\n"));
    assert!(uml.contains("Standing ~~> Jumping : Space\n"));

    assert_eq!(uml, machine.uml(UmlDirection::TopToBottom, Some("postures")));
}

#[test]
fn post_build_notes_render() {
    let cond = Rc::new(Cell::new(false));
    let log = Log::default();
    let mut machine = scenario(&cond, &log);

    machine
        .add_note(&Posture::Sitting, "resting here", NoteDirection::Right)
        .unwrap();
    let uml = machine.uml(UmlDirection::LeftToRight, None);
    assert!(uml.contains("note right of Sitting\nresting here\nend note\n"));
}

#[test]
fn diagnostics_report_suppressed_and_unknown_transitions() {
    let sink = Arc::new(RecordingSink::default());
    let mut machine: Machine<Posture, Input> = Machine::builder(Posture::Standing)
        .sink(sink.clone())
        .state(Posture::Standing)
        .build()
        .unwrap();

    // Self-transition: suppressed with a warning, no error.
    machine.go_to(Posture::Standing).unwrap();
    // Sitting was never declared on this machine.
    assert!(machine.go_to(Posture::Sitting).is_err());
    assert_eq!(machine.current_state().id(), &Posture::Standing);

    let messages = sink.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("warn:"));
    assert!(messages[1].starts_with("error:"));
}
