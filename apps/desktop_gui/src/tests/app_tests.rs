use super::*;

use std::{
    sync::{Arc, Mutex},
    thread,
};

use crossbeam_channel::bounded;
use serial_link::OpenFailureKind;
use shared::LedIndex;

#[derive(Clone, Default)]
struct RecordingNotifier {
    notices: Arc<Mutex<Vec<(&'static str, String)>>>,
}

impl RecordingNotifier {
    fn notices(&self) -> Vec<(&'static str, String)> {
        self.notices.lock().expect("notices").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, description: &str) {
        self.notices
            .lock()
            .expect("notices")
            .push(("info", description.to_string()));
    }

    fn error(&self, description: &str) {
        self.notices
            .lock()
            .expect("notices")
            .push(("error", description.to_string()));
    }
}

struct TestApp {
    app: PingPongApp,
    ctx: egui::Context,
    cmd_rx: Receiver<LinkCommand>,
    events: Sender<LinkEvent>,
    notifier: RecordingNotifier,
}

impl TestApp {
    fn new() -> Self {
        let (cmd_tx, cmd_rx) = bounded(16);
        let (events, ui_rx) = bounded(16);
        let notifier = RecordingNotifier::default();
        let app = PingPongApp::new(cmd_tx, ui_rx, thread::spawn(|| {}), "COM4".to_string())
            .with_notifier(Box::new(notifier.clone()));
        Self {
            app,
            ctx: egui::Context::default(),
            cmd_rx,
            events,
            notifier,
        }
    }

    fn push(&self, event: LinkEvent) {
        self.events.send(event).expect("queue event");
    }

    /// Runs one frame of `f`; returns true when the frame asked to close the window.
    fn frame(&mut self, mut f: impl FnMut(&mut PingPongApp, &egui::Context)) -> bool {
        let app = &mut self.app;
        let output = self.ctx.run(egui::RawInput::default(), |ctx| f(app, ctx));
        output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .is_some_and(|viewport| {
                viewport
                    .commands
                    .iter()
                    .any(|cmd| matches!(cmd, egui::ViewportCommand::Close))
            })
    }

    fn process(&mut self) -> bool {
        self.frame(|app, ctx| app.process_link_events(ctx))
    }
}

#[test]
fn lines_before_started_are_dropped() {
    let mut t = TestApp::new();
    t.push(LinkEvent::Line("3".to_string()));
    t.process();
    assert_eq!(t.app.state.active_led(), None);
    assert!(!t.app.state.is_running());

    t.push(LinkEvent::Started);
    t.push(LinkEvent::Line("3".to_string()));
    t.process();
    assert!(t.app.state.is_running());
    assert_eq!(t.app.state.active_led(), LedIndex::new(2));
}

#[test]
fn launch_open_shows_the_port_notice() {
    let mut t = TestApp::new();
    t.push(LinkEvent::Opened {
        port_name: "COM4".to_string(),
        context: OpenContext::Launch,
    });
    t.push(LinkEvent::Opened {
        port_name: "COM4".to_string(),
        context: OpenContext::Start,
    });
    t.process();
    assert_eq!(
        t.notifier.notices(),
        vec![("info", "COM4 port is open.".to_string())]
    );
}

#[test]
fn open_failure_notifies_and_leaves_the_game_idle() {
    let mut t = TestApp::new();
    t.push(LinkEvent::OpenFailed {
        context: OpenContext::Start,
        kind: OpenFailureKind::MissingDevice,
        message: "COM4: not found".to_string(),
    });
    let closed = t.process();

    assert!(!closed);
    assert_eq!(t.app.state, GameState::default());
    assert_eq!(
        t.notifier.notices(),
        vec![("error", "Unable to open serial port: COM4: not found".to_string())]
    );
    assert!(t.app.status.contains("check that the board is plugged in"));
}

#[test]
fn closed_only_closes_the_window_after_end() {
    let mut t = TestApp::new();
    t.push(LinkEvent::Closed);
    assert!(!t.process());

    t.push(LinkEvent::Started);
    t.push(LinkEvent::Line("1".to_string()));
    t.process();
    assert_eq!(t.app.state.active_led(), LedIndex::new(0));

    assert!(!t.frame(|app, ctx| app.end_game(ctx)));
    assert_eq!(t.cmd_rx.try_recv(), Ok(LinkCommand::Stop));
    assert_eq!(t.app.state.active_led(), None);

    t.push(LinkEvent::Closed);
    assert!(t.process());
}

#[test]
fn started_after_end_is_ignored() {
    let mut t = TestApp::new();
    t.frame(|app, ctx| app.end_game(ctx));

    t.push(LinkEvent::Started);
    t.push(LinkEvent::Line("5".to_string()));
    t.process();
    assert!(!t.app.state.is_running());
    assert_eq!(t.app.state.active_led(), None);

    t.frame(|app, _| app.start_game());
    assert_eq!(t.cmd_rx.try_recv(), Ok(LinkCommand::Stop));
    assert!(t.cmd_rx.try_recv().is_err(), "start is refused while closing");
}

#[test]
fn end_closes_at_once_when_the_worker_is_gone() {
    let mut t = TestApp::new();
    drop(std::mem::replace(&mut t.cmd_rx, crossbeam_channel::never()));

    assert!(t.frame(|app, ctx| app.end_game(ctx)));
    assert!(t.app.status.contains("stopped"));
}
