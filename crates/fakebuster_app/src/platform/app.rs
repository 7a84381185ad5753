use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use fakebuster_core::{
    update, AnalysisOutcome, AnalysisResult, AppState, Generation, LifecycleStatus, Msg,
};
use fakebuster_engine::{ClassifyError, ClientSettings, EngineEvent};
use fakebuster_logging::{fb_debug, fb_info};

use super::effects::EffectRunner;
use super::input::{append_line, parse_line, InputCommand, HELP};
use super::logging::{self, LogDestination};
use super::ui;

/// Everything the main loop reacts to, from the stdin reader and the engine.
pub enum Inbox {
    Input(InputCommand),
    InputClosed,
    Engine(EngineEvent),
}

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::from_env());

    let settings = ClientSettings::from_env().context("invalid backend configuration")?;
    fb_info!("Using backend {}", settings.base_url);

    let (inbox_tx, inbox_rx) = mpsc::channel::<Inbox>();
    let runner = EffectRunner::new(settings, inbox_tx.clone())
        .context("failed to start the classification engine")?;
    spawn_stdin_reader(inbox_tx).context("failed to start the input reader")?;

    let mut app = App::new(runner);
    app.print(&["FakeBuster: paste a news article (any language) and check if it's real or fake."]);
    app.print(HELP);
    app.render(true);

    for inbox in inbox_rx {
        if app.handle(inbox) == Flow::Exit {
            break;
        }
    }
    fb_info!("Exiting");
    Ok(())
}

fn spawn_stdin_reader(inbox: mpsc::Sender<Inbox>) -> io::Result<()> {
    thread::Builder::new()
        .name("fakebuster-stdin".into())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if inbox.send(Inbox::Input(parse_line(&line))).is_err() {
                    return;
                }
            }
            let _ = inbox.send(Inbox::InputClosed);
        })?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Once stdin is closed the loop only stays up for an in-flight request.
fn next_flow(draining: bool, status: LifecycleStatus) -> Flow {
    if draining && status != LifecycleStatus::Submitting {
        Flow::Exit
    } else {
        Flow::Continue
    }
}

fn completion_msg(generation: Generation, result: Result<AnalysisResult, ClassifyError>) -> Msg {
    let outcome = match result {
        Ok(result) => AnalysisOutcome::Succeeded(result),
        Err(err) => AnalysisOutcome::Failed {
            reason: err.to_string(),
        },
    };
    Msg::AnalysisCompleted {
        generation,
        outcome,
    }
}

struct App {
    state: AppState,
    runner: EffectRunner,
    last_rendered: Vec<String>,
    /// Stdin is gone; leave once nothing is in flight.
    draining: bool,
}

impl App {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            last_rendered: Vec::new(),
            draining: false,
        }
    }

    fn handle(&mut self, inbox: Inbox) -> Flow {
        match inbox {
            Inbox::Input(command) => return self.handle_command(command),
            Inbox::InputClosed => {
                fb_debug!("stdin closed");
                self.draining = true;
            }
            Inbox::Engine(EngineEvent::AnalysisCompleted { generation, result }) => {
                if self.state.is_current(generation) {
                    self.dispatch(completion_msg(generation, result));
                } else {
                    fb_debug!(
                        "Discarding stale response for generation {} (current {})",
                        generation,
                        self.state.generation()
                    );
                }
            }
            Inbox::Engine(EngineEvent::RelatedNewsCompleted { query, result }) => {
                self.print(&ui::render::render_related(&query, &result));
            }
        }

        next_flow(self.draining, self.state.status())
    }

    fn handle_command(&mut self, command: InputCommand) -> Flow {
        match command {
            InputCommand::Append(line) => {
                let text = append_line(self.state.article(), &line);
                self.dispatch(Msg::ArticleChanged(text));
            }
            InputCommand::Check => self.dispatch(Msg::SubmitClicked),
            InputCommand::Clear => self.dispatch(Msg::ClearClicked),
            InputCommand::Related(query) => self.runner.related_news(query),
            InputCommand::Show => {
                self.print(&ui::render::render_article(&self.state.view()));
                self.render(true);
            }
            InputCommand::Help => self.print(HELP),
            InputCommand::Unknown(raw) => {
                self.print(&[format!("Unknown command {raw:?}; try :help")]);
            }
            InputCommand::Quit => return Flow::Exit,
        }
        Flow::Continue
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        self.runner.run(effects);
        if was_dirty {
            self.render(false);
        }
    }

    /// Prints the status panel when it differs from the last one shown.
    fn render(&mut self, force: bool) {
        let lines = ui::render::render(&self.state.view());
        if force || lines != self.last_rendered {
            self.print(&lines);
            self.last_rendered = lines;
        }
    }

    fn print<S: AsRef<str>>(&self, lines: &[S]) {
        let mut out = io::stdout().lock();
        for line in lines {
            let _ = writeln!(out, "{}", line.as_ref());
        }
        let _ = out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fakebuster_engine::FailureKind;

    fn result() -> AnalysisResult {
        AnalysisResult {
            verdict: "REAL".into(),
            detected_language: "en".into(),
            confidence: "0.8".into(),
            matches: Vec::new(),
        }
    }

    #[test]
    fn loop_waits_for_in_flight_request_after_eof() {
        assert_eq!(next_flow(true, LifecycleStatus::Submitting), Flow::Continue);
        assert_eq!(next_flow(true, LifecycleStatus::Idle), Flow::Exit);
        assert_eq!(next_flow(true, LifecycleStatus::Succeeded), Flow::Exit);
        assert_eq!(next_flow(true, LifecycleStatus::Failed), Flow::Exit);
        assert_eq!(next_flow(false, LifecycleStatus::Idle), Flow::Continue);
    }

    #[test]
    fn successful_completion_carries_result() {
        assert_eq!(
            completion_msg(3, Ok(result())),
            Msg::AnalysisCompleted {
                generation: 3,
                outcome: AnalysisOutcome::Succeeded(result()),
            }
        );
    }

    #[test]
    fn failed_completion_keeps_reason_for_logs() {
        let err = ClassifyError {
            kind: FailureKind::HttpStatus(502),
            message: "502 Bad Gateway".into(),
        };
        assert_eq!(
            completion_msg(4, Err(err)),
            Msg::AnalysisCompleted {
                generation: 4,
                outcome: AnalysisOutcome::Failed {
                    reason: "http status 502: 502 Bad Gateway".into(),
                },
            }
        );
    }

    #[test]
    fn drain_ends_once_the_pending_response_settles() {
        let (state, _) = update(AppState::new(), Msg::ArticleChanged("story".into()));
        let (state, _) = update(state, Msg::SubmitClicked);
        assert_eq!(next_flow(true, state.status()), Flow::Continue);

        let (state, _) = update(state, completion_msg(1, Ok(result())));
        assert_eq!(next_flow(true, state.status()), Flow::Exit);
    }

    #[test]
    fn stale_completion_is_not_current() {
        let (state, _) = update(AppState::new(), Msg::ArticleChanged("story".into()));
        let (state, _) = update(state, Msg::SubmitClicked);
        let (state, _) = update(state, Msg::SubmitClicked);
        assert!(!state.is_current(1));
        assert!(state.is_current(2));
    }
}
