use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use dashboard_core::{update, AppState, AppViewModel, Msg};
use dashboard_logging::{dashboard_debug, dashboard_info, dashboard_warn};

use super::config::Args;
use super::effects::EffectRunner;
use super::file_input::load_csv;
use super::logging;
use super::ui::render::render;
use super::ui::result_item::ResultItem;

const FRAME_RULE: &str = "------------------------------------------------------------";
const PROMPT: &str = "Enter the path of a .csv file to upload, or `quit`.";

/// Everything the dispatch loop consumes.
pub(crate) enum AppInput {
    Msg(Msg),
    Quit,
}

pub fn run_app(args: Args) -> anyhow::Result<()> {
    logging::initialize(args.log);
    dashboard_info!("Dashboard starting against {}", args.base_url);

    let (input_tx, input_rx) = mpsc::channel::<AppInput>();
    let runner = EffectRunner::new(args.client_settings(), input_tx.clone())
        .with_context(|| format!("cannot use backend at {}", args.base_url))?;

    let exit_when_settled = match &args.csv {
        Some(path) => {
            let file = load_csv(path)?;
            let _ = input_tx.send(AppInput::Msg(Msg::FileSelected(file)));
            let _ = input_tx.send(AppInput::Msg(Msg::UploadSubmitted));
            true
        }
        None => {
            println!("{PROMPT}");
            spawn_stdin_reader(input_tx);
            false
        }
    };

    let stdout = io::stdout();
    let mut handler = AppEventHandler::new(runner, stdout.lock(), exit_when_settled);
    handler.run(input_rx)?;
    dashboard_info!("Dashboard closed");
    Ok(())
}

struct AppEventHandler<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
    exit_when_settled: bool,
}

impl<W: Write> AppEventHandler<W> {
    fn new(runner: EffectRunner, out: W, exit_when_settled: bool) -> Self {
        Self {
            state: AppState::new(),
            runner,
            out,
            exit_when_settled,
        }
    }

    fn run(&mut self, input_rx: mpsc::Receiver<AppInput>) -> io::Result<()> {
        let initial = self.state.view();
        self.render(&initial)?;

        while let Ok(first) = input_rx.recv() {
            // Coalesce everything already queued into one render.
            let mut quit = false;
            for input in std::iter::once(first).chain(input_rx.try_iter()) {
                match input {
                    AppInput::Msg(msg) => self.dispatch_msg(msg),
                    AppInput::Quit => quit = true,
                }
            }

            let view = self.state.view();
            if self.state.consume_dirty() {
                self.render(&view)?;
            }
            if quit || (self.exit_when_settled && view.is_settled()) {
                break;
            }
        }

        self.shutdown()
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn shutdown(&mut self) -> io::Result<()> {
        dashboard_debug!("Tearing down dashboard");
        self.dispatch_msg(Msg::Teardown);
        let view = self.state.view();
        if self.state.consume_dirty() {
            self.render(&view)?;
        }
        Ok(())
    }

    fn render(&mut self, view: &AppViewModel) -> io::Result<()> {
        write_frame(&mut self.out, &render(view, &ResultItem))
    }
}

fn write_frame<W: Write>(out: &mut W, lines: &[String]) -> io::Result<()> {
    writeln!(out, "{FRAME_RULE}")?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

/// Each non-empty stdin line selects that CSV and submits the form.
fn spawn_stdin_reader(tx: mpsc::Sender<AppInput>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.eq_ignore_ascii_case("quit") {
                break;
            }
            match load_csv(Path::new(line)) {
                Ok(file) => {
                    let selected = tx.send(AppInput::Msg(Msg::FileSelected(file)));
                    let submitted = tx.send(AppInput::Msg(Msg::UploadSubmitted));
                    if selected.is_err() || submitted.is_err() {
                        return;
                    }
                }
                Err(err) => {
                    dashboard_warn!("File selection rejected: {}", err);
                    eprintln!("{err}");
                }
            }
        }
        let _ = tx.send(AppInput::Quit);
    });
}
