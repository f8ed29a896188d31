use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Context;
use browser_core::{update, AppState, Effect, ErrorDialog, LoadStatus, Msg};
use browser_logging::{browser_debug, browser_error, browser_info, browser_warn};
use url::Url;

use super::config::ShellConfig;
use super::effects::EffectRunner;
use super::ui::input::{Command, DialogChoice};
use super::ui::Terminal;

const COMPLETION_POLL: Duration = Duration::from_millis(250);

pub fn run_app() -> anyhow::Result<()> {
    let config = ShellConfig::from_args();
    browser_logging::initialize(config.log_destination.clone(), config.log_level);
    browser_info!("Starting with manifest {}", config.manifest_url);

    let runner = EffectRunner::new(config.fetch.clone()).context("starting load coordinator")?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let terminal = Terminal::new(stdin.lock(), stdout.lock());

    Shell::new(AppState::new(config.manifest_url), runner, terminal).run()
}

/// Foreground loop: feeds user input and load completions into `update`
/// and carries out the resulting effects.
struct Shell<R, W> {
    state: AppState,
    runner: EffectRunner,
    terminal: Terminal<R, W>,
    dialog: Option<ErrorDialog>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    fn new(state: AppState, runner: EffectRunner, terminal: Terminal<R, W>) -> Self {
        Self {
            state,
            runner,
            terminal,
            dialog: None,
        }
    }

    fn run(&mut self) -> anyhow::Result<()> {
        self.dispatch(Msg::LoadRequested)?;
        loop {
            let msg = if let Some(dialog) = self.dialog.take() {
                match self.terminal.show_error(&dialog)? {
                    Some(DialogChoice::Retry) => Msg::RetryClicked,
                    Some(DialogChoice::Next) => Msg::NextClicked,
                    Some(DialogChoice::Dismiss) => Msg::DismissClicked,
                    None => return Ok(()),
                }
            } else if self.state.status() == LoadStatus::Loading {
                if self.runner.in_flight() == 0 {
                    browser_error!("Load marked in progress but nothing is in flight");
                    anyhow::bail!("load marked in progress but nothing is in flight");
                }
                match self.runner.wait_for_completion(COMPLETION_POLL) {
                    Some(msg) => msg,
                    None => continue,
                }
            } else {
                match self.terminal.prompt_command()? {
                    Some(Command::Open(index)) => Msg::EntrySelected(index),
                    Some(Command::Reload) => Msg::LoadRequested,
                    Some(Command::Quit) | None => return Ok(()),
                }
            };
            self.dispatch(msg)?;
        }
    }

    fn dispatch(&mut self, msg: Msg) -> anyhow::Result<()> {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (mut state, effects) = update(state, msg);
            if state.consume_dirty() {
                browser_debug!("Status {:?}, {} entries", state.status(), state.entries().len());
            }
            self.state = state;

            for effect in effects {
                match effect {
                    Effect::DisplayEntries(entries) => self.terminal.display_entries(&entries)?,
                    Effect::ShowError(dialog) => self.dialog = Some(dialog),
                    Effect::OpenUrl { name, url } => self.open(&name, &url)?,
                    engine_effect => {
                        if matches!(engine_effect, Effect::SubmitUrl { .. } | Effect::Resubmit { .. }) {
                            self.terminal.status("Loading...")?;
                        }
                        inbox.extend(self.runner.run(engine_effect));
                    }
                }
            }
        }
        Ok(())
    }

    fn open(&mut self, name: &str, url: &str) -> io::Result<()> {
        match Url::parse(url) {
            Ok(parsed) => {
                browser_info!("Opening {} at {}", name, parsed);
                self.terminal.status(&format!("Opening {name}: {parsed}"))
            }
            Err(err) => {
                // Handed on as-is; the viewer decides what to do with it.
                browser_warn!("Entry {} has an unparsable url {:?}: {}", name, url, err);
                self.terminal.status(&format!("Opening {name}: {url}"))
            }
        }
    }
}
