use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use swarna_core::{DetailView, Msg, QueryController, TabStorage};
use swarna_engine::{FileTabStorage, ReqwestSearchClient};
use swarna_logging::{swarna_debug, swarna_error, swarna_info};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui::commands::{self, Command};
use super::ui::constants::{BACK_HINT, HELP};
use super::ui::render;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run_app(config: &AppConfig) -> anyhow::Result<()> {
    let client = ReqwestSearchClient::new(config.client_settings())
        .context("invalid search service configuration")?;
    swarna_info!("Search service at {}", client.settings().base_url);
    let runner = EffectRunner::new(Arc::new(client)).context("cannot start search engine")?;

    let tab_id = std::process::id().to_string();
    let state_dir = config.state_dir();
    let storage = FileTabStorage::open(&state_dir, &tab_id)
        .with_context(|| format!("cannot open tab storage in {}", state_dir.display()))?;

    let input = spawn_input_reader();
    let mut app = App::new(storage, runner, io::stdout());
    app.start()?;

    loop {
        app.poll_engine()?;
        match input.recv_timeout(POLL_INTERVAL) {
            Ok(line) => {
                if app.handle_line(&line)? == Flow::Quit {
                    break;
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    // Tab storage does not outlive the tab.
    if let Some(storage) = app.finish() {
        if let Err(err) = storage.discard() {
            swarna_error!("Failed to discard tab storage: {}", err);
        }
    }
    Ok(())
}

fn spawn_input_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    swarna_error!("stdin read failed: {}", err);
                    break;
                }
            }
        }
    });
    rx
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

enum Page<S: TabStorage> {
    Search(QueryController<S>),
    /// The search page is unmounted while a detail is shown; only its
    /// storage survives.
    Detail { storage: S, detail: DetailView },
}

pub struct App<S: TabStorage, W: Write> {
    page: Option<Page<S>>,
    runner: EffectRunner,
    out: W,
}

impl<S: TabStorage, W: Write> App<S, W> {
    pub fn new(storage: S, runner: EffectRunner, out: W) -> Self {
        Self {
            page: Some(Page::Search(QueryController::mount(storage))),
            runner,
            out,
        }
    }

    pub fn start(&mut self) -> io::Result<()> {
        writeln!(self.out, "{HELP}")?;
        self.render_search(true)
    }

    /// Feeds finished remote work to the search page.
    pub fn poll_engine(&mut self) -> io::Result<()> {
        for msg in self.runner.drain() {
            match self.page.as_mut() {
                Some(Page::Search(controller)) => {
                    let effects = controller.dispatch(msg);
                    self.runner.run(effects);
                }
                _ => swarna_debug!("Search page unmounted; dropping {}", msg_name(&msg)),
            }
        }
        self.render_search(false)
    }

    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        match commands::parse(line) {
            Ok(command) => self.handle(command),
            Err(err) => {
                writeln!(self.out, "{err}")?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn handle(&mut self, command: Command) -> io::Result<Flow> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Blank => {}
            Command::Back => self.leave_detail()?,
            other => match self.page.as_mut() {
                Some(Page::Search(controller)) => {
                    let effects = match other {
                        Command::Search(query) => controller.submit(&query),
                        Command::Mode(mode) => controller.switch_mode(mode),
                        Command::NextPage => controller.next_page(),
                        Command::PrevPage => controller.prev_page(),
                        Command::Evaluate => controller.open_evaluation(),
                        Command::CloseEvaluation => controller.close_evaluation(),
                        Command::Reset => controller.reset(),
                        Command::Open(target) => {
                            let id = resolve_target(controller, &target);
                            let effects = controller.select(&id);
                            if effects.is_empty() {
                                writeln!(self.out, "Hasil tidak ditemukan: {target}")?;
                            }
                            effects
                        }
                        Command::Quit | Command::Help | Command::Blank | Command::Back => {
                            Vec::new()
                        }
                    };
                    if let Some(record) = self.runner.run(effects) {
                        self.enter_detail(DetailView::from_record(&record))?;
                    } else {
                        self.render_search(false)?;
                    }
                }
                _ => writeln!(self.out, "{BACK_HINT}")?,
            },
        }
        Ok(Flow::Continue)
    }

    /// Ends the tab and hands back its storage.
    pub fn finish(mut self) -> Option<S> {
        match self.page.take()? {
            Page::Search(controller) => Some(controller.unmount()),
            Page::Detail { storage, .. } => Some(storage),
        }
    }

    fn enter_detail(&mut self, detail: DetailView) -> io::Result<()> {
        match self.page.take() {
            Some(Page::Search(controller)) => {
                let storage = controller.unmount();
                self.page = Some(Page::Detail { storage, detail });
            }
            other => {
                self.page = other;
                return Ok(());
            }
        }
        if let Some(Page::Detail { detail, .. }) = self.page.as_ref() {
            write!(self.out, "{}", render::render_detail(detail))?;
        }
        self.out.flush()
    }

    fn leave_detail(&mut self) -> io::Result<()> {
        match self.page.take() {
            Some(Page::Detail { storage, detail }) => {
                swarna_debug!("Leaving detail for {:?}", detail.title);
                self.page = Some(Page::Search(QueryController::mount(storage)));
                self.render_search(true)
            }
            other => {
                self.page = other;
                writeln!(self.out, "Sudah di halaman pencarian.")
            }
        }
    }

    fn render_search(&mut self, force: bool) -> io::Result<()> {
        if let Some(Page::Search(controller)) = self.page.as_mut() {
            if controller.consume_dirty() || force {
                write!(self.out, "{}", render::render(&controller.view()))?;
                self.out.flush()?;
            }
        }
        Ok(())
    }
}

/// `buka 2` picks the second card on the visible page; anything else is an id.
fn resolve_target<S: TabStorage>(controller: &QueryController<S>, target: &str) -> String {
    let view = controller.view();
    target
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| view.cards.get(index))
        .map(|card| card.id.clone())
        .unwrap_or_else(|| target.to_string())
}

fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::SearchSucceeded { .. } => "SearchSucceeded",
        Msg::SearchFailed { .. } => "SearchFailed",
        Msg::EvaluationSucceeded { .. } => "EvaluationSucceeded",
        Msg::EvaluationFailed { .. } => "EvaluationFailed",
        _ => "Msg",
    }
}
