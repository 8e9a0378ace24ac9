use std::io;

use crossterm::tty::IsTty;
use tasklist::config::Config;
use tasklist::signals;
use tasklist::store::FileStore;
use tasklist::task_list::TaskList;
use tasklist::ui;
use tracing::{error, warn};

fn main() {
    if Config::debug_logging() {
        tracing_subscriber::fmt()
            .with_env_filter("tasklist=debug")
            .with_writer(io::stderr)
            .init();
    }

    if let Err(err) = signals::install_interrupt_handler() {
        warn!(error = %err, "Could not install Ctrl-C handler");
    }

    let config = Config::default();
    let mut list = match TaskList::load(&config) {
        Ok(list) => list,
        Err(err) => {
            error!(path = %config.tasks_file().display(), error = %err, "Loading tasks failed");
            println!("An error occurred while loading tasks: {err}");
            TaskList::new(FileStore::new(config.tasks_file()))
        }
    };

    let stdout = io::stdout();
    let color = stdout.is_tty();
    if let Err(err) = ui::run_app(io::stdin().lock(), stdout, color, &mut list) {
        error!(error = %err, "Console I/O failed");
        eprintln!("An error occurred: {err}");
    }
}
