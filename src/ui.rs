use crate::signals;
use crate::task_list::TaskList;
use crossterm::style::Stylize;
use std::io::{self, BufRead, ErrorKind, Write};
use tracing::warn;

const EXIT_HINT: &str = "Please select 'exit' in the menu if you wish to exit the program.";

/// Consecutive failed reads (end of input or I/O errors) tolerated before
/// the stream counts as closed.
const MAX_EOF_RETRIES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ShowTasks,
    AddTask,
    CompleteTask,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 4] = [
        MenuAction::ShowTasks,
        MenuAction::AddTask,
        MenuAction::CompleteTask,
        MenuAction::Exit,
    ];

    pub fn from_selection(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuAction::ShowTasks),
            "2" => Some(MenuAction::AddTask),
            "3" => Some(MenuAction::CompleteTask),
            "4" => Some(MenuAction::Exit),
            _ => None,
        }
    }

    pub fn key(self) -> usize {
        match self {
            MenuAction::ShowTasks => 1,
            MenuAction::AddTask => 2,
            MenuAction::CompleteTask => 3,
            MenuAction::Exit => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::ShowTasks => "show tasks",
            MenuAction::AddTask => "add task",
            MenuAction::CompleteTask => "complete task",
            MenuAction::Exit => "exit",
        }
    }
}

/// Outcome of reading one line from the user.
enum Input {
    Line(String),
    Eof,
    Interrupted,
    Failed(io::Error),
}

/// Read up to and including the next `\n`.
///
/// Unlike `BufRead::read_until` this does not retry on `Interrupted`, so a
/// Ctrl-C during a blocked read reaches the caller.
fn read_raw_line<R: BufRead>(input: &mut R, buf: &mut Vec<u8>) -> io::Result<usize> {
    let mut read = 0;
    loop {
        let available = input.fill_buf()?;
        if available.is_empty() {
            return Ok(read);
        }
        let (done, used) = match available.iter().position(|b| *b == b'\n') {
            Some(i) => {
                buf.extend_from_slice(&available[..=i]);
                (true, i + 1)
            }
            None => {
                buf.extend_from_slice(available);
                (false, available.len())
            }
        };
        input.consume(used);
        read += used;
        if done {
            return Ok(read);
        }
    }
}

struct Console<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn alert(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    fn prompt(&mut self, message: &str) -> io::Result<Input> {
        if signals::take_interrupt() {
            writeln!(self.output)?;
            return Ok(Input::Interrupted);
        }
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut raw = Vec::new();
        match read_raw_line(&mut self.input, &mut raw) {
            Ok(0) => {
                writeln!(self.output)?;
                Ok(Input::Eof)
            }
            Ok(_) => {
                let line = String::from_utf8_lossy(&raw);
                Ok(Input::Line(line.trim_end_matches(['\n', '\r']).to_string()))
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => {
                signals::take_interrupt();
                writeln!(self.output)?;
                Ok(Input::Interrupted)
            }
            Err(e) => {
                writeln!(self.output)?;
                Ok(Input::Failed(e))
            }
        }
    }

    /// Tell the user why no answer was read.
    fn report_missing(&mut self, input: &Input) -> io::Result<()> {
        match input {
            Input::Line(_) => Ok(()),
            Input::Eof => writeln!(self.output, "No more input. {EXIT_HINT}"),
            Input::Interrupted => writeln!(self.output, "Program interrupted. {EXIT_HINT}"),
            Input::Failed(e) => {
                warn!(error = %e, "Reading input failed");
                writeln!(self.output, "An error occurred: {e}")
            }
        }
    }

    /// Prompt for a field inside an action. `None` means the action should
    /// be abandoned and control returned to the menu.
    fn prompt_field(&mut self, message: &str) -> io::Result<Option<String>> {
        match self.prompt(message)? {
            Input::Line(line) => Ok(Some(line)),
            other => {
                self.report_missing(&other)?;
                Ok(None)
            }
        }
    }
}

/// Run the menu loop until the user picks exit or input is exhausted.
///
/// `color` turns on terminal styling; pass `false` when `output` is not a tty.
pub fn run_app<R: BufRead, W: Write>(
    input: R,
    output: W,
    color: bool,
    list: &mut TaskList,
) -> io::Result<()> {
    let mut console = Console {
        input,
        output,
        color,
    };

    for line in list.skipped() {
        writeln!(console.output, "Skipping invalid task entry: {line}")?;
    }

    loop {
        print_main_menu(&mut console)?;
        let Some(action) = read_selection(&mut console)? else {
            writeln!(console.output, "{EXIT_HINT}")?;
            return Ok(());
        };

        let keep_running = match action {
            MenuAction::ShowTasks => show_tasks(&mut console, list)?,
            MenuAction::AddTask => add_task(&mut console, list)?,
            MenuAction::CompleteTask => complete_task(&mut console, list)?,
            MenuAction::Exit => exit_program(&mut console)?,
        };
        if !keep_running {
            return Ok(());
        }
    }
}

fn print_main_menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<()> {
    let title = console.heading("== TODO LIST ==");
    writeln!(console.output, "{title}")?;
    for action in MenuAction::ALL {
        writeln!(console.output, "[{}] {}", action.key(), action.label())?;
    }
    Ok(())
}

/// Keep asking until a valid action is picked. `None` means input is gone.
fn read_selection<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> io::Result<Option<MenuAction>> {
    let mut failures = 0;
    loop {
        let line = match console.prompt("Your selection: ")? {
            Input::Line(line) => line,
            Input::Interrupted => {
                console.report_missing(&Input::Interrupted)?;
                continue;
            }
            other => {
                failures += 1;
                console.report_missing(&other)?;
                if failures >= MAX_EOF_RETRIES {
                    return Ok(None);
                }
                continue;
            }
        };

        failures = 0;
        writeln!(console.output)?;
        match MenuAction::from_selection(&line) {
            Some(action) => return Ok(Some(action)),
            None => {
                let keys: Vec<usize> = MenuAction::ALL.iter().map(|a| a.key()).collect();
                writeln!(
                    console.output,
                    "Invalid selection. Please choose a valid option. {keys:?}"
                )?;
            }
        }
    }
}

fn show_tasks<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    list: &TaskList,
) -> io::Result<bool> {
    writeln!(console.output, "{list}")?;
    Ok(true)
}

fn add_task<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    list: &mut TaskList,
) -> io::Result<bool> {
    let title = console.heading("[ADD TASK]");
    writeln!(console.output, "{title}")?;
    let Some(description) = console.prompt_field("Describe your task: ")? else {
        return Ok(true);
    };
    let Some(deadline) = console.prompt_field("Type your deadline: ")? else {
        return Ok(true);
    };

    if let Err(err) = list.add_task(&description, &deadline) {
        warn!(error = %err, "Add task failed");
        let prefix = console.alert("An error occurred while adding task:");
        writeln!(console.output, "{prefix} {err}")?;
    }
    Ok(true)
}

fn complete_task<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    list: &mut TaskList,
) -> io::Result<bool> {
    let title = console.heading("[COMPLETE TASK]");
    writeln!(console.output, "{title}")?;
    show_tasks(console, list)?;
    let Some(id) = console.prompt_field("\n Enter ID of task you have completed: ")? else {
        return Ok(true);
    };

    if let Err(err) = list.remove_task(&id) {
        warn!(error = %err, "Complete task failed");
        let prefix = console.alert("Something went wrong when completing the task:");
        writeln!(console.output, "{prefix} {err}")?;
    }
    Ok(true)
}

fn exit_program<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<bool> {
    writeln!(console.output, "Exiting program...")?;
    Ok(false)
}
