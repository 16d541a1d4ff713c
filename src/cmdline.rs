use crate::environment::Environment;
use crate::interpreter;
use ansi_term::Colour::Red;
use linefeed::{DefaultTerminal, Interface, ReadResult, Terminal};
use std::fs::read_to_string;
use std::path::PathBuf;
use std::rc::Rc;
use std::{fmt, io};

static USAGE: &str = "usage: gosp [FILE]";

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Usage,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Usage => write!(f, "{}", USAGE),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

pub fn setup() -> io::Result<Interface<DefaultTerminal>> {
    let interface = linefeed::Interface::new("gosp")?;
    interface.set_prompt("gosp> ")?;
    if let Some(path) = history_path() {
        interface.load_history(path).ok();
    };
    Ok(interface)
}

fn history_path() -> Option<PathBuf> {
    match dirs::data_dir() {
        Some(mut path) => {
            path.push(".gosp_history");
            Some(path)
        }
        None => None,
    }
}

pub fn save_history<T: Terminal>(interface: &Interface<T>) -> io::Result<()> {
    match history_path() {
        Some(path) => interface.save_history(path),
        None => Ok(()),
    }
}

fn describe(error: &interpreter::Error, stream: atty::Stream) -> String {
    let message = format!("error: {}", error);
    match atty::is(stream) {
        true => Red.paint(message).to_string(),
        false => message,
    }
}

/// Reads and evaluates lines until EOF. A failing line is reported and the
/// loop carries on.
pub fn repl<T: Terminal>(interface: &Interface<T>, env: &Rc<Environment>) {
    loop {
        match interface.read_line() {
            Ok(ReadResult::Eof) => break,
            Ok(ReadResult::Signal(sig)) => {
                writeln!(interface, "Received signal {:?}", sig).ok();
            }
            Ok(ReadResult::Input(line)) => {
                if !line.trim().is_empty() {
                    interface.add_history_unique(line.clone());
                }
                match interpreter::rep(&line, env) {
                    Ok(Some(output)) => writeln!(interface, "{}", output).ok(),
                    Ok(None) => None,
                    Err(e) => writeln!(interface, "{}", describe(&e, atty::Stream::Stdout)).ok(),
                };
            }
            Err(e) => {
                writeln!(interface, "Error: {}", e).ok();
                break;
            }
        }
    }
}

/// Evaluates a file one line at a time in `env`, printing each result.
pub fn run_file(path: &str, env: &Rc<Environment>) -> Result<(), Error> {
    let contents = read_to_string(path)?;
    for (number, line) in contents.lines().enumerate() {
        match interpreter::rep(line, env) {
            Ok(Some(output)) => println!("{}", output),
            Ok(None) => (),
            Err(e) => {
                log::debug!("{}:{} failed: {:?}", path, number + 1, e);
                eprintln!(
                    "{}:{}: {}",
                    path,
                    number + 1,
                    describe(&e, atty::Stream::Stderr)
                );
            }
        }
    }
    Ok(())
}

pub fn launch(args: Vec<String>, env: &Rc<Environment>) -> Result<(), Error> {
    match args.as_slice() {
        [_] => {
            let interface = setup()?;
            repl(&interface, env);
            save_history(&interface)?;
            Ok(())
        }
        [_, path] => run_file(path, env),
        _ => Err(Error::Usage),
    }
}
