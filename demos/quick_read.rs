//! Echo key presses and mouse clicks, `q` or `ctrl-c` to quit
//!
//! Logs are written to `quick_read.log` in the temporary directory, filtered
//! with `RUST_LOG` (default `info`).
use quick_term::{Error, Position, SystemTerminal};
use std::{cell::RefCell, io::Write, rc::Rc};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn logging_init() -> Result<WorkerGuard, Error> {
    let file = std::fs::File::create(std::env::temp_dir().join("quick_read.log"))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(guard)
}

fn main() -> Result<(), Error> {
    let _guard = logging_init()?;

    let mut term = SystemTerminal::new()?;
    term.enable_raw_mode()?;
    term.enable_mouse_mode()?;

    let clicks: Rc<RefCell<Vec<(&'static str, Position)>>> = Default::default();
    term.set_mouse_down({
        let clicks = clicks.clone();
        move |pos| clicks.borrow_mut().push(("down", pos))
    });
    term.set_mouse_up({
        let clicks = clicks.clone();
        move |pos| clicks.borrow_mut().push(("up", pos))
    });

    writeln!(term, "press any key or click, `q` to quit")?;
    loop {
        let event = match term.poll() {
            Ok(event) => event,
            Err(Error::Quit) => break,
            Err(error) => return Err(error),
        };
        for (action, pos) in clicks.borrow_mut().drain(..) {
            writeln!(term, "mouse {} row:{} col:{}", action, pos.row, pos.col)?;
        }
        match event {
            None => std::thread::sleep(term.poll_interval()),
            Some(event) if event.is_char('q') => break,
            Some(event) => {
                tracing::info!(?event, "key");
                writeln!(term, "{:?} code:{}", event, event.code())?;
            }
        }
    }
    // dropping the terminal disables mouse reports and restores attributes
    Ok(())
}
