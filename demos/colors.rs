//! Basic colors, 24-bit gradient and cursor movement on the alternate screen
use quick_term::{BasicColor, Error, SystemTerminal, TerminalCommand, RGB};
use std::io::Write;
use tracing_subscriber::EnvFilter;

const BASIC: [BasicColor; 8] = [
    BasicColor::Black,
    BasicColor::Red,
    BasicColor::Green,
    BasicColor::Yellow,
    BasicColor::Blue,
    BasicColor::Magenta,
    BasicColor::Cyan,
    BasicColor::White,
];

fn main() -> Result<(), Error> {
    let file = std::fs::File::create(std::env::temp_dir().join("quick_term_colors.log"))?;
    let (writer, _guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(writer)
        .init();

    let mut term = SystemTerminal::new()?;
    term.enable_raw_mode()?;
    term.execute(TerminalCommand::AltScreen(true))?;
    term.execute(TerminalCommand::CursorVisible(false))?;
    term.execute(TerminalCommand::EraseScreen)?;

    term.execute(TerminalCommand::CursorTo { row: 2, col: 3 })?;
    for (index, color) in BASIC.into_iter().enumerate() {
        term.execute(TerminalCommand::Basic {
            color,
            bold: index % 2 == 1,
        })?;
        write!(term, "hello {:?} ", color)?;
    }
    term.execute(TerminalCommand::ResetColor)?;

    let size = term.size()?.cells;
    let width = size.width.saturating_sub(4).max(1);
    let from: RGB = "#fb4934".parse()?;
    let to: RGB = "#83a598".parse()?;
    term.execute(TerminalCommand::CursorTo { row: 4, col: 3 })?;
    for col in 0..width {
        let color = lerp(from, to, col as f32 / width as f32);
        term.execute(TerminalCommand::Background(color))?;
        write!(term, " ")?;
    }
    term.execute(TerminalCommand::ResetColor)?;

    term.execute(TerminalCommand::CursorTo { row: 6, col: 3 })?;
    term.execute(TerminalCommand::Foreground(to))?;
    write!(term, "{}x{} cells, press any key", size.width, size.height)?;
    term.execute(TerminalCommand::ResetColor)?;
    term.flush()?;

    match term.wait() {
        Ok(_) | Err(Error::Quit) => Ok(()),
        Err(error) => Err(error),
    }
}

fn lerp(from: RGB, to: RGB, t: f32) -> RGB {
    let [r0, g0, b0] = from.rgb_u8();
    let [r1, g1, b1] = to.rgb_u8();
    let mix = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t).round() as u8;
    RGB::new(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}
