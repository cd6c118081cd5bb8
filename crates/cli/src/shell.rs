//! Line-based menu shell over a `Session`.
//!
//! Every screen is a `Menu`; a one-letter selection is mapped to a `Command`
//! by `transition`, and `Shell::step` performs it. Reaching end of input
//! ends the loop as if exit had been confirmed.

use std::io::{BufRead, Write};

use anyhow::Result;
use ncurve::{LoadError, SaveError, Session};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Menu {
    Main,
    Load,
    Analyze,
    Modify,
    Save,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Goto(Menu),
    LoadFile,
    LoadInput,
    Clear,
    DisplayPoints,
    Statistics,
    Shift,
    SaveFile,
    ConfirmExit,
    CancelExit,
    Invalid,
}

/// Menu transition table. Selections are case-insensitive.
pub fn transition(menu: Menu, key: char) -> Command {
    use Command::*;
    match (menu, key.to_ascii_uppercase()) {
        (Menu::Main, 'A') => Goto(Menu::Load),
        (Menu::Main, 'B') => Goto(Menu::Analyze),
        (Menu::Main, 'C') => Goto(Menu::Modify),
        (Menu::Main, 'D') => Goto(Menu::Save),
        (Menu::Main, 'X') => Goto(Menu::Exit),
        (Menu::Load, 'A') => LoadFile,
        (Menu::Load, 'B') => LoadInput,
        (Menu::Load, 'C') => Clear,
        (Menu::Analyze, 'A') => DisplayPoints,
        (Menu::Analyze, 'B') => Statistics,
        (Menu::Modify, 'A') => Shift,
        (Menu::Save, 'A') => SaveFile,
        (Menu::Load | Menu::Analyze | Menu::Modify | Menu::Save, 'X') => Goto(Menu::Main),
        (Menu::Exit, 'Y') => ConfirmExit,
        (Menu::Exit, 'N') => CancelExit,
        _ => Invalid,
    }
}

impl Menu {
    /// Screens that make no sense without points.
    fn needs_points(self) -> bool {
        matches!(self, Menu::Analyze | Menu::Modify | Menu::Save)
    }
}

pub struct Shell<'s, R, W> {
    input: R,
    out: W,
    session: &'s mut Session,
    menu: Menu,
    last: char,
}

impl<'s, R: BufRead, W: Write> Shell<'s, R, W> {
    pub fn new(input: R, out: W, session: &'s mut Session) -> Self {
        Self {
            input,
            out,
            session,
            menu: Menu::Main,
            last: ' ',
        }
    }

    pub fn run(&mut self) -> Result<()> {
        while self.session.state().running {
            self.render()?;
            let Some(key) = self.read_key()? else {
                self.session.request_exit();
                break;
            };
            self.step(key)?;
        }
        Ok(())
    }

    /// Apply one selection in the current menu.
    pub fn step(&mut self, key: char) -> Result<()> {
        if self.menu == Menu::Main {
            self.last = key.to_ascii_uppercase();
        }
        match transition(self.menu, key) {
            Command::Goto(next) if next.needs_points() && self.session.point_count() == 0 => {
                writeln!(self.out, "@Please load coordinates before you continue.")?;
            }
            Command::Goto(next) => self.menu = next,
            Command::LoadFile => self.load_file()?,
            Command::LoadInput => self.load_input()?,
            Command::Clear => {
                self.session.clear();
                tracing::info!("clear");
            }
            Command::DisplayPoints => self.display_points()?,
            Command::Statistics => self.statistics()?,
            Command::Shift => self.shift()?,
            Command::SaveFile => self.save_file()?,
            Command::ConfirmExit => self.session.request_exit(),
            Command::CancelExit => {
                self.session.cancel_exit();
                self.menu = Menu::Main;
            }
            Command::Invalid => writeln!(self.out, "@Invalid input!")?,
        }
        Ok(())
    }

    pub fn menu(&self) -> Menu {
        self.menu
    }

    fn render(&mut self) -> Result<()> {
        let n = self.session.point_count();
        match n {
            0 => writeln!(self.out, "@No coordinates loaded.")?,
            1 => writeln!(self.out, "@1 coordinate loaded.")?,
            _ => writeln!(self.out, "@{n} coordinates loaded.")?,
        }
        let lines: &[&str] = match self.menu {
            Menu::Main => {
                writeln!(self.out, "##########~NCurveCalc~##########")?;
                if self.session.state().modified {
                    writeln!(self.out, "@There are unsaved changes.")?;
                }
                writeln!(self.out, "@Previous selection: {}", self.last)?;
                &[
                    "A - Load coordinates",
                    "B - Analyze coordinates",
                    "C - Modify coordinates",
                    "D - Save changes",
                    "X - Exit program",
                ]
            }
            Menu::Load => &[
                "@Coordinate load menu:",
                "A - Load from file",
                "B - Load from input",
                "C - Clear points",
                "X - Main menu",
            ],
            Menu::Analyze => &[
                "@Analyze points menu:",
                "A - Display points",
                "B - Point statistics",
                "X - Main menu",
            ],
            Menu::Modify => &["@Modify points menu:", "A - Shift points", "X - Main menu"],
            Menu::Save => &["@Save changes:", "A - Save to file", "X - Main menu"],
            Menu::Exit => {
                if self.session.state().modified {
                    writeln!(self.out, "@Warning! There are unsaved changes!")?;
                }
                &["@Are you sure you want to exit? (y/n)"]
            }
        };
        for line in lines {
            writeln!(self.out, "\t{line}")?;
        }
        write!(self.out, "\tSelection: ")?;
        self.out.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    /// First non-blank character of the next line; `None` at end of input.
    fn read_key(&mut self) -> Result<Option<char>> {
        Ok(self.read_line()?.map(|l| l.chars().next().unwrap_or(' ')))
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "\t{label}: ")?;
        self.out.flush()?;
        self.read_line()
    }

    /// Prompt until a float is entered; `None` at end of input.
    fn prompt_f64(&mut self, label: &str) -> Result<Option<f64>> {
        loop {
            let Some(line) = self.prompt(label)? else {
                return Ok(None);
            };
            match line.parse::<f64>() {
                Ok(v) => return Ok(Some(v)),
                Err(_) => writeln!(self.out, "@Invalid input!")?,
            }
        }
    }

    fn load_file(&mut self) -> Result<()> {
        if self.session.point_count() > 0 {
            writeln!(
                self.out,
                "@Your previous coordinates will be removed, continue? (y/n)"
            )?;
            match self.read_key()? {
                Some('n' | 'N') | None => return Ok(()),
                Some(_) => {}
            }
        }
        let Some(name) = self.prompt("Please input file name")? else {
            return Ok(());
        };
        match self.session.load_from_file(&name) {
            Ok(_) => {}
            Err(LoadError::FileNotFound(_)) => writeln!(self.out, "@File does not exist!")?,
            Err(LoadError::PartialSequenceViolation { line, reason, .. }) => {
                writeln!(self.out, "\t@Values must be sequential! (line {line}: {reason})")?;
                writeln!(self.out, "\tPlease fix your file!")?;
            }
            Err(e) => writeln!(self.out, "@Could not read {name}: {e}")?,
        }
        Ok(())
    }

    fn load_input(&mut self) -> Result<()> {
        loop {
            writeln!(self.out, "\tAdd coordinate? (y/n)")?;
            let x = match self.read_key()? {
                Some('y' | 'Y') => match self.prompt_f64("X")? {
                    Some(x) => x,
                    None => return Ok(()),
                },
                Some('n' | 'N') | None => return Ok(()),
                Some(_) => {
                    writeln!(self.out, "@Invalid input!")?;
                    continue;
                }
            };
            // Check X before asking for Y.
            if let Err(reason) = self.session.probe_x(x) {
                writeln!(self.out, "\t@Values must be sequential! ({reason})")?;
                continue;
            }
            let Some(y) = self.prompt_f64("Y")? else {
                return Ok(());
            };
            if let Err(reason) = self.session.add_point_interactive(x, y) {
                writeln!(self.out, "\t@Values must be sequential! ({reason})")?;
            }
        }
    }

    fn display_points(&mut self) -> Result<()> {
        let n = self.session.point_count();
        for (k, p) in self.session.iterate().enumerate() {
            writeln!(self.out, "@Point {} of {n}:", k + 1)?;
            writeln!(self.out, "\tx: {:.6}\n\ty: {:.6}", p.x, p.y)?;
        }
        Ok(())
    }

    fn statistics(&mut self) -> Result<()> {
        match self.session.metrics() {
            Ok(m) => {
                writeln!(self.out, "@Point statistics:")?;
                writeln!(self.out, "\tLength of points: {:.6}", m.length)?;
                writeln!(self.out, "\tArea under the curve: {:.6}", m.area)?;
                writeln!(self.out, "\tLowest point: X: {:.6} Y: {:.6}", m.low.x, m.low.y)?;
                writeln!(self.out, "\tHighest point: X: {:.6} Y: {:.6}", m.high.x, m.high.y)?;
            }
            Err(e) => writeln!(self.out, "@{e}")?,
        }
        Ok(())
    }

    fn shift(&mut self) -> Result<()> {
        writeln!(self.out, "@Shift points:")?;
        let Some(dx) = self.prompt_f64("X")? else {
            return Ok(());
        };
        let Some(dy) = self.prompt_f64("Y")? else {
            return Ok(());
        };
        if let Err(reason) = self.session.shift(dx, dy) {
            writeln!(self.out, "@Points not shifted: {reason}")?;
        }
        Ok(())
    }

    fn save_file(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Please input file name")? else {
            return Ok(());
        };
        match self.session.save_to_file(&name) {
            Ok(()) => writeln!(self.out, "File save complete.")?,
            Err(SaveError::FileAlreadyExists(_)) => writeln!(self.out, "@File exists!")?,
            Err(e) => writeln!(self.out, "@Could not write {name}: {e}")?,
        }
        Ok(())
    }
}
