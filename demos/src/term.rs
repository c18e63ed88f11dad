//! Crossterm front-end: raw-mode setup, input decoding and drawing.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    execute, queue,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridwalk_core::Point;
use gridwalk_paths::{Algorithm, Pacer, SearchState, Snapshot, ThreadPacer};

use crate::app::Command;
use crate::logger::LogFeed;
use crate::paint::{Canvas, Layout, Paint};

/// Terminal columns per grid cell; cells are twice as tall as wide.
const CELL_W: u16 = 2;

/// Maps a key press to a [`Command`].
fn key_command(code: KeyCode, mods: KeyModifiers) -> Option<Command> {
    if mods.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }
    let cmd = match code {
        KeyCode::Esc | KeyCode::Char('q') => Command::Quit,
        KeyCode::Up | KeyCode::Char('k') => Command::Move(0, -1),
        KeyCode::Down | KeyCode::Char('j') => Command::Move(0, 1),
        KeyCode::Left | KeyCode::Char('h') => Command::Move(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => Command::Move(1, 0),
        KeyCode::Char('s') => Command::SetStart,
        KeyCode::Char('e') => Command::SetEnd,
        KeyCode::Char('w') => Command::ToggleWall,
        KeyCode::Char('a') => Command::Search(Algorithm::AStar),
        KeyCode::Char('d') => Command::Search(Algorithm::Dijkstra),
        KeyCode::Char('p') => Command::Search(Algorithm::Dfs),
        KeyCode::Char('r') => Command::Reset,
        KeyCode::Char('g') => Command::Regenerate,
        _ => return None,
    };
    Some(cmd)
}

/// Maps a terminal event to a [`Command`].
pub fn to_command(ev: Event) -> Option<Command> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => key_command(code, modifiers),
        Event::Mouse(me) => match me.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let cell = Point::new(i32::from(me.column / CELL_W), i32::from(me.row));
                Some(Command::Click(cell))
            }
            _ => None,
        },
        _ => None,
    }
}

fn colors(p: Paint) -> (Color, Color) {
    match p {
        Paint::Empty => (Color::Reset, Color::Reset),
        Paint::Wall => (Color::Grey, Color::DarkGrey),
        Paint::Visited => (Color::Rgb { r: 90, g: 90, b: 140 }, Color::Rgb { r: 30, g: 30, b: 70 }),
        Paint::Open => (Color::Rgb { r: 120, g: 220, b: 120 }, Color::Rgb { r: 20, g: 80, b: 20 }),
        Paint::Path => (Color::Black, Color::Rgb { r: 250, g: 210, b: 60 }),
        Paint::Start => (Color::White, Color::Rgb { r: 40, g: 140, b: 220 }),
        Paint::End => (Color::White, Color::Rgb { r: 210, g: 50, b: 50 }),
    }
}

fn glyph(p: Paint) -> &'static str {
    match p {
        Paint::Empty => "  ",
        Paint::Wall => "##",
        Paint::Visited => "··",
        Paint::Open => "oo",
        Paint::Path => "**",
        Paint::Start => "S ",
        Paint::End => "E ",
    }
}

/// Raw-mode terminal on the alternate screen. Restored on drop.
pub struct Terminal {
    out: Stdout,
    closed: bool,
}

impl Terminal {
    pub fn init() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self { out, closed: false })
    }

    /// Wait up to `timeout` for the next command.
    pub fn next_command(&mut self, timeout: Duration) -> io::Result<Option<Command>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(to_command(event::read()?))
    }

    /// Discard pending input.
    pub fn drain_input(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            event::read()?;
        }
        Ok(())
    }

    /// Draw the grid, an optional cursor and the two status lines.
    pub fn draw(
        &mut self,
        canvas: &Canvas,
        cursor: Option<Point>,
        status: &str,
        log: Option<&str>,
    ) -> io::Result<()> {
        let (w, h) = terminal::size()?;
        let l: Layout = canvas.layout();
        let grid_rows = (l.rows.max(0) as u16).min(h.saturating_sub(2));
        let grid_cols = (l.cols.max(0) as u16).min(w / CELL_W);

        for y in 0..grid_rows {
            queue!(self.out, cursor::MoveTo(0, y))?;
            for x in 0..grid_cols {
                let cell = Point::new(i32::from(x), i32::from(y));
                let p = canvas.at(cell);
                let (fg, bg) = colors(p);
                queue!(self.out, SetForegroundColor(fg), SetBackgroundColor(bg))?;
                if cursor == Some(cell) {
                    queue!(self.out, SetAttribute(Attribute::Reverse))?;
                }
                queue!(self.out, Print(glyph(p)))?;
                if cursor == Some(cell) {
                    queue!(self.out, SetAttribute(Attribute::NoReverse))?;
                }
            }
        }
        queue!(
            self.out,
            SetForegroundColor(Color::Reset),
            SetBackgroundColor(Color::Reset)
        )?;
        for (row, text) in [(grid_rows, status), (grid_rows + 1, log.unwrap_or(""))] {
            let text: String = text.chars().take(usize::from(w)).collect();
            queue!(
                self.out,
                cursor::MoveTo(0, row),
                terminal::Clear(ClearType::CurrentLine),
                Print(text)
            )?;
        }
        self.out.flush()
    }

    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let _ = execute!(
            self.out,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        self.close();
    }
}

/// Redraws the grid after every search iteration. Input arriving during
/// the search is discarded.
pub struct LivePacer<'a> {
    term: &'a mut Terminal,
    canvas: Canvas,
    feed: LogFeed,
    error: Option<io::Error>,
}

impl<'a> LivePacer<'a> {
    pub fn new(term: &'a mut Terminal, layout: Layout, feed: LogFeed) -> Self {
        Self {
            term,
            canvas: Canvas::new(layout),
            feed,
            error: None,
        }
    }

    /// The first drawing error, if any.
    pub fn finish(self) -> io::Result<()> {
        self.error.map_or(Ok(()), Err)
    }

    fn keep(&mut self, r: io::Result<()>) {
        if let Err(e) = r {
            log::error!("drawing failed: {e}");
            self.error.get_or_insert(e);
        }
    }
}

impl Pacer for LivePacer<'_> {
    fn observe(&mut self, snap: &Snapshot<'_>) {
        if self.error.is_some() {
            return;
        }
        self.canvas.paint(snap.graph, snap.open);
        let phase = if snap.state == SearchState::Found { "found" } else { "searching" };
        let status = format!("{phase}: {} expanded, {} open", snap.iteration, snap.open.len());
        let last = self.feed.last();
        let r = self.term.draw(&self.canvas, None, &status, last.as_deref());
        self.keep(r);
    }

    fn pause(&mut self, delay: Duration) {
        let r = self.term.drain_input();
        self.keep(r);
        ThreadPacer.pause(delay);
    }
}
