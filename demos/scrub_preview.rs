//! Terminal curve scrubber.
//!
//! Plots a window of the curve as ASCII and lets you scrub along the frame
//! axis and tweak parameters live.
//!
//! LEFT/RIGHT scrub, S/A seed up/down, +/- smoothing, [/] frequency,
//! W toggle wave, R toggle rectify, Q or ESC to quit.

mod common;

use animnoise::{ParameterSet, Wave, bake};
use anyhow::Result;
use common::{KeyAction, is_quit_key, run_terminal_loop};
use crossterm::{
    ExecutableCommand,
    event::{KeyCode, KeyEvent},
    terminal,
};
use std::io::{Write, stdout};

const PLOT_HEIGHT: usize = 21;
const SCRUB_STEP: f64 = 8.0;

#[derive(Clone, Copy)]
struct Scrubber {
    params: ParameterSet,
    start: f64,
}

impl Scrubber {
    fn handle_key(&mut self, code: KeyCode) {
        let p = &mut self.params;
        match code {
            KeyCode::Left => self.start -= SCRUB_STEP,
            KeyCode::Right => self.start += SCRUB_STEP,
            KeyCode::Char('s') => p.seed = p.seed.saturating_add(1),
            KeyCode::Char('a') => p.seed = p.seed.saturating_sub(1),
            KeyCode::Char('+') | KeyCode::Char('=') => p.smoothing = (p.smoothing + 0.05).min(1.0),
            KeyCode::Char('-') => p.smoothing = (p.smoothing - 0.05).max(0.0),
            KeyCode::Char(']') => p.frequency = (p.frequency + 0.05).min(1.0),
            KeyCode::Char('[') => p.frequency = (p.frequency - 0.05).max(0.0),
            KeyCode::Char('w') => {
                p.wave = match p.wave {
                    Wave::Noise => Wave::Sine,
                    Wave::Sine => Wave::Noise,
                }
            }
            KeyCode::Char('r') => p.rectify = !p.rectify,
            _ => {}
        }
    }

    fn draw(&self) -> Result<()> {
        let (cols, _) = terminal::size()?;
        let width = usize::from(cols).max(10);
        let samples = bake(&self.params, self.start, self.start + width as f64, 1.0);

        let mut rows = vec![vec![' '; width]; PLOT_HEIGHT];
        let mid = PLOT_HEIGHT / 2;
        for cell in rows[mid].iter_mut() {
            *cell = '-';
        }
        for (x, value) in samples.iter().enumerate() {
            let scaled = (1.0 - value.clamp(-1.0, 1.0)) * mid as f64;
            let y = (scaled.round() as usize).min(PLOT_HEIGHT - 1);
            rows[y][x] = '*';
        }

        let mut stdout = stdout();
        stdout.execute(terminal::Clear(terminal::ClearType::All))?;
        stdout.execute(crossterm::cursor::MoveTo(0, 0))?;
        let p = &self.params;
        write!(
            stdout,
            "frames {:.0}..{:.0} | {} seed={} smoothing={:.2} frequency={:.2} rectify={}\r\n",
            self.start,
            self.start + width as f64,
            p.wave,
            p.seed,
            p.smoothing,
            p.frequency,
            p.rectify
        )?;
        for row in rows {
            let line: String = row.into_iter().collect();
            write!(stdout, "{}\r\n", line)?;
        }
        write!(stdout, "LEFT/RIGHT scrub  S/A seed  +/- smooth  [/] freq  W wave  R rectify  Q quit")?;
        stdout.flush()?;
        Ok(())
    }
}

fn main() -> Result<()> {
    let mut scrubber = Scrubber {
        params: ParameterSet::default(),
        start: 0.0,
    };

    let initial = scrubber;
    run_terminal_loop(
        || initial.draw(),
        |key_event: &KeyEvent| {
            if is_quit_key(key_event.code) {
                return Ok(KeyAction::Exit);
            }
            scrubber.handle_key(key_event.code);
            scrubber.draw()?;
            Ok(KeyAction::Continue)
        },
    )?;

    println!("Goodbye!");
    Ok(())
}
