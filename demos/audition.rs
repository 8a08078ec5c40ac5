//! Hear a curve as pitch jitter on a sine tone.
//!
//! The curve is played back at 24 frames per second and bends the pitch of a
//! 220 Hz tone by up to `amplitude` semitones, so smoothing and frequency
//! changes are audible as a lazier or busier wobble.
//!
//! UP/DOWN depth, S next seed, +/- smoothing, W toggle wave, Q or ESC to quit.

mod common;

use animnoise::{CurveSignal, ParameterSet, Signal, Wave};
use anyhow::Result;
use common::{DemoAudioState, KeyAction, default_sample_rate, is_quit_key, run_audio_example};
use crossterm::{
    ExecutableCommand,
    event::{KeyCode, KeyEvent},
};
use std::f64::consts::PI;
use std::io::{Write, stdout};

const BASE_PITCH: f64 = 220.0;
const FRAMES_PER_SECOND: f64 = 24.0;

struct AudioState {
    jitter: CurveSignal,
    sample_rate: f64,
    phase: f64,
}

impl AudioState {
    fn new(params: ParameterSet, sample_rate: f64) -> Self {
        Self {
            jitter: CurveSignal::new(params, 0.0, FRAMES_PER_SECOND / sample_rate),
            sample_rate,
            phase: 0.0,
        }
    }

    fn params(&self) -> ParameterSet {
        *self.jitter.params()
    }

    fn update(&mut self, f: impl FnOnce(&mut ParameterSet)) {
        let mut params = self.params();
        f(&mut params);
        self.jitter.set_params(params);
    }
}

impl DemoAudioState for AudioState {
    fn next_sample(&mut self) -> f64 {
        let semitones = self.jitter.next_sample();
        let pitch = BASE_PITCH * 2.0_f64.powf(semitones / 12.0);
        self.phase = (self.phase + pitch / self.sample_rate).fract();
        (self.phase * 2.0 * PI).sin() * 0.3
    }
}

fn draw_ui(params: &ParameterSet) -> Result<()> {
    let mut stdout = stdout();
    stdout.execute(crossterm::terminal::Clear(
        crossterm::terminal::ClearType::All,
    ))?;
    stdout.execute(crossterm::cursor::MoveTo(0, 0))?;
    write!(
        stdout,
        "{} depth={:.1}st seed={} smoothing={:.2} | UP/DOWN depth  S seed  +/- smooth  W wave  Q quit",
        params.wave, params.amplitude, params.seed, params.smoothing
    )?;
    stdout.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let sample_rate = f64::from(default_sample_rate()?);
    let params = ParameterSet::default().with_amplitude(2.0).with_frequency(0.5);

    run_audio_example(
        AudioState::new(params, sample_rate),
        |state| {
            let params = state.lock().map_err(|_| anyhow::anyhow!("audio state poisoned"))?.params();
            draw_ui(&params)
        },
        |state, key_event: &KeyEvent| {
            if is_quit_key(key_event.code) {
                return Ok(KeyAction::Exit);
            }

            let mut guard = state
                .lock()
                .map_err(|_| anyhow::anyhow!("audio state poisoned"))?;
            match key_event.code {
                KeyCode::Up => guard.update(|p| p.amplitude = (p.amplitude + 0.5).min(12.0)),
                KeyCode::Down => guard.update(|p| p.amplitude = (p.amplitude - 0.5).max(0.0)),
                KeyCode::Char('s') => guard.update(|p| p.seed = p.seed.saturating_add(1)),
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    guard.update(|p| p.smoothing = (p.smoothing + 0.05).min(1.0))
                }
                KeyCode::Char('-') => guard.update(|p| p.smoothing = (p.smoothing - 0.05).max(0.0)),
                KeyCode::Char('w') => guard.update(|p| {
                    p.wave = match p.wave {
                        Wave::Noise => Wave::Sine,
                        Wave::Sine => Wave::Noise,
                    }
                }),
                _ => {}
            }
            let params = guard.params();
            drop(guard);

            draw_ui(&params)?;
            Ok(KeyAction::Continue)
        },
    )?;

    println!("Goodbye!");
    Ok(())
}
