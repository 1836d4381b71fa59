//! Exponential ADSR amplitude envelope.
//!
//! Every stage is a one-pole approach toward a target. Each pole is solved
//! so the stage ends after its configured time: the attack reaches 1.0 in
//! `attack_ms`, the decay settles on the sustain level in `decay_ms` and a
//! release from full scale falls below the silence threshold in `release_ms`.
//! The voice clocks its envelope once per output sample, never at the
//! oversampled rate.
//!
//! ```text
//!  1.0 ┤   /\
//!      │  /  `-.__________
//!  S   ┤ /                \
//!      │/                  `-._
//!  0.0 ┼────────────────────────
//!       A   D      S        R
//! ```

use libm::{expf, logf};
use wavesmith_core::ms_to_samples;

/// Level below which a releasing envelope is considered finished.
const SILENCE_THRESHOLD: f32 = 0.0001;

/// Shortest stage time accepted, in milliseconds.
const MIN_STAGE_MS: f32 = 0.1;

/// Attack target above 1.0 so the exponential approach crosses full scale
/// in finite time.
const ATTACK_TARGET: f32 = 1.2;

/// Fraction of the attack's distance to its target still left when the
/// level crosses 1.0.
const ATTACK_END_RATIO: f32 = (ATTACK_TARGET - 1.0) / ATTACK_TARGET;

/// Stage the envelope is in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopeState {
    /// Silent and waiting for a gate.
    #[default]
    Idle,
    /// Rising toward 1.0.
    Attack,
    /// Falling from 1.0 toward the sustain level.
    Decay,
    /// Parked at the sustain level until the gate closes.
    Sustain,
    /// Falling toward silence after the gate closed.
    Release,
}

/// Attack, decay, sustain and release settings.
///
/// Times are in milliseconds, sustain is a level in `[0, 1]`. These are
/// configuration, not per-note state: they survive note on/off cycles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdsrParams {
    /// Time from silence to full scale.
    pub attack_ms: f32,
    /// Time from full scale to the sustain level.
    pub decay_ms: f32,
    /// Level held while the gate is open.
    pub sustain: f32,
    /// Time from full scale to silence once the gate closes.
    pub release_ms: f32,
}

impl Default for AdsrParams {
    fn default() -> Self {
        Self {
            attack_ms: 100.0,
            decay_ms: 1000.0,
            sustain: 0.5,
            release_ms: 100.0,
        }
    }
}

/// Per-sample ADSR generator.
///
/// # Example
///
/// ```rust
/// use wavesmith_synth::{AdsrEnvelope, AdsrParams, EnvelopeState};
///
/// let mut env = AdsrEnvelope::new(48000.0);
/// env.set_params(AdsrParams {
///     attack_ms: 10.0,
///     decay_ms: 100.0,
///     sustain: 0.7,
///     release_ms: 200.0,
/// });
///
/// env.reset();
/// env.gate_on();
/// for _ in 0..1000 {
///     let _gain = env.advance();
/// }
///
/// env.gate_off();
/// assert_eq!(env.state(), EnvelopeState::Release);
/// ```
#[derive(Debug, Clone)]
pub struct AdsrEnvelope {
    state: EnvelopeState,
    level: f32,
    sample_rate: f32,
    params: AdsrParams,
    /// Pole per stage, derived from `params` and `sample_rate`.
    poles: StagePoles,
}

#[derive(Debug, Clone, Copy, Default)]
struct StagePoles {
    attack: f32,
    decay: f32,
    release: f32,
}

/// One step of `level` toward `target` through a one-pole smoother.
#[inline]
fn approach(level: f32, target: f32, pole: f32) -> f32 {
    target + (level - target) * pole
}

impl Default for AdsrEnvelope {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl AdsrEnvelope {
    /// Create an idle envelope with [`AdsrParams::default`] settings.
    pub fn new(sample_rate: f32) -> Self {
        let mut env = Self {
            state: EnvelopeState::Idle,
            level: 0.0,
            sample_rate,
            params: AdsrParams::default(),
            poles: StagePoles::default(),
        };
        env.update_poles();
        env
    }

    /// Replace all four settings at once.
    ///
    /// Stage times below 0.1 ms are raised to 0.1 ms and sustain is clamped
    /// to `[0, 1]`. Non-finite values keep the previous setting.
    pub fn set_params(&mut self, params: AdsrParams) {
        let keep = |new: f32, old: f32| if new.is_finite() { new } else { old };
        self.params = AdsrParams {
            attack_ms: keep(params.attack_ms, self.params.attack_ms).max(MIN_STAGE_MS),
            decay_ms: keep(params.decay_ms, self.params.decay_ms).max(MIN_STAGE_MS),
            sustain: keep(params.sustain, self.params.sustain).clamp(0.0, 1.0),
            release_ms: keep(params.release_ms, self.params.release_ms).max(MIN_STAGE_MS),
        };
        self.update_poles();
    }

    /// Current settings.
    pub fn params(&self) -> AdsrParams {
        self.params
    }

    /// Change the clock rate. Zero, negative and non-finite rates are ignored.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        if sample_rate.is_finite() && sample_rate > 0.0 {
            self.sample_rate = sample_rate;
            self.update_poles();
        }
    }

    /// Clock rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Open the gate.
    ///
    /// Starts the attack from the current level; call [`reset`](Self::reset)
    /// first for a hard restart from zero.
    pub fn gate_on(&mut self) {
        self.state = EnvelopeState::Attack;
    }

    /// Close the gate.
    ///
    /// The release starts from whatever level the envelope holds right now.
    pub fn gate_off(&mut self) {
        if self.state != EnvelopeState::Idle {
            self.state = EnvelopeState::Release;
        }
    }

    /// Drop straight to silence.
    pub fn reset(&mut self) {
        self.state = EnvelopeState::Idle;
        self.level = 0.0;
    }

    /// Current stage.
    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    /// Last level returned by [`advance`](Self::advance).
    pub fn level(&self) -> f32 {
        self.level
    }

    /// True in every stage except [`EnvelopeState::Idle`].
    pub fn is_active(&self) -> bool {
        self.state != EnvelopeState::Idle
    }

    /// Step one sample and return the new level.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        match self.state {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                self.level = approach(self.level, ATTACK_TARGET, self.poles.attack);
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.state = EnvelopeState::Decay;
                }
            }

            EnvelopeState::Decay => {
                let sustain = self.params.sustain;
                self.level = approach(self.level, sustain, self.poles.decay);
                if (self.level - sustain).abs() < SILENCE_THRESHOLD {
                    self.level = sustain;
                    self.state = EnvelopeState::Sustain;
                }
            }

            EnvelopeState::Sustain => {
                self.level = self.params.sustain;
            }

            EnvelopeState::Release => {
                self.level = approach(self.level, 0.0, self.poles.release);
                if self.level < SILENCE_THRESHOLD {
                    self.level = 0.0;
                    self.state = EnvelopeState::Idle;
                }
            }
        }

        self.level
    }

    fn update_poles(&mut self) {
        // p^n = ratio after n samples, so p = ratio^(1/n)
        let pole = |ms: f32, ratio: f32| {
            let samples = ms_to_samples(ms, self.sample_rate).max(1.0);
            expf(logf(ratio) / samples)
        };
        self.poles = StagePoles {
            attack: pole(self.params.attack_ms, ATTACK_END_RATIO),
            decay: pole(self.params.decay_ms, SILENCE_THRESHOLD),
            release: pole(self.params.release_ms, SILENCE_THRESHOLD),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_params() -> AdsrParams {
        AdsrParams {
            attack_ms: 1.0,
            decay_ms: 10.0,
            sustain: 0.5,
            release_ms: 10.0,
        }
    }

    #[test]
    fn test_envelope_idle_state() {
        let mut env = AdsrEnvelope::new(48000.0);
        assert_eq!(env.state(), EnvelopeState::Idle);
        assert_eq!(env.level(), 0.0);

        for _ in 0..100 {
            assert_eq!(env.advance(), 0.0);
        }
    }

    #[test]
    fn test_default_params() {
        let env = AdsrEnvelope::new(48000.0);
        assert_eq!(env.params(), AdsrParams::default());
        assert_eq!(env.params().sustain, 0.5);
    }

    #[test]
    fn test_attack_rises_monotonically() {
        let mut env = AdsrEnvelope::new(48000.0);
        env.gate_on();

        let mut previous = 0.0;
        for _ in 0..2000 {
            let level = env.advance();
            assert!(level >= previous, "attack fell from {previous} to {level}");
            previous = level;
        }
        assert_eq!(env.state(), EnvelopeState::Attack);
    }

    #[test]
    fn test_envelope_decay_to_sustain() {
        let mut env = AdsrEnvelope::new(48000.0);
        env.set_params(fast_params());
        env.gate_on();

        for _ in 0..5000 {
            env.advance();
        }

        assert_eq!(env.state(), EnvelopeState::Sustain);
        assert!((env.level() - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_release_starts_from_current_level() {
        let mut env = AdsrEnvelope::new(48000.0);
        env.gate_on();
        for _ in 0..500 {
            env.advance();
        }
        let held = env.level();
        assert!(held > 0.0 && held < 1.0);

        env.gate_off();
        let first = env.advance();
        assert!(first < held && first > held * 0.9);
    }

    #[test]
    fn test_envelope_release_reaches_idle() {
        let mut env = AdsrEnvelope::new(48000.0);
        env.set_params(fast_params());
        env.gate_on();
        for _ in 0..2000 {
            env.advance();
        }

        env.gate_off();
        assert_eq!(env.state(), EnvelopeState::Release);

        for _ in 0..20000 {
            env.advance();
        }

        assert_eq!(env.state(), EnvelopeState::Idle);
        assert_eq!(env.level(), 0.0);
        assert!(!env.is_active());
    }

    #[test]
    fn test_gate_off_while_idle_stays_idle() {
        let mut env = AdsrEnvelope::new(48000.0);
        env.gate_off();
        assert_eq!(env.state(), EnvelopeState::Idle);
    }

    #[test]
    fn test_reset_then_gate_on_restarts_from_zero() {
        let mut env = AdsrEnvelope::new(48000.0);
        env.set_params(fast_params());
        env.gate_on();
        for _ in 0..5000 {
            env.advance();
        }

        env.reset();
        env.gate_on();
        assert_eq!(env.level(), 0.0);
        assert_eq!(env.state(), EnvelopeState::Attack);
    }

    #[test]
    fn test_set_params_sanitizes() {
        let mut env = AdsrEnvelope::new(48000.0);
        env.set_params(AdsrParams {
            attack_ms: 0.0,
            decay_ms: f32::NAN,
            sustain: 3.0,
            release_ms: -5.0,
        });

        let params = env.params();
        assert_eq!(params.attack_ms, MIN_STAGE_MS);
        assert_eq!(params.decay_ms, AdsrParams::default().decay_ms);
        assert_eq!(params.sustain, 1.0);
        assert_eq!(params.release_ms, MIN_STAGE_MS);
    }

    #[test]
    fn test_invalid_sample_rate_ignored() {
        let mut env = AdsrEnvelope::new(48000.0);
        env.set_sample_rate(0.0);
        assert_eq!(env.sample_rate(), 48000.0);
        env.set_sample_rate(44100.0);
        assert_eq!(env.sample_rate(), 44100.0);
    }

    #[test]
    fn test_envelope_output_range() {
        let mut env = AdsrEnvelope::new(48000.0);
        env.set_params(fast_params());
        env.gate_on();

        for _ in 0..2000 {
            let level = env.advance();
            assert!((0.0..=1.0).contains(&level), "Level out of range: {level}");
        }

        env.gate_off();
        for _ in 0..5000 {
            let level = env.advance();
            assert!((0.0..=1.0).contains(&level), "Level out of range: {level}");
        }
    }

    /// Samples until `done` holds, stepping at most `limit` times.
    fn samples_until(
        env: &mut AdsrEnvelope,
        limit: usize,
        mut done: impl FnMut(&AdsrEnvelope) -> bool,
    ) -> Option<usize> {
        (1..=limit).find(|_| {
            env.advance();
            done(&*env)
        })
    }

    #[test]
    fn test_attack_lasts_attack_ms() {
        let mut env = AdsrEnvelope::new(48000.0);
        env.gate_on();

        // Default attack is 100 ms = 4800 samples
        let n = samples_until(&mut env, 20_000, |e| e.state() != EnvelopeState::Attack).unwrap();
        assert!((4750..=4850).contains(&n), "attack took {n} samples");
        assert_eq!(env.level(), 1.0);
    }

    #[test]
    fn test_decay_lasts_decay_ms() {
        let mut env = AdsrEnvelope::new(48000.0);
        env.set_params(AdsrParams {
            attack_ms: 0.1,
            decay_ms: 50.0,
            sustain: 0.5,
            release_ms: 100.0,
        });
        env.gate_on();
        samples_until(&mut env, 100, |e| e.state() == EnvelopeState::Decay).unwrap();

        let n = samples_until(&mut env, 20_000, |e| e.state() == EnvelopeState::Sustain).unwrap();
        assert!(n <= 2400 + 24, "decay took {n} samples");
        assert!(n >= 2000, "decay took {n} samples");
    }

    #[test]
    fn test_release_lasts_at_most_release_ms() {
        let mut env = AdsrEnvelope::new(48000.0);
        env.set_params(AdsrParams {
            sustain: 1.0,
            ..AdsrParams::default()
        });
        env.gate_on();
        samples_until(&mut env, 20_000, |e| e.state() == EnvelopeState::Sustain).unwrap();
        assert_eq!(env.level(), 1.0);

        // Release from full scale is the longest release there is
        env.gate_off();
        let n = samples_until(&mut env, 48_000, |e| !e.is_active()).unwrap();
        assert!((4750..=4850).contains(&n), "release took {n} samples");
    }

    #[test]
    fn test_stage_times_follow_sample_rate() {
        let mut env = AdsrEnvelope::new(96000.0);
        env.gate_on();
        let n = samples_until(&mut env, 40_000, |e| e.state() != EnvelopeState::Attack).unwrap();
        assert!((9500..=9700).contains(&n), "attack took {n} samples at 96 kHz");
    }
}
