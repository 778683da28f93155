/// Half-amplitude of the scale modulation (±10 %).
pub const PULSE_SCALE_SWING: f64 = 0.1;
pub const PULSE_OPACITY_MIN: f64 = 0.22;
pub const PULSE_OPACITY_MAX: f64 = 0.47;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseSample {
    /// Normalized pulse in [0, 1].
    pub pulse: f64,
    /// Multiplier in [0.9, 1.1].
    pub scale: f64,
    pub opacity: f64,
}

/// Samples a marker's halo pulse at `elapsed_s`. `phase_offset` keeps
/// neighbouring markers out of sync.
pub fn pulse_at(elapsed_s: f64, speed: f64, phase_offset: f64) -> PulseSample {
    let pulse = 0.5 + 0.5 * (elapsed_s * speed + phase_offset).sin();
    PulseSample {
        pulse,
        scale: 1.0 + 2.0 * PULSE_SCALE_SWING * (pulse - 0.5),
        opacity: PULSE_OPACITY_MIN + (PULSE_OPACITY_MAX - PULSE_OPACITY_MIN) * pulse,
    }
}
