//! Fixed-rate continuous control loop.
//!
//! Each tick samples the control surfaces once and turns them into engine
//! edits. Pads and faders are auto-centering and contribute a delta
//! proportional to their deflection for as long as they are held; the
//! rotation dial is absolute and contributes the angle travelled since the
//! previous tick.

use cp_ir::{InputStore, Vec3};

use crate::transform::TransformEngine;

/// Tick period of the control loop in milliseconds (50 Hz).
pub const TICK_INTERVAL_MS: u64 = 20;

/// Deflections smaller than this count as centred.
const CENTRE_EPSILON: f32 = 1e-6;

/// Per-tick gains applied to control deflections.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlGains {
    /// Meters per tick at full position-pad deflection
    pub position: f32,
    /// Meters per tick at full elevation deflection
    pub elevation: f32,
    /// dB per tick at full attenuation deflection
    pub attenuation: f32,
    /// Scale factor change per tick at full scale-pad deflection
    pub scale: f32,
}

impl Default for ControlGains {
    fn default() -> Self {
        Self {
            position: 0.05,
            elevation: 0.05,
            attenuation: 0.5,
            scale: 0.02,
        }
    }
}

/// One sample of every control surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlFrame {
    /// 2-axis position pad, each axis in [-1, 1]
    pub position_pad: [f32; 2],
    /// Elevation fader in [-1, 1]
    pub elevation: f32,
    /// Attenuation fader in [-1, 1]
    pub attenuation: f32,
    /// Absolute rotation dial angle in degrees
    pub rotation: f32,
    /// 2-axis scale pad, each axis in [-1, 1]
    pub scale_pad: [f32; 2],
}

/// Which engine edits a tick actually wrote.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickActivity {
    pub moved: bool,
    pub rotated: bool,
    pub scaled: bool,
    pub attenuated: bool,
}

impl TickActivity {
    /// True if the tick wrote anything to the store.
    pub fn any(&self) -> bool {
        self.moved || self.rotated || self.scaled || self.attenuated
    }
}

/// Normalise an angle in degrees into [-180, 180).
pub fn normalize_angle(degrees: f32) -> f32 {
    let mut a = degrees % 360.0;
    if a >= 180.0 {
        a -= 360.0;
    } else if a < -180.0 {
        a += 360.0;
    }
    a
}

/// Signed angle travelled from `prev` to `curr`, taking the short way
/// across the ±180° seam.
pub fn wrap_angle_delta(prev: f32, curr: f32) -> f32 {
    let mut delta = curr - prev;
    if delta > 180.0 {
        delta -= 360.0;
    }
    if delta < -180.0 {
        delta += 360.0;
    }
    delta
}

fn deflection(value: f32) -> f32 {
    let v = value.clamp(-1.0, 1.0);
    if v.abs() < CENTRE_EPSILON {
        0.0
    } else {
        v
    }
}

/// Samples a [`ControlFrame`] per tick and drives a [`TransformEngine`].
#[derive(Clone, Debug, Default)]
pub struct ControlLoop {
    gains: ControlGains,
    /// Dial angle seen on the previous tick; None until the first sample.
    prev_rotation: Option<f32>,
}

impl ControlLoop {
    pub fn new(gains: ControlGains) -> Self {
        Self { gains, prev_rotation: None }
    }

    pub fn gains(&self) -> ControlGains {
        self.gains
    }

    /// Forget the rotation baseline; the next tick only re-anchors the dial.
    pub fn reset(&mut self) {
        self.prev_rotation = None;
    }

    /// Run one tick.
    pub fn tick<S: InputStore + ?Sized>(
        &mut self,
        engine: &TransformEngine,
        store: &mut S,
        frame: &ControlFrame,
    ) -> TickActivity {
        let mut activity = TickActivity::default();

        // Pad and elevation are one combined position edit.
        let delta = Vec3::new(
            deflection(frame.position_pad[0]) * self.gains.position,
            deflection(frame.position_pad[1]) * self.gains.position,
            deflection(frame.elevation) * self.gains.elevation,
        );
        activity.moved = engine.apply_position_delta(store, delta);

        let atten = deflection(frame.attenuation) * self.gains.attenuation;
        activity.attenuated = engine.apply_attenuation_delta(store, atten);

        let angle = normalize_angle(frame.rotation);
        if let Some(prev) = self.prev_rotation {
            activity.rotated = engine.apply_rotation_delta(store, wrap_angle_delta(prev, angle));
        }
        self.prev_rotation = Some(angle);

        let sx = 1.0 + deflection(frame.scale_pad[0]) * self.gains.scale;
        let sy = 1.0 + deflection(frame.scale_pad[1]) * self.gains.scale;
        activity.scaled = engine.apply_scale_delta(store, sx, sy);

        log::trace!("tick: {:?} {:?}", delta, activity);
        activity
    }
}
