use std::f64::consts::{PI, TAU};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Driven, Damped Pendulum
=======================

A nonlinear oscillator advanced once per audio sample. What reaches the
speaker is the sine of the pendulum angle, so small swings sound like a sine
tone at the natural frequency and large or chaotic swings grow rich harmonics.

Vocabulary
----------

  angle             Pendulum angle in radians, kept in (-pi, pi].

  velocity          Angular velocity (rad/s). Kicked by the "ping" trigger.

  driving_phase     Phase of the external periodic force (radians).

  natural_frequency Small-angle oscillation frequency (rad/s), written w0.

  damping           Linear friction coefficient (1/s).

  driving_amplitude Magnitude of the periodic force.

  driving_frequency Angular frequency of the periodic force (rad/s).


The Equations
-------------

  d/dt(angle)         = velocity
  d/dt(velocity)      = - w0^2 * sin(angle)
                        - damping * velocity
                        + cos(angle) * driving_amplitude * sin(driving_phase)
  d/dt(driving_phase) = driving_frequency

The cos(angle) factor projects a horizontal force onto the swing direction.


The Step (semi-implicit / leapfrog)
-----------------------------------

Order matters; it fixes the energy behaviour of the scheme:

  1. output   = sin(angle)                      (pre-update angle)
  2. angle   += velocity * dt, then wrap
  3. accel    = f(new angle, old velocity, old driving_phase)
  4. velocity += accel * dt
  5. driving_phase += driving_frequency * dt, wrap from above only

Moving position first and evaluating force at the new position makes this
symplectic: for the undamped, undriven pendulum the normalized energy

  E = velocity^2 / (4 * w0^2) + (1 - cos(angle)) / 2

oscillates in a narrow band instead of drifting like forward Euler.
E is 0 at rest and 1 when the pendulum just reaches the top.


Wrapping
--------

The angle is wrapped on both sides. The driving phase only gets reduced when
it climbs past pi: driving_frequency is non-negative on every control path,
so a lower wrap never triggers in practice. A negative phase is left alone.

Nothing here guards against NaN or runaway growth. Extreme forcing is allowed
to blow up audibly.
*/

/// Control parameters, written by the control surface and read by the
/// integrator.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumParams {
    pub natural_frequency: f64, // rad/s
    pub damping: f64,
    pub driving_amplitude: f64,
    pub driving_frequency: f64, // rad/s
    pub ping_strength: f64,     // velocity added per ping
}

impl Default for PendulumParams {
    fn default() -> Self {
        Self {
            natural_frequency: 1.0,
            damping: 1.0,
            driving_amplitude: 1.0,
            driving_frequency: 1.0,
            ping_strength: 1.0,
        }
    }
}

/// Dynamic state, owned by the render thread.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PendulumState {
    pub angle: f64,
    pub velocity: f64,
    pub driving_phase: f64,
}

impl PendulumState {
    pub fn new(angle: f64, velocity: f64, driving_phase: f64) -> Self {
        Self {
            angle,
            velocity,
            driving_phase,
        }
    }

    /// Advance one sample and return the value to emit, `sin(angle)` taken
    /// before the update.
    #[inline]
    pub fn step(&mut self, params: &PendulumParams, dt: f64) -> f64 {
        let output = self.angle.sin();

        self.angle = wrap_angle(self.angle + self.velocity * dt);

        let (sin_angle, cos_angle) = self.angle.sin_cos();
        let accel = -params.natural_frequency * params.natural_frequency * sin_angle
            - params.damping * self.velocity
            + cos_angle * params.driving_amplitude * self.driving_phase.sin();
        self.velocity += accel * dt;

        self.driving_phase += params.driving_frequency * dt;
        if self.driving_phase > PI {
            self.driving_phase -= TAU;
        }

        output
    }

    /// Apply a one-shot velocity impulse.
    #[inline]
    pub fn kick(&mut self, impulse: f64) {
        self.velocity += impulse;
    }

    /// Normalized energy: 0 at rest, 1 at the top of the swing.
    pub fn energy(&self, natural_frequency: f64) -> f64 {
        self.velocity * self.velocity / (4.0 * natural_frequency * natural_frequency)
            + (1.0 - self.angle.cos()) / 2.0
    }
}

/// Reduce an angle into (-pi, pi].
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    let mut wrapped = angle;
    if wrapped > PI {
        wrapped -= TAU;
    } else if wrapped <= -PI {
        wrapped += TAU;
    }

    // One correction covers |velocity * dt| < 2pi; anything faster needs the
    // full reduction.
    if wrapped > PI || wrapped <= -PI {
        wrapped = PI - (PI - angle).rem_euclid(TAU);
    }
    wrapped
}
