//! Einstein-model thermal pressure used by the modified Tait equation.

use crate::params::EndMemberParameters;

/// Thermal pressure relative to the reference temperature,
/// `Pth(T) = α0 K0 θ / ξ0 · (1/(e^(θ/T) − 1) − 1/(e^(θ/T0) − 1))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EinsteinThermalPressure {
    theta: f64,
    t0: f64,
    alpha0_k0: f64,
    xi0: f64,
}

/// Scaled Einstein heat capacity `ξ(u) = u² eᵘ / (eᵘ − 1)²`.
fn xi(u: f64) -> f64 {
    // Written in e^-u so large u does not overflow.
    let em = (-u).exp();
    u * u * em / ((1.0 - em) * (1.0 - em))
}

/// `1 / (eᵘ − 1)`
fn bose(u: f64) -> f64 {
    1.0 / u.exp_m1()
}

impl EinsteinThermalPressure {
    pub fn new(params: &EndMemberParameters) -> Self {
        let theta = params.einstein_temperature();
        let t0 = params.reference().temperature_k;
        Self {
            theta,
            t0,
            alpha0_k0: params.alpha0() * params.k0(),
            xi0: xi(theta / t0),
        }
    }

    /// Pth at `t`. Exactly zero at the reference temperature.
    pub fn pressure(&self, t: f64) -> f64 {
        self.alpha0_k0 * self.theta / self.xi0 * (bose(self.theta / t) - bose(self.theta / self.t0))
    }

    /// dPth/dT = α0 K0 ξ(θ/T) / ξ0.
    pub fn dpdt(&self, t: f64) -> f64 {
        self.alpha0_k0 * xi(self.theta / t) / self.xi0
    }

    /// d²Pth/dT².
    pub fn d2pdt2(&self, t: f64) -> f64 {
        let u = self.theta / t;
        self.dpdt(t) * (1.0 - 2.0 / u + 2.0 * bose(u)) * u / t
    }
}
