//! Closed-form Tait compression (Holland & Powell 2011).
//!
//! With `y = 1 + b (P − P0 − Pth)`:
//!
//! ```text
//! V / V0 = 1 − a (1 − y^−c)
//! K / K0 = y (a + (1 − a) y^c)
//! ```
//!
//! Both directions are explicit, so neither volume nor pressure needs a
//! root finder.

use crate::error::{EosError, EosResult};
use crate::params::EndMemberParameters;

/// `|1 − c|` below which the pressure integral switches to its log form.
const UNIT_EXPONENT_EPS: f64 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaitConstants {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl TaitConstants {
    /// `a = (1+K')/(1+K'+K K'')`, `b = K'/K − K''/(1+K')`,
    /// `c = (1+K'+K K'')/(K'²+K'−K K'')`.
    pub fn new(k0: f64, kprime0: f64, kdprime0: f64) -> EosResult<Self> {
        let one_plus_kp = 1.0 + kprime0;
        if one_plus_kp <= 0.0 {
            return Err(EosError::domain("Kprime_0", kprime0, "1 + K' must be positive"));
        }
        let den_a = one_plus_kp + k0 * kdprime0;
        if den_a <= 0.0 {
            return Err(EosError::domain(
                "Kdprime_0",
                kdprime0,
                "1 + K' + K0 K'' must be positive",
            ));
        }
        let den_c = kprime0 * kprime0 + kprime0 - k0 * kdprime0;
        if den_c <= 0.0 {
            return Err(EosError::domain(
                "Kdprime_0",
                kdprime0,
                "K'^2 + K' - K0 K'' must be positive",
            ));
        }

        let a = one_plus_kp / den_a;
        let b = kprime0 / k0 - kdprime0 / one_plus_kp;
        let c = den_a / den_c;
        if !(b > 0.0 && b.is_finite()) {
            return Err(EosError::domain("Kprime_0", kprime0, "Tait constant b must be positive"));
        }
        Ok(Self { a, b, c })
    }

    pub fn from_params(params: &EndMemberParameters) -> EosResult<Self> {
        Self::new(params.k0(), params.kprime0(), params.kdprime0())
    }

    /// `y` at a pressure offset `x = P − P0` and thermal pressure `pth`.
    pub fn compression_argument(&self, x: f64, pth: f64) -> EosResult<f64> {
        let y = 1.0 + self.b * (x - pth);
        if !(y > 0.0) {
            return Err(EosError::domain(
                "pressure",
                x,
                "outside the range where the Tait equation is defined",
            ));
        }
        Ok(y)
    }

    /// V/V0 at argument `y`.
    pub fn volume_ratio(&self, y: f64) -> f64 {
        1.0 - self.a * (1.0 - y.powf(-self.c))
    }

    /// K/K0 at argument `y`.
    pub fn bulk_modulus_ratio(&self, y: f64) -> f64 {
        y * (self.a + (1.0 - self.a) * y.powf(self.c))
    }

    /// ∫ V dP / V0 from `P0` to `P0 + x`, where `y` and `y0` are the
    /// arguments at `x` and at zero offset. Exactly zero when `x == 0`.
    pub fn pressure_integral(&self, x: f64, y: f64, y0: f64) -> f64 {
        let one_minus_c = 1.0 - self.c;
        let tail = if one_minus_c.abs() < UNIT_EXPONENT_EPS {
            (y.ln() - y0.ln()) / self.b
        } else {
            (y.powf(one_minus_c) - y0.powf(one_minus_c)) / (self.b * one_minus_c)
        };
        (1.0 - self.a) * x + self.a * tail
    }

    /// `y` that reproduces a volume ratio, or a domain error when the ratio
    /// lies beyond the asymptote `1 − a`.
    pub fn argument_for_volume_ratio(&self, ratio: f64) -> EosResult<f64> {
        let base = 1.0 - (1.0 - ratio) / self.a;
        if !(ratio > 0.0 && base > 0.0) {
            return Err(EosError::domain(
                "volume",
                ratio,
                "volume ratio outside the range of the Tait equation",
            ));
        }
        Ok(base.powf(-1.0 / self.c))
    }
}
