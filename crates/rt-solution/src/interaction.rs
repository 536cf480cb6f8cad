//! Pairwise interaction parameters of a regular (van Laar) solution.
//!
//! Every pair carries `W = h − T s + P v`, where `s` is an excess entropy.
//! Some tables tabulate a thermal correction instead (`W = W_H + T W_T +
//! P W_P`); such sources declare [`EntropyConvention::ThermalCorrection`]
//! and are converted once, when the matrix is built.

use crate::error::{SolutionError, SolutionResult};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// One unordered pair's interaction, in the excess-entropy convention.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Interaction {
    /// Enthalpic part [J/mol]
    pub h: f64,
    /// Excess entropy [J/(K·mol)]
    #[serde(default)]
    pub s: f64,
    /// Excess volume [m³/mol]
    #[serde(default)]
    pub v: f64,
}

impl Interaction {
    pub const ZERO: Interaction = Interaction {
        h: 0.0,
        s: 0.0,
        v: 0.0,
    };

    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    pub fn enthalpic(h: f64) -> Self {
        Self { h, s: 0.0, v: 0.0 }
    }

    /// `W = h − T s + P v` [J/mol].
    pub fn w(&self, p_pa: f64, t_k: f64) -> f64 {
        self.h - t_k * self.s + p_pa * self.v
    }

    fn is_finite(&self) -> bool {
        self.h.is_finite() && self.s.is_finite() && self.v.is_finite()
    }
}

/// How a source tabulates the temperature coefficient of `W`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntropyConvention {
    /// `W = h − T s + P v`
    #[default]
    ExcessEntropy,
    /// `W = W_H + T W_T + P W_P`, so `s = −W_T`
    ThermalCorrection,
}

impl EntropyConvention {
    /// Convert a tabulated temperature coefficient to an excess entropy.
    pub fn excess_entropy(self, tabulated: f64) -> f64 {
        match self {
            Self::ExcessEntropy => tabulated,
            Self::ThermalCorrection => -tabulated,
        }
    }
}

/// Interactions among `size` end-members plus per-end-member asymmetry
/// factors (all 1 for a symmetric solution).
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionMatrix {
    size: usize,
    /// Upper triangle in row order: (0,1), (0,2), …, (1,2), …
    pairs: Vec<Interaction>,
    alphas: Vec<f64>,
    source_convention: EntropyConvention,
}

impl InteractionMatrix {
    /// No excess terms.
    pub fn ideal(size: usize) -> Self {
        Self {
            size,
            pairs: vec![Interaction::ZERO; pair_count(size)],
            alphas: vec![1.0; size],
            source_convention: EntropyConvention::ExcessEntropy,
        }
    }

    /// Symmetric regular solution from the upper-triangle pairs in row order.
    pub fn symmetric(
        size: usize,
        pairs: Vec<Interaction>,
        convention: EntropyConvention,
    ) -> SolutionResult<Self> {
        Self::asymmetric(size, pairs, vec![1.0; size], convention)
    }

    /// Asymmetric (van Laar) solution with one positive factor per end-member.
    pub fn asymmetric(
        size: usize,
        pairs: Vec<Interaction>,
        alphas: Vec<f64>,
        convention: EntropyConvention,
    ) -> SolutionResult<Self> {
        if size == 0 {
            return Err(SolutionError::InvalidInteraction {
                what: "a solution needs at least one end-member",
            });
        }
        if pairs.len() != pair_count(size) {
            return Err(SolutionError::ShapeMismatch {
                what: "interaction pairs",
                expected: pair_count(size),
                found: pairs.len(),
            });
        }
        if alphas.len() != size {
            return Err(SolutionError::ShapeMismatch {
                what: "asymmetry factors",
                expected: size,
                found: alphas.len(),
            });
        }
        if pairs.iter().any(|w| !w.is_finite()) {
            return Err(SolutionError::InvalidInteraction {
                what: "non-finite interaction parameter",
            });
        }
        if alphas.iter().any(|a| !(a.is_finite() && *a > 0.0)) {
            return Err(SolutionError::InvalidInteraction {
                what: "asymmetry factors must be positive and finite",
            });
        }

        let pairs = pairs
            .into_iter()
            .map(|w| Interaction {
                s: convention.excess_entropy(w.s),
                ..w
            })
            .collect();
        Ok(Self {
            size,
            pairs,
            alphas,
            source_convention: convention,
        })
    }

    /// Build from row-wise upper-triangular tables: row `i` lists the pairs
    /// `(i, i+1) … (i, m−1)`, so there are `m − 1` rows for `m` end-members.
    /// Missing entropy or volume tables mean zero.
    pub fn from_triangular(
        energy: &[Vec<f64>],
        entropy: Option<&[Vec<f64>]>,
        volume: Option<&[Vec<f64>]>,
        alphas: Option<Vec<f64>>,
        convention: EntropyConvention,
    ) -> SolutionResult<Self> {
        let size = energy.len() + 1;
        check_triangle("interaction energy table", energy, size)?;
        if let Some(table) = entropy {
            check_triangle("interaction entropy table", table, size)?;
        }
        if let Some(table) = volume {
            check_triangle("interaction volume table", table, size)?;
        }

        let at = |table: Option<&[Vec<f64>]>, i: usize, k: usize| {
            table.map(|t| t[i][k]).unwrap_or(0.0)
        };
        let mut pairs = Vec::with_capacity(pair_count(size));
        for (i, row) in energy.iter().enumerate() {
            for (k, &h) in row.iter().enumerate() {
                pairs.push(Interaction::new(h, at(entropy, i, k), at(volume, i, k)));
            }
        }
        let alphas = alphas.unwrap_or_else(|| vec![1.0; size]);
        Self::asymmetric(size, pairs, alphas, convention)
    }

    /// Number of end-members.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn alphas(&self) -> &[f64] {
        &self.alphas
    }

    /// Convention the parameters were tabulated in. Stored values are
    /// always excess entropies.
    pub fn source_convention(&self) -> EntropyConvention {
        self.source_convention
    }

    /// Interaction of pair (i, j) in either order; zero on the diagonal.
    pub fn pair(&self, i: usize, j: usize) -> Option<Interaction> {
        if i >= self.size || j >= self.size {
            return None;
        }
        if i == j {
            return Some(Interaction::ZERO);
        }
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        Some(self.pairs[pair_index(self.size, lo, hi)])
    }

    pub fn is_symmetric(&self) -> bool {
        self.alphas.iter().all(|&a| a == 1.0)
    }

    pub fn is_ideal(&self) -> bool {
        self.pairs.iter().all(|w| *w == Interaction::ZERO)
    }

    /// Full symmetric `W(P, T)` matrix with a zero diagonal.
    pub fn w_matrix(&self, p_pa: f64, t_k: f64) -> DMatrix<f64> {
        self.full_matrix(|w| w.w(p_pa, t_k))
    }

    pub(crate) fn full_matrix(&self, part: impl Fn(&Interaction) -> f64) -> DMatrix<f64> {
        let m = self.size;
        let mut out = DMatrix::zeros(m, m);
        for i in 0..m {
            for j in (i + 1)..m {
                let value = part(&self.pairs[pair_index(m, i, j)]);
                out[(i, j)] = value;
                out[(j, i)] = value;
            }
        }
        out
    }
}

fn pair_count(size: usize) -> usize {
    size * size.saturating_sub(1) / 2
}

/// Position of (i, j), i < j, in the row-ordered upper triangle.
fn pair_index(size: usize, i: usize, j: usize) -> usize {
    i * (2 * size - i - 1) / 2 + (j - i - 1)
}

fn check_triangle(what: &'static str, table: &[Vec<f64>], size: usize) -> SolutionResult<()> {
    if table.len() != size - 1 {
        return Err(SolutionError::ShapeMismatch {
            what,
            expected: size - 1,
            found: table.len(),
        });
    }
    for (i, row) in table.iter().enumerate() {
        if row.len() != size - 1 - i {
            return Err(SolutionError::ShapeMismatch {
                what,
                expected: size - 1 - i,
                found: row.len(),
            });
        }
    }
    Ok(())
}
