//! Crystallographic sites and the ideal (configurational) mixing term.
//!
//! Occupancies come from the chemistry of each end-member and are consumed
//! here only as numbers: for every end-member and every site, the fractions
//! of the site's species sum to one.

use crate::composition::Composition;
use crate::error::{SolutionError, SolutionResult};
use nalgebra::{DMatrix, DVector};
use rt_core::numeric::x_ln_x;
use rt_core::units::constants::GAS_CONSTANT;

/// Tolerance on the per-site occupancy sum of an end-member.
const OCCUPANCY_SUM_TOL: f64 = 1e-9;

/// One crystallographic site.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub name: String,
    /// Sites per formula unit
    pub multiplicity: f64,
    /// Species that can occupy the site
    pub species: Vec<String>,
}

impl Site {
    pub fn new(name: impl Into<String>, multiplicity: f64, species: Vec<String>) -> Self {
        Self {
            name: name.into(),
            multiplicity,
            species,
        }
    }
}

/// Site multiplicities and the end-member × species occupancy matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteModel {
    sites: Vec<Site>,
    /// Rows are end-members; columns are site species, site by site.
    occupancies: DMatrix<f64>,
    /// Multiplicity of the site owning each column
    column_multiplicity: Vec<f64>,
    total_multiplicity: f64,
    /// Configurational entropy of each pure end-member [J/(K·mol)]
    endmember_entropies: DVector<f64>,
}

/// Ideal-mixing contributions at one composition.
#[derive(Debug, Clone)]
pub(crate) struct IdealTerms {
    pub site_fractions: DVector<f64>,
    /// Configurational entropy of the solution minus that of its end-members
    pub mixing_entropy: f64,
    pub chemical_potentials: DVector<f64>,
    pub hessian: DMatrix<f64>,
}

impl SiteModel {
    /// One site of multiplicity 1 on which end-member `i` is species `i`;
    /// gives the plain `−R Σ x ln x` entropy.
    pub fn ideal(endmembers: usize) -> Self {
        let site = Site::new(
            "M",
            1.0,
            (0..endmembers).map(|i| format!("em{i}")).collect(),
        );
        Self {
            sites: vec![site],
            occupancies: DMatrix::identity(endmembers, endmembers),
            column_multiplicity: vec![1.0; endmembers],
            total_multiplicity: 1.0,
            endmember_entropies: DVector::zeros(endmembers),
        }
    }

    /// Build from sites and one occupancy row per end-member.
    pub fn new(sites: Vec<Site>, occupancies: Vec<Vec<f64>>) -> SolutionResult<Self> {
        if sites.is_empty() {
            return Err(SolutionError::InvalidSiteModel {
                what: "at least one site is required",
            });
        }
        if occupancies.is_empty() {
            return Err(SolutionError::InvalidSiteModel {
                what: "at least one end-member is required",
            });
        }
        let mut column_multiplicity = Vec::new();
        for site in &sites {
            if !(site.multiplicity.is_finite() && site.multiplicity > 0.0) {
                return Err(SolutionError::InvalidSiteModel {
                    what: "site multiplicity must be positive",
                });
            }
            if site.species.is_empty() {
                return Err(SolutionError::InvalidSiteModel {
                    what: "site has no species",
                });
            }
            column_multiplicity.extend(std::iter::repeat_n(site.multiplicity, site.species.len()));
        }

        let columns = column_multiplicity.len();
        for row in &occupancies {
            if row.len() != columns {
                return Err(SolutionError::ShapeMismatch {
                    what: "site occupancies",
                    expected: columns,
                    found: row.len(),
                });
            }
            if row.iter().any(|o| !(o.is_finite() && (0.0..=1.0).contains(o))) {
                return Err(SolutionError::InvalidSiteModel {
                    what: "occupancies must lie in [0, 1]",
                });
            }
            let mut start = 0;
            for site in &sites {
                let end = start + site.species.len();
                let sum: f64 = row[start..end].iter().sum();
                if (sum - 1.0).abs() > OCCUPANCY_SUM_TOL {
                    return Err(SolutionError::InvalidSiteModel {
                        what: "occupancies on each site must sum to 1",
                    });
                }
                start = end;
            }
        }

        let occupancies =
            DMatrix::from_fn(occupancies.len(), columns, |i, c| occupancies[i][c]);
        let endmember_entropies = DVector::from_fn(occupancies.nrows(), |i, _| {
            -GAS_CONSTANT
                * (0..columns)
                    .map(|c| column_multiplicity[c] * x_ln_x(occupancies[(i, c)]))
                    .sum::<f64>()
        });
        let total_multiplicity = sites.iter().map(|s| s.multiplicity).sum();
        Ok(Self {
            sites,
            occupancies,
            column_multiplicity,
            total_multiplicity,
            endmember_entropies,
        })
    }

    pub fn endmember_count(&self) -> usize {
        self.occupancies.nrows()
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn occupancies(&self) -> &DMatrix<f64> {
        &self.occupancies
    }

    /// Configurational entropy of each pure end-member [J/(K·mol)].
    pub fn endmember_configurational_entropies(&self) -> &DVector<f64> {
        &self.endmember_entropies
    }

    /// Fraction of each site species, `X_c = Σ x_i occ_ic`.
    pub fn site_fractions(&self, composition: &Composition) -> SolutionResult<DVector<f64>> {
        self.check_len(composition)?;
        Ok(self.fractions_of(&composition.to_vector()))
    }

    /// `−R Σ_c mult_c X_c ln X_c` [J/(K·mol)].
    pub fn configurational_entropy(&self, composition: &Composition) -> SolutionResult<f64> {
        let x = self.site_fractions(composition)?;
        Ok(self.entropy_of(&x))
    }

    fn check_len(&self, composition: &Composition) -> SolutionResult<()> {
        if composition.len() != self.endmember_count() {
            return Err(SolutionError::ShapeMismatch {
                what: "site occupancies",
                expected: self.endmember_count(),
                found: composition.len(),
            });
        }
        Ok(())
    }

    fn fractions_of(&self, x: &DVector<f64>) -> DVector<f64> {
        let n = x.sum();
        self.occupancies.tr_mul(x) / n
    }

    fn entropy_of(&self, site_fractions: &DVector<f64>) -> f64 {
        -GAS_CONSTANT
            * site_fractions
                .iter()
                .zip(&self.column_multiplicity)
                .map(|(&xc, &m)| m * x_ln_x(xc))
                .sum::<f64>()
    }

    /// Ideal terms at amounts `x` (length already checked by the caller).
    ///
    /// Chemical potentials are normalised so a pure end-member has zero
    /// ideal contribution. An end-member whose species is absent from the
    /// solution gets `−∞`.
    pub(crate) fn ideal_terms(&self, x: &DVector<f64>, t_k: f64) -> IdealTerms {
        let rt = GAS_CONSTANT * t_k;
        let n = x.sum();
        let m = self.endmember_count();
        let cols = self.column_multiplicity.len();
        let site_fractions = self.fractions_of(x);

        let mixing_entropy =
            self.entropy_of(&site_fractions) - x.dot(&self.endmember_entropies) / n;

        let chemical_potentials = DVector::from_fn(m, |i, _| {
            rt * (0..cols)
                .filter(|&c| self.occupancies[(i, c)] > 0.0)
                .map(|c| {
                    let occ = self.occupancies[(i, c)];
                    self.column_multiplicity[c] * occ * (site_fractions[c] / occ).ln()
                })
                .sum::<f64>()
        });

        let hessian = DMatrix::from_fn(m, m, |i, j| {
            let site_sum: f64 = (0..cols)
                .map(|c| {
                    let occ = self.occupancies[(i, c)] * self.occupancies[(j, c)];
                    if occ > 0.0 {
                        self.column_multiplicity[c] * occ / (site_fractions[c] * n)
                    } else {
                        0.0
                    }
                })
                .sum();
            rt * (site_sum - self.total_multiplicity / n)
        });

        IdealTerms {
            site_fractions,
            mixing_entropy,
            chemical_potentials,
            hessian,
        }
    }
}
