//! A named solid solution: end-member records plus its mixing model.

use crate::composition::Composition;
use crate::error::{SolutionError, SolutionResult};
use crate::interaction::InteractionMatrix;
use crate::mix::{MixResult, MixingOptions, mix_with_options};
use crate::sites::SiteModel;
use rt_core::units::{Pressure, Temperature};
use rt_eos::{EndMemberParameters, EosState, evaluate};

#[derive(Debug, Clone)]
pub struct SolidSolution {
    name: String,
    endmembers: Vec<EndMemberParameters>,
    sites: SiteModel,
    interactions: InteractionMatrix,
}

impl SolidSolution {
    /// Solution on a single site with one species per end-member.
    pub fn new(
        name: impl Into<String>,
        endmembers: Vec<EndMemberParameters>,
        interactions: InteractionMatrix,
    ) -> SolutionResult<Self> {
        let sites = SiteModel::ideal(endmembers.len());
        Self::with_sites(name, endmembers, sites, interactions)
    }

    pub fn with_sites(
        name: impl Into<String>,
        endmembers: Vec<EndMemberParameters>,
        sites: SiteModel,
        interactions: InteractionMatrix,
    ) -> SolutionResult<Self> {
        let m = endmembers.len();
        if m == 0 {
            return Err(SolutionError::InvalidInteraction {
                what: "a solution needs at least one end-member",
            });
        }
        if interactions.size() != m {
            return Err(SolutionError::ShapeMismatch {
                what: "interaction matrix",
                expected: m,
                found: interactions.size(),
            });
        }
        if sites.endmember_count() != m {
            return Err(SolutionError::ShapeMismatch {
                what: "site occupancies",
                expected: m,
                found: sites.endmember_count(),
            });
        }
        Ok(Self {
            name: name.into(),
            endmembers,
            sites,
            interactions,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn endmembers(&self) -> &[EndMemberParameters] {
        &self.endmembers
    }

    pub fn sites(&self) -> &SiteModel {
        &self.sites
    }

    pub fn interactions(&self) -> &InteractionMatrix {
        &self.interactions
    }

    /// Evaluate every end-member at (P, T). The first failure is returned.
    pub fn endmember_states(&self, p: Pressure, t: Temperature) -> SolutionResult<Vec<EosState>> {
        self.endmembers
            .iter()
            .map(|em| evaluate(em, p, t).map_err(SolutionError::from))
            .collect()
    }

    /// Molar properties of the solution at (P, T, x).
    pub fn evaluate(
        &self,
        p: Pressure,
        t: Temperature,
        composition: &Composition,
    ) -> SolutionResult<MixResult> {
        self.evaluate_with_options(p, t, composition, &MixingOptions::default())
    }

    pub fn evaluate_with_options(
        &self,
        p: Pressure,
        t: Temperature,
        composition: &Composition,
        options: &MixingOptions,
    ) -> SolutionResult<MixResult> {
        if composition.len() != self.endmembers.len() {
            return Err(SolutionError::ShapeMismatch {
                what: "composition",
                expected: self.endmembers.len(),
                found: composition.len(),
            });
        }
        let states = self.endmember_states(p, t)?;
        tracing::trace!(solution = %self.name, "end-members evaluated");
        mix_with_options(&states, composition, &self.interactions, &self.sites, options)
    }
}
