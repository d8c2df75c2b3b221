//! Dissolution, oil partitioning, absorption and elimination of an orally dosed drug
//! co-ingested with a digestible oil (fed state, human small intestine).
//!
//! The state vector has six components:
//!
//! | index | quantity | unit |
//! |-------|----------|------|
//! | [SOLID_DRUG] | mass of undissolved drug | mg |
//! | [OIL_DRUG] | cumulative drug taken up into oil | mg |
//! | [AQUEOUS_DRUG] | drug concentration in the aqueous lumen | mg/m³ |
//! | [FATTY_ACID] | fatty acids released net of absorption | mmol/cm³ |
//! | [PLASMA_DRUG] | drug concentration in plasma | mg/m³ (= ng/mL) |
//! | [LUMEN_FRACTION] | residual absorptive area once the lumen empties | m² |
//!
//! Time is in seconds. The lumen is modelled in three [Phase]s: the fed absorption
//! window, the emptying window after the residence time, and the cleared intestine.

use std::f64::consts::{LN_2, PI};

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::simulator::{integrate, Equation, IntegratorConfig, Trajectory};
use crate::LipidsolError;

pub const SOLID_DRUG: usize = 0;
pub const OIL_DRUG: usize = 1;
pub const AQUEOUS_DRUG: usize = 2;
pub const FATTY_ACID: usize = 3;
pub const PLASMA_DRUG: usize = 4;
pub const LUMEN_FRACTION: usize = 5;

/// Number of states of the pharmacokinetic model
pub const NSTATES: usize = 6;

/// Constants of the lapatinib / high-fat breakfast scenario.
///
/// Oil-related defaults describe 54 g of fat (high-fat breakfast); the oil volume,
/// the aqueous volume and the transit rate usually have to be changed together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PkParameters {
    /// Diffusion coefficient of the solid drug in water (m²/s)
    pub drug_diffusivity: f64,
    /// Diffusion coefficient of micelles in water (m²/s)
    pub micelle_diffusivity: f64,
    /// Bulk aqueous volume of the lumen (m³)
    pub bulk_volume: f64,
    /// Thickness of the static layer around the particles (m)
    pub boundary_layer: f64,
    /// Drug solubility in buffer (mg/m³)
    pub aqueous_solubility: f64,
    /// Initial dose (mg)
    pub dose: f64,
    /// Drug density (mg/m³)
    pub drug_density: f64,
    /// Initial drug particle radius (m)
    pub particle_radius: f64,
    /// Drug solubilised per mmol of surfactant (mg/mmol)
    pub micellar_solubilization: f64,
    /// Surfactant concentration before digestion (mmol/cm³)
    pub baseline_surfactant: f64,
    /// Michaelis-Menten maximum rate of fatty acid absorption (mmol/(cm³·s))
    pub fa_absorption_vmax: f64,
    /// Michaelis-Menten constant of fatty acid absorption (mmol/cm³)
    pub fa_absorption_km: f64,
    /// Permeability of the oil/aqueous interface (cm/s)
    pub oil_permeability: f64,
    /// Initial volume of oil (cm³)
    pub oil_volume: f64,
    /// Drug solubility in oil (mg/cm³)
    pub oil_solubility: f64,
    /// Oil density (g/cm³)
    pub oil_density: f64,
    /// Molar mass of the oil (g/mol)
    pub oil_molar_mass: f64,
    /// Digestible fatty acids per mole of oil
    pub fatty_acids_per_triglyceride: f64,
    /// Digestion constant per unit oil surface (mmol/(s·cm²))
    pub digestion_rate: f64,
    /// First-order inhibition of digestion (1/s)
    pub digestion_inhibition: f64,
    /// Initial diameter of the oil droplets (cm)
    pub droplet_diameter: f64,
    /// Intestinal permeability of the drug (m/s)
    pub intestinal_permeability: f64,
    /// Intestinal radius (m)
    pub intestinal_radius: f64,
    /// Volume of distribution (m³)
    pub distribution_volume: f64,
    /// Elimination half-life (s)
    pub elimination_half_life: f64,
    /// Rate at which fluid leaves the intestine after the residence time (1/s)
    pub transit_rate: f64,
    /// Residence time in the small intestine (s)
    pub residence_time: f64,
    /// Residence plus emptying time, after which the lumen holds no more drug (s).
    /// Must not be smaller than `residence_time`.
    pub clearance_time: f64,
}

impl Default for PkParameters {
    fn default() -> Self {
        Self {
            drug_diffusivity: 4.51e-10,
            micelle_diffusivity: 1.44e-10,
            bulk_volume: 2.5e-4,
            boundary_layer: 2.0e-5,
            aqueous_solubility: 7.0e3,
            dose: 1500.0,
            drug_density: 1.318e9,
            particle_radius: 1.0e-5,
            micellar_solubilization: 55.63,
            baseline_surfactant: 14.4e-3,
            fa_absorption_vmax: 4.4e-4,
            fa_absorption_km: 2.2e-3,
            oil_permeability: 0.0,
            oil_volume: 54.0,
            oil_solubility: 0.0136,
            oil_density: 0.92,
            oil_molar_mass: 870.0,
            fatty_acids_per_triglyceride: 2.0,
            digestion_rate: 3.6e-9,
            digestion_inhibition: 4.3e-4,
            droplet_diameter: 3.86e-5,
            intestinal_permeability: 1.01e-6,
            intestinal_radius: 1.75e-2,
            distribution_volume: 80e-3,
            elimination_half_life: 13.4 * 60.0 * 60.0,
            transit_rate: 5e-4,
            residence_time: 10800.0,
            clearance_time: 14400.0,
        }
    }
}

impl PkParameters {
    /// Aqueous lumen volume (cm³)
    pub fn aqueous_volume(&self) -> f64 {
        self.bulk_volume * 1e6
    }

    /// Initial digestible fatty acids (mmol)
    pub fn fa0(&self) -> f64 {
        self.fatty_acids_per_triglyceride * self.oil_volume * self.oil_density
            / self.oil_molar_mass
            * 1000.0
    }

    /// Lateral surface of the intestine seen as a cylinder (m²)
    pub fn intestinal_area(&self) -> f64 {
        2.0 * self.bulk_volume / self.intestinal_radius
    }
}

/// Intermediate quantities of one derivative evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PkDerived {
    /// Number of oil droplets
    pub droplet_count: f64,
    /// Dissolution constant (1/(m²·mg^(1/3)))
    pub par: f64,
    /// Drug solubility in micelles (mg/m³)
    pub micelle_solubility: f64,
    /// Micelle/buffer partition coefficient
    pub kmw: f64,
    /// Oil/aqueous partition coefficient
    pub koaq: f64,
    /// Remaining oil surface (cm²)
    pub oil_area: f64,
    /// Elimination constant (1/s)
    pub kel: f64,
    /// Intestinal absorptive area (m²)
    pub intestinal_area: f64,
    /// Initial digestible fatty acids (mmol)
    pub fa0: f64,
    /// Aqueous lumen volume (cm³)
    pub aqueous_volume: f64,
}

impl PkDerived {
    /// Evaluate the derived quantities for a fatty acid concentration (mmol/cm³).
    ///
    /// The remaining oil fraction `(FA0 - c_FA·Vaq) / FA0` is taken as zero once the
    /// released fatty acids reach `FA0`, so the oil surface vanishes instead of
    /// becoming undefined.
    pub fn evaluate(p: &PkParameters, fatty_acid: f64) -> Self {
        let d0 = p.droplet_diameter;
        let droplet_count = p.oil_volume / (d0.powi(3) * PI / 6.0);
        let par = 3.0 * p.dose.cbrt() / (p.boundary_layer * p.drug_density * p.particle_radius);
        let surfactant = p.micellar_solubilization * (p.baseline_surfactant + fatty_acid);
        let micelle_solubility = surfactant * 1e6;
        let kmw = micelle_solubility / p.aqueous_solubility;
        let koaq = p.oil_solubility / (surfactant + p.aqueous_solubility * 1e-6);

        let fa0 = p.fa0();
        let aqueous_volume = p.aqueous_volume();
        let remaining = ((fa0 - fatty_acid * aqueous_volume) / fa0).max(0.0);
        let oil_area = droplet_count * PI * d0.powi(2) * remaining.powf(2.0 / 3.0);

        Self {
            droplet_count,
            par,
            micelle_solubility,
            kmw,
            koaq,
            oil_area,
            kel: LN_2 / p.elimination_half_life,
            intestinal_area: p.intestinal_area(),
            fa0,
            aqueous_volume,
        }
    }
}

/// Regime of the lumen at a given time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Drug dissolves and is absorbed through the full intestinal area
    FedAbsorption,
    /// Drug still dissolves, the absorptive area decays as fluid leaves
    Emptying,
    /// The intestine has emptied, only digestion and elimination continue
    Cleared,
}

impl Phase {
    pub fn at(t: f64, params: &PkParameters) -> Self {
        if t < params.residence_time {
            Phase::FedAbsorption
        } else if t < params.clearance_time {
            Phase::Emptying
        } else {
            Phase::Cleared
        }
    }

    /// Whether dissolution, oil uptake and the aqueous balance are active
    pub fn lumen_active(self) -> bool {
        !matches!(self, Phase::Cleared)
    }

    /// Whether the absorptive area decays
    pub fn emptying(self) -> bool {
        !matches!(self, Phase::FedAbsorption)
    }
}

/// The six-state pharmacokinetic model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PkModel {
    params: PkParameters,
}

impl PkModel {
    pub fn new(params: PkParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PkParameters {
        &self.params
    }

    /// Full dose as solid drug, empty compartments and the full intestinal area.
    pub fn initial_state(&self) -> [f64; NSTATES] {
        let mut y = [0.0; NSTATES];
        y[SOLID_DRUG] = self.params.dose;
        y[LUMEN_FRACTION] = self.params.intestinal_area();
        y
    }

    /// Evaluate `dy/dt` for the state `y` at time `t`.
    ///
    /// No component is bounded here: negative states are only prevented by
    /// integrating with [IntegratorConfig::nonnegative].
    pub fn derivatives(&self, y: &[f64], t: f64, dy: &mut [f64]) {
        let p = &self.params;
        let d = PkDerived::evaluate(p, y[FATTY_ACID]);
        let phase = Phase::at(t, p);
        dy[..NSTATES].fill(0.0);

        let absorption =
            d.intestinal_area * p.intestinal_permeability * y[AQUEOUS_DRUG] / p.distribution_volume;

        if phase.lumen_active() {
            let solid = y[SOLID_DRUG];
            let aqueous = y[AQUEOUS_DRUG];
            let micellar_drive = d.micelle_solubility - aqueous * d.kmw / (d.kmw + 1.0);
            let aqueous_drive = p.aqueous_solubility - aqueous / (d.kmw + 1.0);
            let drive = p.drug_diffusivity * aqueous_drive + p.micelle_diffusivity * micellar_drive;

            if solid > 0.0 && micellar_drive > 0.0 {
                dy[SOLID_DRUG] = -(d.par * solid.powf(2.0 / 3.0) * drive);
            }

            dy[OIL_DRUG] = p.oil_permeability * d.oil_area * aqueous * 1e-6;

            dy[AQUEOUS_DRUG] = if solid > 0.0 {
                d.par / p.bulk_volume * solid.powf(2.0 / 3.0) * drive
                    - dy[OIL_DRUG] / p.bulk_volume
                    - absorption
            } else {
                -absorption
            };
        }

        let fatty_acid = y[FATTY_ACID];
        if d.fa0 - fatty_acid * d.aqueous_volume > 0.0 {
            dy[FATTY_ACID] = p.digestion_rate / d.aqueous_volume * d.oil_area
                - p.digestion_inhibition * fatty_acid
                - p.fa_absorption_vmax * fatty_acid / (p.fa_absorption_km + fatty_acid);
        }

        if phase.emptying() {
            dy[LUMEN_FRACTION] = -p.transit_rate * y[LUMEN_FRACTION];
            dy[PLASMA_DRUG] = y[LUMEN_FRACTION] * p.intestinal_permeability * y[AQUEOUS_DRUG]
                / p.distribution_volume
                - d.kel * y[PLASMA_DRUG];
        } else {
            dy[PLASMA_DRUG] = absorption - d.kel * y[PLASMA_DRUG];
        }
    }

    /// Integrate from [PkModel::initial_state] over `times` (s).
    pub fn simulate(
        &self,
        times: &[f64],
        config: &IntegratorConfig,
    ) -> Result<Trajectory, LipidsolError> {
        integrate(self, &self.initial_state(), times, config)
    }
}

impl Equation for PkModel {
    fn nstates(&self) -> usize {
        NSTATES
    }

    #[inline(always)]
    fn diffeq(&self, x: &[f64], t: f64, dx: &mut [f64]) {
        self.derivatives(x, t, dx);
    }

    /// The switches between [Phase]s.
    fn breakpoints(&self) -> Vec<f64> {
        vec![self.params.residence_time, self.params.clearance_time]
    }
}

/// `npoints` evaluation times over the reference window of 1 s to 5 h.
pub fn pk_times(npoints: usize) -> Array1<f64> {
    Array1::linspace(1.0, 18000.0, npoints)
}

/// Convert a concentration from mg/m³ (ng/mL) to µg/mL.
#[inline(always)]
pub fn plasma_ug_per_ml(concentration: f64) -> f64 {
    concentration / 1e3
}
