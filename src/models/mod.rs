//! The two physiological models: lipid digestion kinetics in vitro and the
//! oil-coupled pharmacokinetics of an orally dosed drug.

pub mod digestion;
pub mod pk;
