//! Structural validators and the classification pipeline.
//!
//! Every binary format is a plain function registered in [`VALIDATORS`]
//! together with its tier. The pipeline walks that table in order and the
//! first acceptance wins; text scoring only runs once the table is
//! exhausted.

pub mod batch;
pub mod compressed;
pub mod config;
pub mod executable;
pub mod images;
pub mod io;
pub mod objects;
pub mod palette;
pub mod pipeline;
pub mod raster;
pub mod rename;
pub mod resource;

use crate::core::{ByteReader, Tier, Validation};

pub use batch::{classify_all, classify_paths};
pub use config::{ClassifierConfig, LimitConfig, TextConfig};
pub use io::read_artifact;
pub use pipeline::{classify, Classifier};
pub use rename::{plan_rename, RenamePlan};

/// Signature shared by every structural validator.
pub type ValidateFn = fn(&ByteReader<'_>, &ClassifierConfig) -> Validation;

/// One entry of the ordered validator table.
#[derive(Clone, Copy)]
pub struct Validator {
    pub name: &'static str,
    pub tier: Tier,
    pub check: ValidateFn,
}

impl Validator {
    const fn new(name: &'static str, tier: Tier, check: ValidateFn) -> Self {
        Self { name, tier, check }
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.name)
            .field("tier", &self.tier)
            .finish()
    }
}

/// All structural validators, in consultation order.
///
/// Tiers never interleave. Within a tier the earlier entry wins if two
/// ever accept the same buffer.
pub static VALIDATORS: &[Validator] = &[
    Validator::new("rsc", Tier::Container, resource::validate_rsc),
    Validator::new("turboc", Tier::Container, objects::validate_turboc),
    Validator::new("devpac", Tier::Container, objects::validate_devpac),
    Validator::new("gemdos", Tier::Container, executable::validate_gemdos),
    Validator::new("degas", Tier::FixedImage, images::validate_degas),
    Validator::new("degas_elite", Tier::FixedImage, images::validate_degas_elite),
    Validator::new("neochrome", Tier::FixedImage, images::validate_neochrome),
    Validator::new("stad", Tier::Compressed, compressed::validate_stad),
    Validator::new("degas_compressed", Tier::Compressed, compressed::validate_degas_compressed),
    Validator::new("gem_img", Tier::Heuristic, raster::validate_gem_img),
];

/// Validators of one tier, in table order.
pub fn validators_in(tier: Tier) -> impl Iterator<Item = &'static Validator> {
    VALIDATORS.iter().filter(move |v| v.tier == tier)
}
