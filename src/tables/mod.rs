//! Static coefficient tables.
//!
//! Every lookup is lenient: a key outside the table resolves to a named
//! default instead of failing, because categorical inputs may come from
//! unvalidated form state.

pub mod climate;
pub mod context;
pub mod material;
pub mod program;

pub use climate::{ClimateTable, ClimateZone, LegacyClimateZone, DEFAULT_CLIMATE_FACTOR};
pub use context::{
    embodied_context_baseline, operational_context_baseline, EmbodiedContext,
    OperationalContext, DEFAULT_EMBODIED_BASELINE,
};
pub use material::{
    average_material_factor, material_embodied_carbon, material_factor, Material,
    CARBON_TO_ENERGY_MJ_PER_KG, DEFAULT_MATERIAL_EMBODIED_CARBON, DEFAULT_MATERIAL_FACTOR,
};
pub use program::{
    program_baseline, program_factor, ProgramType, DEFAULT_PROGRAM_BASELINE,
    DEFAULT_PROGRAM_FACTOR,
};

/// Conversion from kWh to MJ.
pub const MJ_PER_KWH: f64 = 3.6;
