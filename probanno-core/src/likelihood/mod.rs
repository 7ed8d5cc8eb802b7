//! The likelihood stages, each consuming the full output of the previous one.
//!
//! ```text
//! hits -> roleset -> role -> organism -> complex -> reaction
//! ```

pub mod complex;
pub mod organism;
pub mod reaction;
pub mod role;
pub mod roleset;

pub use complex::{ComplexLikelihood, ComplexType, complex_likelihoods};
pub use organism::{OrganismRoleLikelihood, organism_role_likelihoods};
pub use reaction::{CatalystSummary, ReactionLikelihood, ReactionType, reaction_likelihoods};
pub use role::{GeneRoleLikelihood, role_likelihoods};
pub use roleset::{
    GeneRolesetLikelihoods, RolesetLikelihood, RolesetOutcome, RolesetStage, marble_pick,
    roleset_likelihoods,
};
