pub mod bc;
pub mod descriptor;
pub mod dispatch;
pub mod fields;
pub mod global_variables;
pub mod io;
pub mod lattice;
pub mod region;
pub mod simulation;

pub use bc::{
    ConfigError, PeriodicPressureFunctional, PeriodicPressureManager, PeriodicPressureParameters,
};
pub use descriptor::Descriptor;
pub use fields::{ScalarField3D, TensorField3D};
pub use global_variables::*;
pub use lattice::{Lattice, PressureGradient};
pub use region::Box3D;
