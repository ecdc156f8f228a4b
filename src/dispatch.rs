use crate::fields::{ScalarField3D, TensorField3D};
use crate::lattice::Lattice;
use crate::region::Box3D;

/// What a functional did to one of its operands. The host engine uses this
/// to decide which cached quantities to invalidate after an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modif {
    Variables,
    Nothing,
}

/// Region-scoped operation coupling a lattice, a scalar field and a tensor
/// field, with every operand explicitly typed.
pub trait LatticeScalarTensorFunctional {
    fn process(
        &self,
        domain: &Box3D,
        lattice: &mut Lattice,
        rho: &ScalarField3D,
        u: &TensorField3D,
    );

    /// Mutation report in operand order: lattice, scalar field, tensor field.
    fn modification(&self) -> [Modif; 3];
}

/// Runs `functional` over `domain` and hands back its mutation report.
pub fn apply_processing_functional<F>(
    functional: &F,
    domain: &Box3D,
    lattice: &mut Lattice,
    rho: &ScalarField3D,
    u: &TensorField3D,
) -> [Modif; 3]
where
    F: LatticeScalarTensorFunctional,
{
    functional.process(domain, lattice, rho, u);
    functional.modification()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Descriptor;

    struct RestMassSetter {
        value: crate::global_variables::Float,
    }

    impl LatticeScalarTensorFunctional for RestMassSetter {
        fn process(
            &self,
            domain: &Box3D,
            lattice: &mut Lattice,
            _rho: &ScalarField3D,
            _u: &TensorField3D,
        ) {
            for index in domain.iter() {
                lattice.get_cell_mut(index).f[0] = self.value;
            }
        }

        fn modification(&self) -> [Modif; 3] {
            [Modif::Variables, Modif::Nothing, Modif::Nothing]
        }
    }

    #[test]
    fn test_apply_reports_and_restricts_to_domain() {
        let mut lattice = Lattice::new(3, 1, 1, 1.0, Descriptor::d3q19());
        let rho = ScalarField3D::new(3, 1, 1);
        let u = TensorField3D::new(3, 1, 1);
        let domain = Box3D::new(0, 0, 0, 0, 0, 0);
        let untouched = lattice.get_cell([2, 0, 0]).f[0];

        let report = apply_processing_functional(
            &RestMassSetter { value: 0.42 },
            &domain,
            &mut lattice,
            &rho,
            &u,
        );

        assert_eq!(report, [Modif::Variables, Modif::Nothing, Modif::Nothing]);
        assert_eq!(lattice.get_cell([0, 0, 0]).f[0], 0.42);
        assert_eq!(lattice.get_cell([2, 0, 0]).f[0], untouched);
    }
}
