use crate::core::models::ids::{AtomId, ContainerId};
use crate::engine::error::ChemError;
use crate::engine::space::ChemSpace;
use crate::engine::typing::{AtomTypeMatcher, HydrogenAdder};
use tracing::{info, instrument, warn};

/// Perceives atom types and adds implicit hydrogens to every atom of `container`.
///
/// The adder reads type names from the atoms, so each non-pseudo atom is tagged with its
/// matched type name for the duration of the call. The names the atoms carried before
/// the call are restored afterwards, whether or not the adder succeeds.
///
/// # Errors
///
/// Any matcher error is returned before a single atom is touched. Adder errors are
/// returned after the type names have been restored.
#[instrument(skip_all, name = "hydrogen_addition_workflow")]
pub fn run(
    space: &mut ChemSpace,
    container: ContainerId,
    matcher: &impl AtomTypeMatcher,
    adder: &impl HydrogenAdder,
) -> Result<(), ChemError> {
    let atoms = space.container(container)?.atoms().to_vec();
    info!(atoms = atoms.len(), "Starting atom-type perception.");

    let mut snapshot: Vec<(AtomId, Option<String>)> = Vec::with_capacity(atoms.len());
    let mut matched: Vec<(AtomId, Option<String>)> = Vec::with_capacity(atoms.len());
    for atom in atoms {
        let value = space.atom(atom)?;
        if value.is_pseudo() {
            continue;
        }
        snapshot.push((atom, value.atom_type_name().map(str::to_string)));
        let atom_type = matcher.find_matching_atom_type(space, container, atom)?;
        matched.push((atom, atom_type.name));
    }

    for (atom, name) in &matched {
        space.set_atom_type_name(*atom, name.as_deref())?;
    }

    let outcome = adder.add_implicit_hydrogens(space, container);

    for (atom, name) in &snapshot {
        space.set_atom_type_name(*atom, name.as_deref())?;
    }

    match &outcome {
        Ok(()) => info!("Implicit hydrogens added and atom-type names restored."),
        Err(e) => warn!(error = %e, "Hydrogen adder failed; atom-type names restored."),
    }
    outcome
}
