use bitflags::bitflags;

bitflags! {
    /// Boolean state flags carried by every ChemObject.
    ///
    /// All flags default to cleared. Algorithms use them as scratch marks (`VISITED`,
    /// `PLACED`) or to record perceived properties (`IN_RING`, `AROMATIC`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ChemFlags: u16 {
        /// Marked by a graph traversal.
        const VISITED = 0x0001;
        /// Coordinates have been assigned by a layout step.
        const PLACED = 0x0002;
        /// Member of at least one ring.
        const IN_RING = 0x0004;
        /// Explicitly known not to be a ring member.
        const NOT_IN_RING = 0x0008;
        /// Part of an aromatic system.
        const AROMATIC = 0x0010;
        /// Part of an aliphatic system.
        const ALIPHATIC = 0x0020;
        /// Participates in an atom-atom mapping.
        const MAPPED = 0x0040;
        /// Reactive centre of a reaction.
        const REACTIVE_CENTER = 0x0080;
        /// Eligible for atom typing.
        const TYPEABLE = 0x0100;
        /// Part of a conjugated system.
        const IN_CONJUGATED_SYSTEM = 0x0200;
        /// Either single or double bond, resolved later.
        const SINGLE_OR_DOUBLE = 0x0400;
        const HYDROGEN_BOND_DONOR = 0x0800;
        const HYDROGEN_BOND_ACCEPTOR = 0x1000;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_are_cleared() {
        let flags = ChemFlags::default();
        assert!(!flags.contains(ChemFlags::VISITED));
        assert!(!flags.contains(ChemFlags::AROMATIC));
        assert!(flags.is_empty());
    }

    #[test]
    fn set_and_clear_individual_flags() {
        let mut flags = ChemFlags::default();
        flags.set(ChemFlags::PLACED, true);
        flags.set(ChemFlags::IN_RING, true);
        assert!(flags.contains(ChemFlags::PLACED | ChemFlags::IN_RING));
        flags.set(ChemFlags::PLACED, false);
        assert!(!flags.contains(ChemFlags::PLACED));
        assert!(flags.contains(ChemFlags::IN_RING));
    }
}
