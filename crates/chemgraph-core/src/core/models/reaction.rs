use super::ids::{AtomId, BondId, ContainerId};
use super::set::ChemObjectSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReactionDirection {
    #[default]
    Forward,
    Backward,
    Bidirectional,
    NoGo,
    RetroSynthetic,
    Resonance,
    Undirected,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid reaction direction string")]
pub struct ParseReactionDirectionError;

impl FromStr for ReactionDirection {
    type Err = ParseReactionDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "forward" => Ok(Self::Forward),
            "backward" => Ok(Self::Backward),
            "bidirectional" => Ok(Self::Bidirectional),
            "no_go" | "nogo" => Ok(Self::NoGo),
            "retro_synthetic" | "retrosynthetic" => Ok(Self::RetroSynthetic),
            "resonance" => Ok(Self::Resonance),
            "undirected" => Ok(Self::Undirected),
            _ => Err(ParseReactionDirectionError),
        }
    }
}

impl fmt::Display for ReactionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Bidirectional => "bidirectional",
            Self::NoGo => "no_go",
            Self::RetroSynthetic => "retro_synthetic",
            Self::Resonance => "resonance",
            Self::Undirected => "undirected",
        };
        f.write_str(s)
    }
}

/// An object that can take part in an atom-to-atom mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mapped {
    Atom(AtomId),
    Bond(BondId),
}

impl From<AtomId> for Mapped {
    fn from(id: AtomId) -> Self {
        Mapped::Atom(id)
    }
}

impl From<BondId> for Mapped {
    fn from(id: BondId) -> Self {
        Mapped::Bond(id)
    }
}

/// Relates an object on the reactant side to its counterpart on the product side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mapping {
    pub first: Mapped,
    pub second: Mapped,
}

impl Mapping {
    pub fn new(first: impl Into<Mapped>, second: impl Into<Mapped>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn related(&self) -> [Mapped; 2] {
        [self.first, self.second]
    }
}

/// Which side of a reaction a container takes part on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionRole {
    Reactant,
    Product,
    Agent,
}

/// Reactants, products and agents, each with its stoichiometric coefficients.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reaction {
    pub(crate) reactants: ChemObjectSet<ContainerId>,
    pub(crate) products: ChemObjectSet<ContainerId>,
    pub(crate) agents: ChemObjectSet<ContainerId>,
    pub(crate) mappings: Vec<Mapping>,
    pub direction: ReactionDirection,
}

impl Reaction {
    pub fn participants(&self, role: ReactionRole) -> &ChemObjectSet<ContainerId> {
        match role {
            ReactionRole::Reactant => &self.reactants,
            ReactionRole::Product => &self.products,
            ReactionRole::Agent => &self.agents,
        }
    }

    pub(crate) fn participants_mut(
        &mut self,
        role: ReactionRole,
    ) -> &mut ChemObjectSet<ContainerId> {
        match role {
            ReactionRole::Reactant => &mut self.reactants,
            ReactionRole::Product => &mut self.products,
            ReactionRole::Agent => &mut self.agents,
        }
    }

    pub fn reactants(&self) -> &ChemObjectSet<ContainerId> {
        &self.reactants
    }

    pub fn products(&self) -> &ChemObjectSet<ContainerId> {
        &self.products
    }

    pub fn agents(&self) -> &ChemObjectSet<ContainerId> {
        &self.agents
    }

    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    /// Every container taking part, in reactant, product, agent order.
    pub fn all_participants(&self) -> impl Iterator<Item = ContainerId> + '_ {
        self.reactants
            .iter()
            .chain(self.products.iter())
            .chain(self.agents.iter())
    }

    pub fn reactant_count(&self) -> usize {
        self.reactants.len()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }
}
