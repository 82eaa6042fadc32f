// Definitions that are used throughout all modules

use serde::{Deserialize, Serialize};

// Enumeration to track the space type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Space {
    Real,
    Reciprocal,
}

impl Space {
    /// The dual space, i.e. the space the reciprocal of a lattice lives in.
    pub fn dual(self) -> Space {
        match self {
            Space::Real => Space::Reciprocal,
            Space::Reciprocal => Space::Real,
        }
    }
}
