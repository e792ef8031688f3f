use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::{LegoError, Result};

/// One wire of a node: the X column and the Z column of leg `leg_index` of
/// the node `owner_id`.
///
/// Legs keep their identity through contraction, so a leg of a contracted
/// tensor still names the node it came from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[display("{owner_id}:{leg_index}")]
pub struct Leg {
    pub owner_id: String,
    pub leg_index: usize,
}

impl Leg {
    pub fn new(owner_id: impl Into<String>, leg_index: usize) -> Self {
        Self {
            owner_id: owner_id.into(),
            leg_index,
        }
    }
}

/// An unordered pair of distinct legs that are joined during contraction.
///
/// ```
/// use legonet::{Connection, Leg};
///
/// let forward = Connection::new(Leg::new("a", 0), Leg::new("b", 1)).unwrap();
/// let backward = Connection::new(Leg::new("b", 1), Leg::new("a", 0)).unwrap();
/// assert_eq!(forward.normalized(), backward.normalized());
/// assert!(Connection::new(Leg::new("a", 0), Leg::new("a", 0)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Connection {
    from: Leg,
    to: Leg,
}

impl Connection {
    /// # Errors
    ///
    /// Returns [`LegoError::SelfConnection`] if both ends are the same leg.
    pub fn new(from: Leg, to: Leg) -> Result<Self> {
        let connection = Self { from, to };
        connection.validate()?;
        Ok(connection)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.from == self.to {
            return Err(LegoError::SelfConnection { leg: self.from.clone() });
        }
        Ok(())
    }

    #[must_use]
    pub fn from(&self) -> &Leg {
        &self.from
    }

    #[must_use]
    pub fn to(&self) -> &Leg {
        &self.to
    }

    /// Both ends with the smaller leg first.
    #[must_use]
    pub fn normalized(&self) -> (&Leg, &Leg) {
        if self.from <= self.to {
            (&self.from, &self.to)
        } else {
            (&self.to, &self.from)
        }
    }

    #[must_use]
    pub fn touches(&self, leg: &Leg) -> bool {
        &self.from == leg || &self.to == leg
    }

    /// The end opposite to `leg`, if `leg` is an end of this connection.
    #[must_use]
    pub fn other_end(&self, leg: &Leg) -> Option<&Leg> {
        if &self.from == leg {
            Some(&self.to)
        } else if &self.to == leg {
            Some(&self.from)
        } else {
            None
        }
    }
}

impl TryFrom<(Leg, Leg)> for Connection {
    type Error = LegoError;

    fn try_from((from, to): (Leg, Leg)) -> Result<Self> {
        Self::new(from, to)
    }
}
