//! Coin amount arithmetic.
//!
//! All balances, rewards, caps, and pools are expressed as [`Coins`], an
//! integer count of the ledger's minor unit. The ledger implementation
//! decides what one unit is worth; the engine only does integer arithmetic
//! on it and never assumes a floating representation.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

/// An amount of vortex coins in the ledger's minor-unit representation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Coins(pub i64);

impl Coins {
    pub const ZERO: Coins = Coins(0);

    /// Creates an amount from a raw minor-unit count.
    pub const fn new(units: i64) -> Self {
        Coins(units)
    }

    /// The raw minor-unit count.
    pub const fn units(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Splits this amount evenly among `n` recipients, rounding down.
    ///
    /// Returns `Coins::ZERO` when `n` is zero. The integer remainder of the
    /// division is not represented here; callers that care about it use
    /// [`Coins::split_remainder`].
    pub const fn split_among(self, n: u64) -> Coins {
        if n == 0 {
            Coins::ZERO
        } else {
            Coins(self.0 / n as i64)
        }
    }

    /// The amount left over after [`Coins::split_among`] credits `n` equal
    /// shares.
    pub const fn split_remainder(self, n: u64) -> Coins {
        if n == 0 {
            self
        } else {
            Coins(self.0 % n as i64)
        }
    }

    /// Saturating addition, used for vote tallies that must never wrap.
    pub const fn saturating_add(self, other: Coins) -> Coins {
        Coins(self.0.saturating_add(other.0))
    }
}

impl Add for Coins {
    type Output = Coins;

    fn add(self, rhs: Coins) -> Coins {
        Coins(self.0 + rhs.0)
    }
}

impl AddAssign for Coins {
    fn add_assign(&mut self, rhs: Coins) {
        self.0 += rhs.0;
    }
}

impl Sub for Coins {
    type Output = Coins;

    fn sub(self, rhs: Coins) -> Coins {
        Coins(self.0 - rhs.0)
    }
}

impl Mul<i64> for Coins {
    type Output = Coins;

    fn mul(self, rhs: i64) -> Coins {
        Coins(self.0 * rhs)
    }
}

impl Sum for Coins {
    fn sum<I: Iterator<Item = Coins>>(iter: I) -> Coins {
        iter.fold(Coins::ZERO, Add::add)
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
