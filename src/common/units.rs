// src/common/units.rs

//! Minimal physical-quantity support: just enough to tag readings with their
//! unit and to check/rescale setpoints before they are put on the wire.

use core::fmt;

/// Physical unit attached to a reading or setpoint. Values are always held in
/// the unprefixed base unit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Unit {
    Volt,
    Ampere,
    Ohm,
    Hertz,
    Second,
}

impl Unit {
    pub const fn symbol(&self) -> &'static str {
        match self {
            Unit::Volt => "V",
            Unit::Ampere => "A",
            Unit::Ohm => "Ω",
            Unit::Hertz => "Hz",
            Unit::Second => "s",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A magnitude with a unit, stored in base units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quantity {
    value: f64,
    unit: Unit,
}

impl Quantity {
    /// Creates a quantity from a value already expressed in the base unit.
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn mega(value: f64, unit: Unit) -> Self {
        Self::new(value * 1e6, unit)
    }

    pub fn kilo(value: f64, unit: Unit) -> Self {
        Self::new(value * 1e3, unit)
    }

    pub fn milli(value: f64, unit: Unit) -> Self {
        Self::new(value * 1e-3, unit)
    }

    pub fn micro(value: f64, unit: Unit) -> Self {
        Self::new(value * 1e-6, unit)
    }

    /// The magnitude in base units.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub const fn unit(&self) -> Unit {
        self.unit
    }

    /// Returns the magnitude expressed in `unit`, or an error if the
    /// dimensions differ.
    pub fn rescale(&self, unit: Unit) -> Result<f64, IncompatibleUnit> {
        if self.unit == unit {
            Ok(self.value)
        } else {
            Err(IncompatibleUnit {
                expected: unit,
                got: self.unit,
            })
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Raised when a quantity of one dimension is given where another is needed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct IncompatibleUnit {
    pub expected: Unit,
    pub got: Unit,
}

/// Value accepted by quantity-valued setters.
///
/// A bare number is assumed to already be in the setter's unit; a `Quantity`
/// must carry that unit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Setpoint {
    Bare(f64),
    Quantity(Quantity),
}

impl Setpoint {
    /// Resolves the setpoint to a plain magnitude in `unit`.
    pub fn in_unit(&self, unit: Unit) -> Result<f64, IncompatibleUnit> {
        match self {
            Setpoint::Bare(value) => Ok(*value),
            Setpoint::Quantity(q) => q.rescale(unit),
        }
    }
}

impl From<f64> for Setpoint {
    fn from(value: f64) -> Self {
        Setpoint::Bare(value)
    }
}

impl From<Quantity> for Setpoint {
    fn from(value: Quantity) -> Self {
        Setpoint::Quantity(value)
    }
}

/// A single reading returned by a measurement. `unit` is `None` for modes
/// without a defined physical unit (sampling modes, for instance).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub unit: Option<Unit>,
}

impl Reading {
    pub const fn with_unit(value: f64, unit: Unit) -> Self {
        Self {
            value,
            unit: Some(unit),
        }
    }

    pub const fn bare(value: f64) -> Self {
        Self { value, unit: None }
    }

    /// The reading as a `Quantity`, when it has a unit.
    pub fn quantity(&self) -> Option<Quantity> {
        self.unit.map(|unit| Quantity::new(self.value, unit))
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Some(unit) => write!(f, "{} {}", self.value, unit),
            None => write!(f, "{}", self.value),
        }
    }
}
