//! Calculators. Currency-like results go through [`money::round2`].

pub mod age;
pub mod aspect;
pub mod bmi;
pub mod loan;
pub mod money;
pub mod percentage;
pub mod salary;
pub mod tip;
