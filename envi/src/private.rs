//! Support code for `#[derive(Envi)]`. Not public API.
//!
//! Derived code calls `(&Probe::<T>::new()).envi_shape()`. Method resolution picks
//! [`FieldProbe`] when `T: EnvValue` and falls back to [`OpaqueProbe`] through an
//! extra autoref otherwise, so fields of unknown types are skipped instead of
//! failing to compile.

use crate::convert::assign;
use crate::error::Cause;
use crate::shape::Shape;
use crate::value::EnvValue;
use std::marker::PhantomData;

pub struct Probe<T>(PhantomData<T>);

impl<T> Probe<T> {
    #[allow(clippy::new_without_default)]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

pub trait FieldProbe<T> {
    fn envi_shape(&self) -> Shape;
    fn envi_assign(&self, slot: &mut T, value: &str, separator: &str) -> Result<(), Cause>;
}

impl<T: EnvValue> FieldProbe<T> for Probe<T> {
    fn envi_shape(&self) -> Shape {
        T::shape()
    }

    fn envi_assign(&self, slot: &mut T, value: &str, separator: &str) -> Result<(), Cause> {
        assign(slot, value, separator)
    }
}

pub trait OpaqueProbe<T> {
    fn envi_shape(&self) -> Shape;
    fn envi_assign(&self, slot: &mut T, value: &str, separator: &str) -> Result<(), Cause>;
}

impl<T> OpaqueProbe<T> for &Probe<T> {
    fn envi_shape(&self) -> Shape {
        Shape::Opaque
    }

    fn envi_assign(&self, _slot: &mut T, _value: &str, _separator: &str) -> Result<(), Cause> {
        Ok(())
    }
}
