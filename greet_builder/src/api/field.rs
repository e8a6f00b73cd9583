use std::collections::HashSet;
use std::marker::PhantomData;

use crate::api::capture::*;
use crate::api::ConversionError;
use crate::prelude::{Collectable, Convertible};

/// An option field that takes a single value, usable at most once.
///
/// If never specified on the Cli, the variable keeps whatever value it held before parsing (see [`Single::default`]).
pub struct Single<'a, T> {
    variable: &'a mut T,
}

impl<'a, T: Convertible> Single<'a, T> {
    /// Create a single value field.
    pub fn new(variable: &'a mut T) -> Self {
        Self { variable }
    }

    /// Set the variable to its default value, right away.
    /// The parser never assigns defaults; this simply initializes the variable at declaration time.
    ///
    /// ### Example
    /// ```
    /// # use greet_builder as greet;
    /// use greet::Single;
    ///
    /// let mut age: u32 = 0;
    /// Single::new(&mut age).default(18);
    /// assert_eq!(age, 18);
    /// ```
    pub fn default(self, value: T) -> Self {
        *self.variable = value;
        self
    }
}

impl<'a, T: Convertible> AnonymousCapturable for Single<'a, T> {
    fn capture(&mut self, token: &str) -> Result<(), ConversionError> {
        *self.variable = T::from_token(token)?;
        Ok(())
    }
}

impl<'a, T: Convertible + 'a> Capturable<'a> for Single<'a, T> {
    fn default_token(&self) -> Option<String> {
        Some(self.variable.to_token())
    }

    fn bind(self) -> Binding<'a> {
        Binding::Single(Box::new(self))
    }
}

/// An option field that takes no values, usable at most once.
/// The variable is set to `true` when the option is used.
pub struct Flag<'a> {
    variable: &'a mut bool,
}

impl<'a> Flag<'a> {
    /// Create a flag field.
    pub fn new(variable: &'a mut bool) -> Self {
        Self { variable }
    }
}

impl<'a> Capturable<'a> for Flag<'a> {
    fn bind(self) -> Binding<'a> {
        Binding::Flag(self.variable)
    }
}

/// An option field that takes no values, usable any number of times.
/// The variable is incremented on each use (ex: `-vvv` counts to `3`).
pub struct Counter<'a> {
    variable: &'a mut usize,
}

impl<'a> Counter<'a> {
    /// Create a counter field.
    pub fn new(variable: &'a mut usize) -> Self {
        Self { variable }
    }
}

impl<'a> Capturable<'a> for Counter<'a> {
    fn bind(self) -> Binding<'a> {
        Binding::Counter(self.variable)
    }
}

/// An option field that takes a single value per use, usable any number of times.
/// Each value is added to the collection `C`, in the order the uses appear.
pub struct Multi<'a, C, T>
where
    C: 'a + Collectable<T>,
{
    variable: &'a mut C,
    _phantom: PhantomData<T>,
}

impl<'a, C, T> Multi<'a, C, T>
where
    C: 'a + Collectable<T>,
{
    /// Create a multiple value field.
    pub fn new(variable: &'a mut C) -> Self {
        Self {
            variable,
            _phantom: PhantomData,
        }
    }
}

impl<'a, C, T> AnonymousCapturable for Multi<'a, C, T>
where
    T: Convertible,
    C: 'a + Collectable<T>,
{
    fn capture(&mut self, token: &str) -> Result<(), ConversionError> {
        let value = T::from_token(token)?;
        self.variable.add(value);
        Ok(())
    }
}

impl<'a, C, T> Capturable<'a> for Multi<'a, C, T>
where
    T: Convertible + 'a,
    C: 'a + Collectable<T>,
{
    fn bind(self) -> Binding<'a> {
        Binding::Multi(Box::new(self))
    }
}

impl<T> Collectable<T> for Vec<T> {
    fn add(&mut self, item: T) {
        self.push(item);
    }
}

impl<T: Eq + std::hash::Hash> Collectable<T> for HashSet<T> {
    fn add(&mut self, item: T) {
        self.insert(item);
    }
}
