// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::fmt::Display;

/// Dense index of a berth in its catalog.
///
/// Berth ids are assigned in catalog order starting at zero, so they double
/// as positions into per-berth arrays.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BerthId(u32);

impl BerthId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        BerthId(id)
    }

    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for BerthId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BerthId({})", self.0)
    }
}

impl From<u32> for BerthId {
    fn from(value: u32) -> Self {
        BerthId(value)
    }
}

/// Position of a coach in its catalog.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoachIndex(usize);

impl CoachIndex {
    #[inline]
    pub const fn new(index: usize) -> Self {
        CoachIndex(index)
    }

    #[inline]
    pub const fn value(self) -> usize {
        self.0
    }
}

impl Display for CoachIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CoachIndex({})", self.0)
    }
}

/// Coach designation printed on the carriage, e.g. `S1` or `B2`.
#[repr(transparent)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoachId(String);

impl CoachId {
    #[inline]
    pub fn new(value: impl Into<String>) -> Self {
        CoachId(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CoachId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CoachId {
    fn from(value: &str) -> Self {
        CoachId(value.to_owned())
    }
}

impl From<String> for CoachId {
    fn from(value: String) -> Self {
        CoachId(value)
    }
}

/// Travel class of a coach, e.g. `Sleeper` or `AC_3_Tier`.
#[repr(transparent)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoachClass(String);

impl CoachClass {
    #[inline]
    pub fn new(value: impl Into<String>) -> Self {
        CoachClass(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CoachClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CoachClass {
    fn from(value: &str) -> Self {
        CoachClass(value.to_owned())
    }
}

impl From<String> for CoachClass {
    fn from(value: String) -> Self {
        CoachClass(value)
    }
}

/// Opaque identifier of an occupant (a ticketed passenger).
#[repr(transparent)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OccupantId(String);

impl OccupantId {
    #[inline]
    pub fn new(value: impl Into<String>) -> Self {
        OccupantId(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OccupantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OccupantId {
    fn from(value: &str) -> Self {
        OccupantId(value.to_owned())
    }
}

impl From<String> for OccupantId {
    fn from(value: String) -> Self {
        OccupantId(value)
    }
}

impl AsRef<str> for OccupantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_berth_id_indexes_densely() {
        let id = BerthId::new(17);
        assert_eq!(id.index(), 17);
        assert_eq!(id.to_string(), "BerthId(17)");
        assert!(BerthId::new(3) < BerthId::new(4));
    }

    #[test]
    fn test_label_ids_display_verbatim() {
        assert_eq!(CoachId::new("S1").to_string(), "S1");
        assert_eq!(CoachClass::from("AC_3_Tier").as_str(), "AC_3_Tier");
        assert_eq!(OccupantId::from(String::from("P0042")).as_ref(), "P0042");
    }

    #[test]
    fn test_label_ids_compare_by_value() {
        assert_eq!(OccupantId::new("P1"), OccupantId::from("P1"));
        assert_ne!(CoachId::new("S1"), CoachId::new("S2"));
    }
}
