//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

// MPLS label.
//
// Only the low 20 bits of the label stack entry carry the label value.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Label(u32);

// Error returned when a value doesn't fit in the 20-bit label field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LabelOutOfRange(pub u32);

impl Label {
    pub const VALUE_MASK: u32 = 0x000FFFFF;
    pub const MAX: u32 = Self::VALUE_MASK;

    // Creates a label from a value known to be valid.
    //
    // Panics if any bit outside the 20-bit label field is set.
    pub fn new(label: u32) -> Label {
        match Label::try_new(label) {
            Ok(label) => label,
            Err(_) => panic!("invalid label value: {}", label),
        }
    }

    pub fn try_new(label: u32) -> Result<Label, LabelOutOfRange> {
        if label & !Self::VALUE_MASK != 0 {
            return Err(LabelOutOfRange(label));
        }
        Ok(Label(label))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

// ===== impl Label =====

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ===== impl LabelOutOfRange =====

impl std::fmt::Display for LabelOutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "label value {} exceeds the 20-bit maximum ({})",
            self.0,
            Label::MAX
        )
    }
}

impl std::error::Error for LabelOutOfRange {}

// ===== unit tests =====
