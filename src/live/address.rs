// Memory address expressions and bit-field descriptors.
//
// Textual forms:
//   "0x2024284"     absolute, hex
//   "1234"          absolute, decimal
//   "*0x3004360+4"  pointer: dereference hex base, then add decimal offset

/// A parsed memory address expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Address {
    Absolute(i64),
    Pointer { base: i64, offset: i64 },
}

impl Address {
    /// Total, panic-free parse. Malformed syntax yields `None`; the item
    /// depending on it is simply dropped from live decoding.
    pub fn parse(text: &str) -> Option<Self> {
        if let Some(rest) = text.strip_prefix('*') {
            let mut parts = rest.splitn(2, '+');
            let base = hex_to_int(parts.next()?)?;
            let offset = parts.next()?.parse::<i64>().ok()?;
            Some(Address::Pointer { base, offset })
        } else {
            let value = if let Some(hex) = text.strip_prefix("0x") {
                i64::from_str_radix(hex, 16).ok()?
            } else if text.chars().all(|c| c.is_ascii_digit()) && !text.is_empty() {
                text.parse::<i64>().ok()?
            } else {
                hex_to_int(text)?
            };
            Some(Address::Absolute(value))
        }
    }

    /// Canonical, process-stable key for this `(address, bit-field)` pair,
    /// used as the opaque handle into the external memory store.
    pub fn store_key(&self, bits: &BitInfo) -> String {
        match self {
            Address::Absolute(value) => {
                format!("{}:{}>>{}", value, bits.width, bits.offset)
            }
            Address::Pointer { base, offset } => {
                format!("{}+{}:{}>>{}", base, offset, bits.width, bits.offset)
            }
        }
    }
}

fn hex_to_int(text: &str) -> Option<i64> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    if digits.is_empty() {
        return None;
    }
    i64::from_str_radix(digits, 16).ok()
}

/// A bit-field's width and offset within the value read from its address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitInfo {
    pub width: u32,
    pub offset: u32,
}

impl BitInfo {
    pub fn new(width: u32) -> Self {
        Self { width, offset: 0 }
    }

    pub fn with_offset(width: u32, offset: u32) -> Self {
        Self { width, offset }
    }

    /// Mask covering `width` bits
    pub fn mask(&self) -> i64 {
        if self.width >= 63 {
            -1
        } else {
            (1i64 << self.width) - 1
        }
    }
}
