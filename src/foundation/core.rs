pub use kurbo::Point;

/// Opaque 8-bit sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB` (case-insensitive, leading `#` optional).
    pub fn parse_hex(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> Result<u8, String> {
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
        }

        if !s.is_ascii() {
            return Err("hex color must be ASCII".to_owned());
        }

        match s.len() {
            3 => {
                let mut out = [0u8; 3];
                for (i, c) in s.chars().enumerate() {
                    let doubled: String = [c, c].iter().collect();
                    out[i] = hex_byte(&doubled)?;
                }
                Ok(Self::new(out[0], out[1], out[2]))
            }
            6 => Ok(Self::new(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            _ => Err("hex color must be #RGB or #RRGGBB (case-insensitive)".to_owned()),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Rec. 601 luma in `0..=1`.
    pub fn luma(self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)) / 255.0
    }

    /// HSV saturation in `0..=1`.
    pub fn saturation(self) -> f64 {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        if max == 0 {
            return 0.0;
        }
        f64::from(max - min) / f64::from(max)
    }

    /// Drop the low bits of each channel so near-identical colors share a bucket.
    pub fn quantized(self, bits: u8) -> Self {
        let bits = bits.clamp(1, 8);
        let mask = !((1u16 << (8 - bits)) - 1) as u8;
        Self::new(self.r & mask, self.g & mask, self.b & mask)
    }

    /// Multiply each channel by `alpha` (compositing over black).
    pub fn scaled(self, alpha: f64) -> Self {
        let a = alpha.clamp(0.0, 1.0);
        let ch = |c: u8| (f64::from(c) * a).round().clamp(0.0, 255.0) as u8;
        Self::new(ch(self.r), ch(self.g), ch(self.b))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
