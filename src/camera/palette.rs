use crate::error::{Error, Result};

pub const STANDARD: &str = " `.',:^\"-~=*+o]#8CUOD%0&$@";
pub const SHORT: &str = " `.=*#%0$@";
pub const LONG: &str = " `.-':_,^=;><+!rc*/z?sLTv)J7(|Fi{C}fI31tlu[neoZ5Yxjya]2ESwqkP6h9d4VpOGbUAKXHm8RD#$Bg0MNWQ%&@";

/// Ordered characters from darkest to brightest. The length sets how many
/// brightness levels can be told apart.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    chars: Vec<u8>,
}

impl Palette {
    pub fn new(chars: &str) -> Result<Palette> {
        if !chars.is_ascii() {
            return Err(Error::InvalidPalette(format!(
                "palette must be ASCII, got {:?}",
                chars
            )));
        }
        if chars.len() < 2 {
            return Err(Error::InvalidPalette(format!(
                "palette needs at least 2 characters, got {}",
                chars.len()
            )));
        }
        Ok(Palette {
            chars: chars.as_bytes().to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false: `new` requires at least two characters. Kept as the
    /// companion of `len`.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Palette slot for a brightness. Input is clamped to `[0, 1]` first, so
    /// out-of-range values land on the end slots.
    pub fn index(&self, brightness: f64) -> usize {
        let last = self.chars.len() - 1;
        let b = if brightness.is_nan() {
            0.
        } else {
            brightness.clamp(0., 1.)
        };
        ((b * last as f64).ceil() as usize).min(last)
    }

    pub fn char_for(&self, brightness: f64) -> u8 {
        self.chars[self.index(brightness)]
    }

    /// Slot of a character previously produced by this palette.
    pub fn level(&self, c: u8) -> Option<usize> {
        self.chars.iter().position(|&p| p == c)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            chars: STANDARD.as_bytes().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for preset in [STANDARD, SHORT, LONG] {
            let p = Palette::new(preset).unwrap();
            assert_eq!(p.len(), preset.len());
            assert!(!p.is_empty());
        }
        assert_eq!(Palette::default(), Palette::new(STANDARD).unwrap());
    }

    #[test]
    fn test_rejects_bad_palettes() {
        assert!(matches!(Palette::new("#"), Err(Error::InvalidPalette(_))));
        assert!(matches!(Palette::new(""), Err(Error::InvalidPalette(_))));
        assert!(matches!(
            Palette::new(" ░▒▓█"),
            Err(Error::InvalidPalette(_))
        ));
    }

    #[test]
    fn test_end_points() {
        let p = Palette::new(SHORT).unwrap();
        assert_eq!(p.char_for(0.), b' ');
        assert_eq!(p.char_for(1.), b'@');
        assert_eq!(p.char_for(0.05), b'`');
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let p = Palette::new(SHORT).unwrap();
        assert_eq!(p.index(-3.), 0);
        assert_eq!(p.index(1.2), p.len() - 1);
        assert_eq!(p.index(f64::INFINITY), p.len() - 1);
        assert_eq!(p.index(f64::NAN), 0);
    }

    #[test]
    fn test_mapping_is_monotonic() {
        let p = Palette::default();
        let mut prev = 0;
        for i in -50..=150 {
            let idx = p.index(i as f64 / 100.);
            assert!(idx >= prev);
            assert!(idx < p.len());
            prev = idx;
        }
        assert_eq!(prev, p.len() - 1);
    }

    #[test]
    fn test_level_round_trips_chars() {
        let p = Palette::new(SHORT).unwrap();
        assert_eq!(p.level(b'#'), Some(5));
        assert_eq!(p.level(b'|'), None);
    }
}
