//! RGB samples and the rule-based color classifier.
//!
//! The classifier is a fixed cascade of threshold rules tuned for the
//! TCS3200 readings after calibration. Order matters: achromatic shades
//! are checked first, then yellow and orange before red (all three have
//! a dominant red channel).

/// One sensor reading, each channel in `0..=255`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RgbSample {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RgbSample {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Human-facing color names, as shown on the display and sent over BLE.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorName {
    Black,
    DarkGray,
    Gray,
    LightGray,
    White,
    Yellow,
    Orange,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Blue,
    DarkBlue,
    Brown,
    Cyan,
    Magenta,
    Purple,
    Pink,
    Unknown,
}

impl ColorName {
    pub const fn as_str(self) -> &'static str {
        match self {
            ColorName::Black => "BLACK",
            ColorName::DarkGray => "DARK GRAY",
            ColorName::Gray => "GRAY",
            ColorName::LightGray => "LIGHT GRAY",
            ColorName::White => "WHITE",
            ColorName::Yellow => "YELLOW",
            ColorName::Orange => "ORANGE",
            ColorName::Red => "RED",
            ColorName::DarkRed => "DARK RED",
            ColorName::Green => "GREEN",
            ColorName::DarkGreen => "DARK GREEN",
            ColorName::Blue => "BLUE",
            ColorName::DarkBlue => "DARK BLUE",
            ColorName::Brown => "BROWN",
            ColorName::Cyan => "CYAN",
            ColorName::Magenta => "MAGENTA",
            ColorName::Purple => "PURPLE",
            ColorName::Pink => "PINK",
            ColorName::Unknown => "UNKNOWN",
        }
    }
}

/// True when every pair of channels differs by less than `spread`.
fn is_neutral(r: i32, g: i32, b: i32, spread: i32) -> bool {
    (r - g).abs() < spread && (g - b).abs() < spread && (r - b).abs() < spread
}

/// Classify a (usually averaged) sample into a named color.
pub fn classify(sample: RgbSample) -> ColorName {
    let r = i32::from(sample.red);
    let g = i32::from(sample.green);
    let b = i32::from(sample.blue);
    let brightness = (r + g + b) / 3;

    if r < 30 && g < 30 && b < 30 {
        return ColorName::Black;
    }
    if brightness < 50 && is_neutral(r, g, b, 20) {
        return ColorName::DarkGray;
    }
    if brightness < 120 && is_neutral(r, g, b, 25) {
        return ColorName::Gray;
    }
    if brightness < 200 && is_neutral(r, g, b, 30) {
        return ColorName::LightGray;
    }
    if r > 200 && g > 200 && b > 200 {
        return ColorName::White;
    }
    if r > 120 && g > 120 && b < 80 && (r - g).abs() < 50 {
        return ColorName::Yellow;
    }
    if r > 150 && g > 60 && g < 140 && b < 70 {
        return ColorName::Orange;
    }

    let dark = brightness < 80;
    if r > g + 25 && r > b + 25 {
        return if dark {
            ColorName::DarkRed
        } else {
            ColorName::Red
        };
    }
    if g > r + 40 && g > b + 40 {
        return if dark {
            ColorName::DarkGreen
        } else {
            ColorName::Green
        };
    }
    if b > r + 40 && b > g + 40 {
        return if dark {
            ColorName::DarkBlue
        } else {
            ColorName::Blue
        };
    }

    if r > 80 && r < 180 && g > 40 && g < 120 && b < 80 {
        return ColorName::Brown;
    }
    if g > 150 && b > 150 && r < 100 {
        return ColorName::Cyan;
    }
    if r > 120 && b > 120 && g < 100 {
        return if r > b + 30 {
            ColorName::Magenta
        } else {
            ColorName::Purple
        };
    }
    if r > 180 && g > 100 && g < 180 && b > 120 && b < 200 {
        return ColorName::Pink;
    }

    ColorName::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(r: u8, g: u8, b: u8) -> ColorName {
        classify(RgbSample::new(r, g, b))
    }

    #[test]
    fn achromatic_shades_by_brightness() {
        assert_eq!(name(0, 0, 0), ColorName::Black);
        assert_eq!(name(40, 45, 50), ColorName::DarkGray);
        assert_eq!(name(20, 30, 40), ColorName::Gray);
        assert_eq!(name(150, 160, 170), ColorName::LightGray);
        assert_eq!(name(230, 240, 250), ColorName::White);
    }

    #[test]
    fn yellow_and_orange_win_over_red() {
        assert_eq!(name(220, 200, 40), ColorName::Yellow);
        assert_eq!(name(230, 100, 30), ColorName::Orange);
        assert_eq!(name(230, 40, 40), ColorName::Red);
    }

    #[test]
    fn dominant_channel_with_dark_variants() {
        assert_eq!(name(120, 20, 20), ColorName::DarkRed);
        assert_eq!(name(20, 120, 20), ColorName::DarkGreen);
        assert_eq!(name(40, 200, 60), ColorName::Green);
        assert_eq!(name(20, 20, 120), ColorName::DarkBlue);
        assert_eq!(name(40, 60, 200), ColorName::Blue);
    }

    #[test]
    fn mixed_hues() {
        assert_eq!(name(60, 180, 190), ColorName::Cyan);
        assert_eq!(name(160, 60, 170), ColorName::Purple);
        assert_eq!(name(100, 90, 70), ColorName::Brown);
        // Strong red over blue is claimed by the red rule first.
        assert_eq!(name(200, 60, 160), ColorName::Red);
    }

    #[test]
    fn names_match_wire_text() {
        assert_eq!(ColorName::DarkGray.as_str(), "DARK GRAY");
        assert_eq!(ColorName::LightGray.as_str(), "LIGHT GRAY");
        assert_eq!(ColorName::Unknown.as_str(), "UNKNOWN");
    }
}
