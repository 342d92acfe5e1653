/// A color in HSV space. `hue` is in degrees `[0, 360)`, the rest in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

/// Converts 8-bit RGB to HSV.
///
/// Gray pixels (all channels equal) map to the all-zero color: hue 0,
/// saturation 0 and value 0. When two channels tie for the maximum, red wins
/// over green and green over blue.
pub fn rgb_to_hsv(red: u8, green: u8, blue: u8) -> Hsv {
    let r = f64::from(red) / 255.0;
    let g = f64::from(green) / 255.0;
    let b = f64::from(blue) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    if max == min {
        return Hsv {
            hue: 0.0,
            saturation: 0.0,
            value: 0.0,
        };
    }

    let delta = max - min;
    let mut hue = if max == r {
        60.0 * ((g - b) / delta)
    } else if max == g {
        60.0 * (2.0 + (b - r) / delta)
    } else {
        60.0 * (4.0 + (r - g) / delta)
    };
    if hue < 0.0 {
        hue += 360.0;
    }

    let saturation = if max == 0.0 { 0.0 } else { delta / max };

    Hsv {
        hue,
        saturation,
        value: max,
    }
}

/// Hue of an 8-bit RGB triple in degrees `[0, 360)`.
#[inline]
pub fn rgb_to_hue(red: u8, green: u8, blue: u8) -> f64 {
    rgb_to_hsv(red, green, blue).hue
}
