/// Colors used by the game, independent of any terminal color type.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn hex(v: u32) -> Rgb {
        Rgb { r: (v >> 16) as u8, g: (v >> 8) as u8, b: v as u8 }
    }

    /// `self` painted over `under` with opacity `alpha` (clamped to [0, 1]).
    pub fn blend_over(self, under: Rgb, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |top: u8, bottom: u8| -> u8 {
            (top as f32 * a + bottom as f32 * (1.0 - a)).round() as u8
        };
        Rgb {
            r: mix(self.r, under.r),
            g: mix(self.g, under.g),
            b: mix(self.b, under.b),
        }
    }
}

pub const WHITE: Rgb = Rgb::hex(0xFFFFFF);
pub const BLACK: Rgb = Rgb::hex(0x000000);
pub const SNAKE_GREEN: Rgb = Rgb::hex(0x008000);

/// Background is resampled from this list each time food is eaten.
pub const BACKGROUNDS: [Rgb; 10] = [
    Rgb::hex(0xFFE4E1), // misty rose
    Rgb::hex(0xE6E6FA), // lavender
    Rgb::hex(0xF0FFF0), // honeydew
    Rgb::hex(0xF0FFFF), // azure
    Rgb::hex(0xFFF0F5), // lavender blush
    Rgb::hex(0xF5F5DC), // beige
    Rgb::hex(0xE0FFFF), // light cyan
    Rgb::hex(0xFFF5EE), // seashell
    Rgb::hex(0xF8F8FF), // ghost white
    Rgb::hex(0xFAFAD2), // light goldenrod
];

pub const EXPLOSION: [Rgb; 4] = [
    Rgb::hex(0xFFD700),
    Rgb::hex(0xFFA500),
    Rgb::hex(0xFF6347),
    Rgb::hex(0xFF69B4),
];

pub const CELEBRATION: [Rgb; 5] = [
    Rgb::hex(0xFFD700),
    Rgb::hex(0xFFA500),
    Rgb::hex(0xFF69B4),
    Rgb::hex(0x00FF00),
    Rgb::hex(0x4169E1),
];
