/// Straight (non-premultiplied) RGBA
pub type Rgba = [u8; 4];

/// Particle colours, one shade per visual group.
/// The background stays transparent so the page shows through.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: Rgba,
    pub groups: [Rgba; 4],
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: [0, 0, 0, 0],
        groups: [
            [24, 24, 27, 230],
            [63, 63, 70, 210],
            [82, 82, 91, 190],
            [113, 113, 122, 170],
        ],
    };

    pub const DARK: Palette = Palette {
        background: [0, 0, 0, 0],
        groups: [
            [250, 250, 250, 230],
            [228, 228, 231, 210],
            [212, 212, 216, 190],
            [161, 161, 170, 170],
        ],
    };

    /// Fill used when the engine ignores the page theme
    pub const CLASSIC: Palette = Palette {
        background: [0, 0, 0, 0],
        groups: [
            [99, 102, 241, 230],
            [129, 140, 248, 210],
            [165, 180, 252, 190],
            [199, 210, 254, 170],
        ],
    };

    pub fn resolve(theme_aware: bool, is_dark: bool) -> &'static Palette {
        match (theme_aware, is_dark) {
            (false, _) => &Palette::CLASSIC,
            (true, true) => &Palette::DARK,
            (true, false) => &Palette::LIGHT,
        }
    }

    #[inline]
    pub fn group(&self, visual_state: u8) -> Rgba {
        self.groups[(visual_state & 3) as usize]
    }
}
