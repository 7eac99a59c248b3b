use once_cell::sync::Lazy;
use ratatui::style::Color;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Directive that restores the default foreground color.
pub const RESET_TAG: &str = "-";

const FALLBACK_COLOR: &str = "white";

/// Every named color the terminal renderer understands.
pub const NAMED_COLORS: [(&str, Color); 16] = [
    ("white", Color::White),
    ("black", Color::Black),
    ("red", Color::Red),
    ("green", Color::Green),
    ("yellow", Color::Yellow),
    ("blue", Color::Blue),
    ("magenta", Color::Magenta),
    ("cyan", Color::Cyan),
    ("gray", Color::Gray),
    ("darkgray", Color::DarkGray),
    ("lightred", Color::LightRed),
    ("lightgreen", Color::LightGreen),
    ("lightyellow", Color::LightYellow),
    ("lightblue", Color::LightBlue),
    ("lightmagenta", Color::LightMagenta),
    ("lightcyan", Color::LightCyan),
];

static SHARED_PALETTE: Lazy<ColorPalette> =
    Lazy::new(|| ColorPalette::from_colors(NAMED_COLORS.iter().copied()));

fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Color names sorted by name, so an index always means the same color
/// whatever order the names were supplied in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPalette {
    entries: Vec<(String, Color)>,
}

impl ColorPalette {
    pub fn from_colors<'a>(colors: impl IntoIterator<Item = (&'a str, Color)>) -> Self {
        let mut entries: Vec<(String, Color)> = colors
            .into_iter()
            .map(|(name, color)| (name.to_string(), color))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.dedup_by(|a, b| a.0 == b.0);
        Self { entries }
    }

    /// Palette built from [`NAMED_COLORS`] the first time it is needed.
    pub fn shared() -> &'static ColorPalette {
        &SHARED_PALETTE
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Color name for `s`: the three direction markers have fixed colors,
    /// anything else is `FNV-1a(s) mod len`.
    pub fn assign(&self, s: &str) -> &str {
        match s {
            "-->" => "green",
            "<--" => "red",
            "---" => "yellow",
            _ => {
                let hash = fnv1a_32(s.as_bytes()) as usize;
                hash.checked_rem(self.entries.len())
                    .and_then(|index| self.entries.get(index))
                    .map_or(FALLBACK_COLOR, |(name, _)| name.as_str())
            }
        }
    }

    pub fn color(&self, name: &str) -> Option<Color> {
        self.entries
            .binary_search_by(|(entry, _)| entry.as_str().cmp(name))
            .ok()
            .and_then(|index| self.entries.get(index))
            .map(|(_, color)| *color)
    }

    pub fn color_for(&self, s: &str) -> Color {
        self.color(self.assign(s)).unwrap_or(Color::Reset)
    }

    /// Wraps `s` in color directives understood by [`crate::markup`].
    pub fn decorate(&self, s: &str) -> String {
        format!("[{}]{s}[{RESET_TAG}]", self.assign(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_reference_values() {
        assert_eq!(fnv1a_32(b""), 0x811c_9dc5);
        assert_eq!(fnv1a_32(b"a"), 0xe40c_292c);
        assert_eq!(fnv1a_32(b"foobar"), 0xbf9c_f968);
    }

    #[test]
    fn markers_have_fixed_colors() {
        let palette = ColorPalette::shared();
        assert_eq!(palette.assign("-->"), "green");
        assert_eq!(palette.assign("<--"), "red");
        assert_eq!(palette.assign("---"), "yellow");
        assert_eq!(palette.color_for("<--"), Color::Red);
    }

    #[test]
    fn palette_is_sorted_by_name() {
        let palette = ColorPalette::shared();
        let names: Vec<&str> = palette.names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(palette.len(), NAMED_COLORS.len());
        assert_eq!(names.first(), Some(&"black"));
        assert_eq!(names.last(), Some(&"yellow"));
    }

    #[test]
    fn palette_ignores_input_order() {
        let forward = ColorPalette::from_colors(NAMED_COLORS.iter().copied());
        let backward = ColorPalette::from_colors(NAMED_COLORS.iter().rev().copied());
        assert_eq!(forward, backward);
    }

    #[test]
    fn hashed_assignment_is_stable() {
        let palette = ColorPalette::shared();
        let other = ColorPalette::from_colors(NAMED_COLORS.iter().rev().copied());
        assert_eq!(palette.assign("a"), "magenta");
        assert_eq!(palette.assign("#rust"), "black");
        assert_eq!(palette.assign("foobar"), "lightgreen");
        for name in ["farine", "guill", "@alice:example.org", "", "#rust"] {
            assert_eq!(palette.assign(name), palette.assign(name));
            assert_eq!(palette.assign(name), other.assign(name));
        }
    }

    #[test]
    fn empty_string_gets_a_palette_entry() {
        let palette = ColorPalette::shared();
        assert_eq!(palette.assign(""), "green");
        assert!(palette.color(palette.assign("")).is_some());
    }

    #[test]
    fn empty_palette_falls_back() {
        let palette = ColorPalette::from_colors(Vec::<(&str, Color)>::new());
        assert!(palette.is_empty());
        assert_eq!(palette.assign("anything"), FALLBACK_COLOR);
        assert_eq!(palette.color_for("anything"), Color::Reset);
    }

    #[test]
    fn decorate_resets_after_text() {
        let palette = ColorPalette::shared();
        assert_eq!(palette.decorate("-->"), "[green]-->[-]");
        assert_eq!(palette.decorate("a"), "[magenta]a[-]");
    }
}
