use crate::settings::{Color, ColorField, Settings};
use crate::shuffle::shuffle;
use rand::Rng;

/// Accent roles filled, in order, from the shuffled tail of a palette.
const ACCENT_ROLES: [ColorField; 4] = [
    ColorField::Selected,
    ColorField::Highlight,
    ColorField::Comment,
    ColorField::AccentText,
];

/// Distribute `palette` over the color fields of `settings`.
///
/// Returns `false` and leaves `settings` untouched when the palette is absent
/// or empty.
pub fn apply_palette(settings: &mut Settings, palette: Option<&[Color]>) -> bool {
    apply_palette_with_rng(settings, palette, &mut rand::thread_rng())
}

/// [`apply_palette`] with an explicit random source.
///
/// Position 0 becomes the background and position 1 the foreground. The rest
/// is shuffled; its first four entries become selected, highlight, comment and
/// accent text, and the whole shuffled tail replaces the accent list. Roles
/// without a matching entry keep their previous color.
pub fn apply_palette_with_rng<R: Rng + ?Sized>(
    settings: &mut Settings,
    palette: Option<&[Color]>,
    rng: &mut R,
) -> bool {
    let Some(palette) = palette.filter(|p| !p.is_empty()) else {
        return false;
    };

    settings.background = palette[0].clone();
    if let Some(foreground) = palette.get(1) {
        settings.foreground = foreground.clone();
    }

    let mut accents: Vec<Color> = palette.iter().skip(2).cloned().collect();
    shuffle(&mut accents, rng);

    for (role, color) in ACCENT_ROLES.iter().zip(accents.iter()) {
        settings.set_color(*role, color.clone());
    }
    settings.accent_colors = accents;

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn palette(colors: &[&str]) -> Vec<Color> {
        colors.iter().map(|c| Color::from(*c)).collect()
    }

    fn sorted(mut colors: Vec<Color>) -> Vec<Color> {
        colors.sort();
        colors
    }

    #[test]
    fn test_full_palette_assignment() {
        let mut settings = Settings::default();
        let colors = palette(&["#bg", "#fg", "#a", "#b", "#c", "#d"]);

        assert!(apply_palette(&mut settings, Some(colors.as_slice())));

        assert_eq!(settings.background.as_str(), "#bg");
        assert_eq!(settings.foreground.as_str(), "#fg");
        assert_eq!(
            sorted(settings.accent_colors.clone()),
            palette(&["#a", "#b", "#c", "#d"])
        );
        assert_eq!(settings.selected, settings.accent_colors[0]);
        assert_eq!(settings.highlight, settings.accent_colors[1]);
        assert_eq!(settings.comment, settings.accent_colors[2]);
        assert_eq!(settings.accent_text, settings.accent_colors[3]);
    }

    #[test]
    fn test_long_palette_keeps_every_accent() {
        let mut settings = Settings::default();
        let colors = palette(&["#0", "#1", "#2", "#3", "#4", "#5", "#6", "#7"]);
        let mut rng = StdRng::seed_from_u64(3);

        apply_palette_with_rng(&mut settings, Some(colors.as_slice()), &mut rng);

        assert_eq!(settings.accent_colors.len(), 6);
        assert_eq!(sorted(settings.accent_colors.clone()), colors[2..].to_vec());
    }

    #[test]
    fn test_short_palette_keeps_unfilled_roles() {
        let mut settings = Settings::default();
        let before = settings.clone();
        let colors = palette(&["#000", "#fff", "#111", "#222"]);

        apply_palette(&mut settings, Some(colors.as_slice()));

        assert_eq!(settings.background.as_str(), "#000");
        assert_eq!(settings.foreground.as_str(), "#fff");
        assert_eq!(
            sorted(settings.accent_colors.clone()),
            palette(&["#111", "#222"])
        );
        assert_eq!(settings.selected, settings.accent_colors[0]);
        assert_eq!(settings.highlight, settings.accent_colors[1]);
        assert_eq!(settings.comment, before.comment);
        assert_eq!(settings.accent_text, before.accent_text);
        assert_eq!(settings.last_modified, before.last_modified);
    }

    #[test]
    fn test_background_only_palette() {
        let mut settings = Settings::default();
        let before = settings.clone();

        apply_palette(&mut settings, Some(palette(&["#abc"]).as_slice()));

        assert_eq!(settings.background.as_str(), "#abc");
        assert_eq!(settings.foreground, before.foreground);
        assert!(settings.accent_colors.is_empty());
    }

    #[test]
    fn test_empty_or_missing_palette_is_noop() {
        let mut settings = Settings::default();
        let before = settings.clone();

        assert!(!apply_palette(&mut settings, None));
        assert!(!apply_palette(&mut settings, Some(&[][..])));
        assert_eq!(settings, before);
    }

    #[test]
    fn test_roles_vary_across_applications() {
        let colors = palette(&["#bg", "#fg", "#a", "#b", "#c", "#d"]);
        let mut rng = StdRng::seed_from_u64(11);
        let mut selected = std::collections::HashSet::new();

        for _ in 0..200 {
            let mut settings = Settings::default();
            apply_palette_with_rng(&mut settings, Some(colors.as_slice()), &mut rng);
            selected.insert(settings.selected);
        }

        assert_eq!(selected.len(), 4);
    }
}
