use egui::{Color32, Visuals};

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

#[derive(Clone, Copy)]
pub(crate) struct BoardPalette {
    pub cell_bg: Color32,
    pub weekend_bg: Color32,
    pub today_bg: Color32,
    pub selection_bg: Color32,
    pub border: Color32,
    pub text: Color32,
    pub muted_text: Color32,
    pub strip_bg: Color32,
    pub strip_text: Color32,
    pub drop_target: Color32,
    pub ghost_bg: Color32,
}

impl BoardPalette {
    pub fn from_visuals(visuals: &Visuals) -> Self {
        let base = visuals.extreme_bg_color;
        let accent = visuals.selection.bg_fill;
        let strip_bg = Color32::from_rgb(66, 133, 244);
        Self {
            cell_bg: base,
            weekend_bg: blend(base, visuals.faint_bg_color, 0.6),
            today_bg: blend(base, accent, 0.25),
            selection_bg: with_alpha(accent, 110),
            border: visuals.widgets.noninteractive.bg_stroke.color,
            text: visuals.text_color(),
            muted_text: visuals.weak_text_color(),
            strip_bg,
            strip_text: Color32::WHITE,
            drop_target: accent,
            ghost_bg: with_alpha(strip_bg, 150),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        let a = Color32::from_rgb(0, 0, 0);
        let b = Color32::from_rgb(200, 100, 50);
        assert_eq!(blend(a, b, 0.0), a);
        assert_eq!(blend(a, b, 1.0), b);
        assert_eq!(blend(a, b, 0.5), Color32::from_rgb(100, 50, 25));
    }
}
