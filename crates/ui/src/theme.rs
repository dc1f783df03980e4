use egui::style::{WidgetVisuals, Widgets};
use egui::{Color32, CornerRadius, FontFamily, FontId, Stroke, TextStyle, Visuals};

pub const BG_DARK: Color32 = Color32::from_rgb(18, 22, 28);
pub const BG_PANEL: Color32 = Color32::from_rgb(24, 29, 37);
pub const BG_SURFACE: Color32 = Color32::from_rgb(38, 46, 58);
pub const ACCENT: Color32 = Color32::from_rgb(64, 196, 180);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(222, 226, 232);
pub const TEXT_DIM: Color32 = Color32::from_rgb(128, 138, 152);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(240, 110, 100);
pub const BORDER: Color32 = Color32::from_rgb(44, 52, 64);
pub const GROUP_BG: Color32 = Color32::from_rgb(28, 34, 43);
pub const GROUP_HEADER_BG: Color32 = Color32::from_rgb(33, 40, 51);
pub const RULER_BG: Color32 = Color32::from_rgb(15, 18, 23);
pub const RULER_TICK: Color32 = Color32::from_rgb(74, 84, 98);
pub const TC_RANGE: Color32 = Color32::from_rgb(214, 150, 62);
pub const VIDEO_RANGE: Color32 = Color32::from_rgb(74, 128, 206);
pub const HOVER_LINE: Color32 = Color32::from_rgb(180, 190, 204);
pub const NAV_MARKER: Color32 = Color32::from_rgb(236, 84, 96);
pub const DROP_OVERLAY: Color32 = Color32::from_rgba_premultiplied(8, 12, 16, 196);

pub const ROUNDING: CornerRadius = CornerRadius::same(4);
pub const ROUNDING_SM: CornerRadius = CornerRadius::same(3);

fn widget(bg: Color32, fg: Color32, border: Color32) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill: bg,
        weak_bg_fill: bg,
        bg_stroke: Stroke::new(1.0, border),
        corner_radius: ROUNDING_SM,
        fg_stroke: Stroke::new(1.0, fg),
        expansion: 0.0,
    }
}

fn widgets() -> Widgets {
    Widgets {
        noninteractive: widget(BG_PANEL, TEXT_PRIMARY, BORDER),
        inactive: widget(BG_SURFACE, TEXT_PRIMARY, BORDER),
        hovered: widget(Color32::from_rgb(50, 62, 78), Color32::WHITE, ACCENT.gamma_multiply(0.6)),
        active: widget(ACCENT.gamma_multiply(0.8), Color32::WHITE, ACCENT),
        open: widget(BG_SURFACE, TEXT_PRIMARY, ACCENT),
    }
}

/// Dark slate palette with timecode-friendly monospace sizing.
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals = Visuals {
        panel_fill: BG_PANEL,
        window_fill: BG_DARK,
        extreme_bg_color: BG_DARK,
        faint_bg_color: GROUP_BG,
        error_fg_color: ERROR_TEXT,
        hyperlink_color: ACCENT,
        window_stroke: Stroke::new(1.0, BORDER),
        widgets: widgets(),
        ..Visuals::dark()
    };
    style.visuals.selection.bg_fill = ACCENT.gamma_multiply(0.35);
    style.visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    style
        .text_styles
        .insert(TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace));
    style.spacing.item_spacing = egui::vec2(8.0, 5.0);
    style.spacing.button_padding = egui::vec2(8.0, 3.0);

    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_installs_palette() {
        let ctx = egui::Context::default();
        apply_theme(&ctx);
        let style = ctx.style();
        assert_eq!(style.visuals.panel_fill, BG_PANEL);
        assert_eq!(style.visuals.error_fg_color, ERROR_TEXT);
        assert_eq!(style.visuals.widgets.active.bg_stroke.color, ACCENT);
    }
}
