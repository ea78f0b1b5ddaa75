use eframe::egui::{
    self,
    style::Selection,
    Color32,
    RichText,
    Stroke,
    Visuals,
};

#[derive(Clone)]
pub struct Theme {
    dark: Palette,
    light: Palette,
}

#[derive(Clone)]
struct Palette {
    background: Color32,
    surface: Color32,
    surface_raised: Color32,
    foreground: Color32,
    selection: Color32,
    comment: Color32,
    red: Color32,
    orange: Color32,
    green: Color32,
    purple: Color32,
    cyan: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dracula()
    }
}

impl Theme {
    pub fn dracula() -> Self {
        Theme { dark: Palette::dracula(), light: Palette::dracula_light() }
    }

    pub fn heading(&self, content: &str) -> RichText {
        RichText::new(content).color(self.dark.purple)
    }

    pub fn bold(&self, content: &str) -> RichText {
        RichText::new(content).color(self.dark.orange)
    }

    pub fn subtle(&self, content: &str) -> RichText {
        RichText::new(content).color(self.dark.comment)
    }

    pub fn red(&self) -> Color32 {
        self.dark.red
    }

    pub fn orange(&self) -> Color32 {
        self.dark.orange
    }

    pub fn green(&self) -> Color32 {
        self.dark.green
    }

    pub fn cyan(&self) -> Color32 {
        self.dark.cyan
    }
}

impl Palette {
    fn dracula() -> Self {
        Self {
            background: Color32::from_rgb(0x28, 0x2a, 0x36),
            surface: Color32::from_rgb(33, 35, 53),
            surface_raised: Color32::from_rgb(52, 54, 66),
            foreground: Color32::from_rgb(0xf8, 0xf8, 0xf2),
            selection: Color32::from_rgb(0x44, 0x47, 0x5a),
            comment: Color32::from_rgb(0x62, 0x72, 0xa4),
            red: Color32::from_rgb(0xff, 0x55, 0x55),
            orange: Color32::from_rgb(0xff, 0xb8, 0x6c),
            green: Color32::from_rgb(0x50, 0xfa, 0x7b),
            purple: Color32::from_rgb(189, 147, 249),
            cyan: Color32::from_rgb(139, 233, 253),
        }
    }

    fn dracula_light() -> Self {
        Self {
            background: Color32::from_rgb(248, 248, 242),
            surface: Color32::from_rgb(245, 245, 240),
            surface_raised: Color32::from_rgb(255, 255, 250),
            foreground: Color32::from_rgb(40, 42, 54),
            selection: Color32::from_rgb(200, 200, 220),
            comment: Color32::from_rgb(120, 130, 160),
            red: Color32::from_rgb(200, 80, 80),
            orange: Color32::from_rgb(220, 150, 90),
            green: Color32::from_rgb(80, 200, 120),
            purple: Color32::from_rgb(150, 120, 220),
            cyan: Color32::from_rgb(80, 190, 230),
        }
    }
}

pub fn set_theme(ctx: &egui::Context, theme: Theme) {
    apply_variant(ctx, &theme.dark, true);
    apply_variant(ctx, &theme.light, false);
}

fn apply_variant(ctx: &egui::Context, palette: &Palette, is_dark: bool) {
    let (default, variant) = match is_dark {
        true => (Visuals::dark(), egui::Theme::Dark),
        false => (Visuals::light(), egui::Theme::Light),
    };

    let mut visuals = default.clone();
    visuals.dark_mode = is_dark;

    visuals.window_fill = palette.background;
    visuals.panel_fill = palette.surface;
    visuals.faint_bg_color = palette.surface_raised;
    visuals.hyperlink_color = palette.cyan;
    visuals.error_fg_color = palette.red;
    visuals.warn_fg_color = palette.orange;

    visuals.selection = Selection {
        bg_fill: palette.selection,
        stroke: Stroke { color: palette.foreground, ..default.selection.stroke },
    };

    visuals.widgets.noninteractive.fg_stroke.color = palette.foreground;
    visuals.widgets.inactive.bg_fill = palette.surface_raised;
    visuals.widgets.inactive.weak_bg_fill = palette.surface_raised;
    visuals.widgets.inactive.fg_stroke.color = palette.foreground;
    visuals.widgets.hovered.bg_fill = palette.selection;
    visuals.widgets.hovered.bg_stroke.color = palette.cyan;
    visuals.widgets.active.bg_fill = palette.selection;
    visuals.widgets.active.bg_stroke.color = palette.cyan;
    visuals.widgets.open.bg_fill = palette.surface;

    ctx.set_visuals_of(variant, visuals);

    ctx.all_styles_mut(|style| {
        style.interaction.tooltip_delay = 0.0;
    });
}
