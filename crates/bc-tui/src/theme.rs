use bc_pager::{Outcome, Variant};
use ratatui::{prelude::*, style::palette::tailwind};

/// Application theme - centralized color and style management
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_panel: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    pub accent_primary: Color,

    // Status colors
    pub status_success: Color,
    pub status_error: Color,
    pub status_warning: Color,
    pub status_info: Color,

    // Table colors
    pub table_header_bg: Color,
    pub table_header_fg: Color,
    pub table_row_fg: Color,
    pub table_row_bg_normal: Color,
    pub table_row_bg_alt: Color,
    pub highlight_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default) - slate background with amber accents
    pub fn dark() -> Self {
        Self {
            bg_primary: tailwind::SLATE.c950,
            bg_secondary: tailwind::SLATE.c900,
            bg_panel: tailwind::SLATE.c800,

            text_primary: tailwind::SLATE.c50,
            text_secondary: tailwind::SLATE.c300,
            text_muted: tailwind::SLATE.c500,

            accent_primary: tailwind::AMBER.c400,

            status_success: tailwind::EMERALD.c400,
            status_error: tailwind::ROSE.c400,
            status_warning: tailwind::AMBER.c300,
            status_info: tailwind::SKY.c400,

            table_header_bg: tailwind::SLATE.c700,
            table_header_fg: tailwind::AMBER.c200,
            table_row_fg: tailwind::SLATE.c100,
            table_row_bg_normal: tailwind::SLATE.c950,
            table_row_bg_alt: tailwind::SLATE.c900,
            highlight_fg: tailwind::AMBER.c300,
        }
    }

    /// Colour for a status label
    pub fn variant(&self, variant: Variant) -> Style {
        let fg = match variant {
            Variant::Success => self.status_success,
            Variant::Failure => self.status_error,
            Variant::Pending => self.status_warning,
            Variant::Unknown => self.text_muted,
        };
        Style::default().fg(fg)
    }

    pub fn outcome(&self, outcome: Option<Outcome>) -> Style {
        match outcome {
            Some(Outcome::Won) => self.success(),
            Some(Outcome::Lost) => self.error(),
            None => self.muted(),
        }
    }

    pub fn panel_border(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn section_header(&self) -> Style {
        Style::default()
            .fg(self.status_warning)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Style for key hints (e.g., "n" in "n next page")
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_description(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn table_header(&self) -> Style {
        Style::default()
            .fg(self.table_header_fg)
            .bg(self.table_header_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Row style, alternating background by index
    pub fn table_row(&self, index: usize) -> Style {
        let bg = if index % 2 == 0 {
            self.table_row_bg_normal
        } else {
            self.table_row_bg_alt
        };
        Style::default().fg(self.table_row_fg).bg(bg)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.status_error)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default()
            .fg(self.status_success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning(&self) -> Style {
        Style::default()
            .fg(self.status_warning)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }
}
