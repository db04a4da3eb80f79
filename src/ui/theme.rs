//! Colour rules. Every function here is a pure mapping from ledger values.

use ratatui::style::{Color, Modifier, Style};

use crate::model::{AuditChain, AuditEventType, BetResult, ConfidenceTier};

pub const ACCENT: Color = Color::Cyan;
pub const MUTED: Color = Color::DarkGray;
pub const GAIN: Color = Color::Green;
pub const LOSS: Color = Color::Red;

pub fn title_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn header_cell_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

pub fn border_style() -> Style {
    Style::default().fg(MUTED)
}

/// `win→green, loss→red, push→yellow`; pending and unknown stay gray.
pub fn result_color(result: &BetResult) -> Color {
    match result {
        BetResult::Win => Color::Green,
        BetResult::Loss => Color::Red,
        BetResult::Push => Color::Yellow,
        BetResult::Pending | BetResult::Unknown(_) => Color::Gray,
    }
}

/// Green above zero, red below, gray at zero.
pub fn pnl_color(value: f64) -> Color {
    if value > 0.0 {
        GAIN
    } else if value < 0.0 {
        LOSS
    } else {
        Color::Gray
    }
}

/// `≥4` strong accent, `≥2` medium accent, otherwise neutral.
pub fn match_color(matches: u32) -> Color {
    if matches >= 4 {
        Color::Green
    } else if matches >= 2 {
        Color::Yellow
    } else {
        Color::Gray
    }
}

pub fn tier_color(tier: &ConfidenceTier) -> Color {
    match tier {
        ConfidenceTier::Alto => Color::Green,
        ConfidenceTier::Medio => Color::Yellow,
        ConfidenceTier::Baixo | ConfidenceTier::Other(_) => Color::Gray,
    }
}

pub fn event_color(kind: &AuditEventType) -> Color {
    match kind {
        AuditEventType::Prediction => Color::Blue,
        AuditEventType::Resolution | AuditEventType::Other(_) => Color::Magenta,
    }
}

pub fn chain_color(chain: &AuditChain) -> Color {
    if chain.valid {
        GAIN
    } else {
        LOSS
    }
}

/// Number ball: accent background when the number was drawn.
pub fn ball_style(hit: bool) -> Style {
    if hit {
        Style::default()
            .fg(Color::White)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray).bg(Color::Black)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_colours() {
        assert_eq!(result_color(&BetResult::Win), Color::Green);
        assert_eq!(result_color(&BetResult::Loss), Color::Red);
        assert_eq!(result_color(&BetResult::Push), Color::Yellow);
        assert_eq!(result_color(&BetResult::Pending), Color::Gray);
        assert_eq!(result_color(&BetResult::Unknown("void".into())), Color::Gray);
    }

    #[test]
    fn match_thresholds() {
        assert_eq!(match_color(0), Color::Gray);
        assert_eq!(match_color(1), Color::Gray);
        assert_eq!(match_color(2), Color::Yellow);
        assert_eq!(match_color(3), Color::Yellow);
        assert_eq!(match_color(4), Color::Green);
        assert_eq!(match_color(15), Color::Green);
    }

    #[test]
    fn tier_badges() {
        assert_eq!(tier_color(&ConfidenceTier::Alto), Color::Green);
        assert_eq!(tier_color(&ConfidenceTier::Medio), Color::Yellow);
        assert_eq!(tier_color(&ConfidenceTier::Baixo), Color::Gray);
        assert_eq!(tier_color(&ConfidenceTier::Other("max".into())), Color::Gray);
    }

    #[test]
    fn pnl_sign_colours() {
        assert_eq!(pnl_color(12.0), GAIN);
        assert_eq!(pnl_color(-0.5), LOSS);
        assert_eq!(pnl_color(0.0), Color::Gray);
    }
}
