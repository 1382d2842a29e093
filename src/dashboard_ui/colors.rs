use crossterm::style::Color;

// Constants for dashboard appearance
pub fn title_bg() -> Color {
    Color::AnsiValue(21)
} // Bright blue
pub fn title_fg() -> Color {
    Color::AnsiValue(231)
} // Pure white
pub fn event_fg() -> Color {
    Color::AnsiValue(46)
} // Bright green
pub fn text_fg() -> Color {
    Color::AnsiValue(231)
} // Pure white
pub fn detail_fg() -> Color {
    Color::AnsiValue(250)
} // Light gray
pub fn won_fg() -> Color {
    Color::AnsiValue(46)
} // Bright green
pub fn tied_fg() -> Color {
    Color::AnsiValue(226)
} // Bright yellow
pub fn lost_fg() -> Color {
    Color::AnsiValue(196)
} // Bright red
pub fn link_fg() -> Color {
    Color::AnsiValue(51)
} // Bright cyan
pub fn error_fg() -> Color {
    Color::AnsiValue(196)
} // Bright red

/// Helper function to extract ANSI color code from crossterm Color enum.
/// Provides a fallback value for non-ANSI colors.
pub fn get_ansi_code(color: Color, fallback: u8) -> u8 {
    match color {
        Color::AnsiValue(val) => val,
        _ => fallback,
    }
}
