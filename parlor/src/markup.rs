use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::color::{ColorPalette, RESET_TAG};

/// Turns `[name]text[-]` directives into styled spans. Brackets that do not
/// hold a palette name or the reset tag are kept as plain text.
pub fn tagged_line(palette: &ColorPalette, text: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut style = Style::default();
    let mut pending = String::new();
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        let (before, from_open) = rest.split_at(open);
        pending.push_str(before);

        let Some(close) = from_open.find(']') else {
            rest = from_open;
            break;
        };
        let tag = from_open.get(1..close).unwrap_or_default();
        let next_style = if tag == RESET_TAG {
            Some(Style::default())
        } else {
            palette.color(tag).map(|color| Style::default().fg(color))
        };

        match next_style {
            Some(next_style) => {
                if !pending.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut pending), style));
                }
                style = next_style;
                rest = from_open.get(close + 1..).unwrap_or_default();
            }
            None => {
                pending.push('[');
                rest = from_open.get(1..).unwrap_or_default();
            }
        }
    }

    pending.push_str(rest);
    if !pending.is_empty() {
        spans.push(Span::styled(pending, style));
    }
    Line::from(spans)
}
