//! SVG export of a diagram.
//! Paints the draw commands of every placed component into a standalone SVG
//! document sized to the diagram canvas.

use crate::diagram::Diagram;
use crate::renderer::{DrawCommand, TextAnchor, TextStyle};
use cluml_core::Vector;

const STROKE: &str = "#000000";
const BACKGROUND: &str = "#ffffff";
const FONT: &str = "font-family=\"monospace\" font-size=\"12\"";

/// Escape text for use in SVG content and attribute values
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn points_attr(points: &[Vector]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn text_attrs(style: TextStyle) -> String {
    let mut attrs = String::new();
    if style.anchor == TextAnchor::Middle {
        attrs.push_str(" text-anchor=\"middle\"");
    }
    if style.bold {
        attrs.push_str(" font-weight=\"bold\"");
    }
    if style.italic {
        attrs.push_str(" font-style=\"italic\"");
    }
    attrs
}

/// Render one command as an SVG element
pub fn render_command(command: &DrawCommand) -> String {
    match command {
        DrawCommand::Rect { rect } => {
            let rect = rect.normalize();
            format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" stroke=\"{}\"/>",
                rect.left,
                rect.top,
                rect.width(),
                rect.height(),
                BACKGROUND,
                STROKE
            )
        }
        DrawCommand::Line { from, to } => format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\"/>",
            from.x, from.y, to.x, to.y, STROKE
        ),
        DrawCommand::Polyline { points } => format!(
            "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\"/>",
            points_attr(points),
            STROKE
        ),
        DrawCommand::Polygon { points, filled } => format!(
            "<polygon points=\"{}\" fill=\"{}\" stroke=\"{}\"/>",
            points_attr(points),
            if *filled { STROKE } else { BACKGROUND },
            STROKE
        ),
        DrawCommand::Circle { center, radius } => format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" stroke=\"{}\"/>",
            center.x, center.y, radius, BACKGROUND, STROKE
        ),
        DrawCommand::Text {
            position,
            text,
            style,
        } => format!(
            "<text x=\"{}\" y=\"{}\" {}{}>{}</text>",
            position.x,
            position.y,
            FONT,
            text_attrs(*style),
            escape_text(text)
        ),
    }
}

/// Render a diagram as a complete SVG document
pub fn render_svg(diagram: &Diagram) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n",
        diagram.width, diagram.height, diagram.width, diagram.height
    ));
    svg.push_str(&format!("  <title>{}</title>\n", escape_text(&diagram.name)));
    svg.push_str(&format!(
        "  <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
        BACKGROUND
    ));

    for command in diagram.draw_commands() {
        svg.push_str("  ");
        svg.push_str(&render_command(&command));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}
