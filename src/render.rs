use crate::config::GraphConfig;
use crate::layout::Layout;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

pub fn render_svg(layout: &Layout, theme: &Theme, config: &GraphConfig) -> String {
    let mut svg = String::new();
    let width = layout.width.max(1.0);
    let height = layout.height.max(1.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>",
        theme.background, theme.border_color
    ));

    for edge in &layout.edges {
        svg.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            edge.x1, edge.y1, edge.x2, edge.y2, theme.edge_stroke, config.edge_stroke_width
        ));
    }

    for node in &layout.nodes {
        svg.push_str(&format!(
            "<g transform=\"translate({:.2}, {:.2})\">",
            node.x, node.y
        ));
        svg.push_str(&format!(
            "<circle r=\"{}\" fill=\"{}\"/>",
            config.node_radius, theme.node_fill
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" dy=\".35em\" text-anchor=\"{}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\" fill=\"{}\">{}</text>",
            node.label_offset.dx,
            node.label_offset.dy,
            label_anchor(node.label_offset.dx),
            theme.font_family,
            theme.font_size,
            theme.label_weight,
            theme.label_color,
            escape_xml(&node.id)
        ));
        svg.push_str("</g>");
    }

    svg.push_str("</svg>");
    svg
}

/// Anchor the text away from the node when the label sits to one side, and
/// center it when the label sits above or below.
fn label_anchor(dx: f64) -> &'static str {
    if dx > 0.0 {
        "start"
    } else if dx < 0.0 {
        "end"
    } else {
        "middle"
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, config: &GraphConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.default_size = usvg::Size::from_wh(config.width as f32, config.height as f32)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
